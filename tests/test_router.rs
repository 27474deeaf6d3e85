use hearth::http::request::Request;
use hearth::http::response::HandlerResult;
use hearth::router::{PathParams, PathPattern, RouteError, Router, shared};

async fn first(_req: Request, _params: PathParams) -> anyhow::Result<&'static str> {
    Ok("first")
}

async fn second(_req: Request, _params: PathParams) -> anyhow::Result<&'static str> {
    Ok("second")
}

async fn echo_params(req: Request, params: PathParams) -> anyhow::Result<String> {
    assert_eq!(req.path_param("id"), params.get("id"));
    assert_eq!(req.path_param("name"), params.get("name"));
    Ok(format!(
        "{}:{}",
        params.get("id").unwrap_or_default(),
        params.get("name").unwrap_or_default()
    ))
}

fn body(result: HandlerResult) -> String {
    String::from_utf8(result.into_response().body).unwrap()
}

#[test]
fn test_pattern_extracts_named_values() {
    let pattern = PathPattern::compile("/a/{x}/b/{y}").unwrap();

    let params = pattern.matches("/a/1/b/two").unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params.get("x"), Some("1"));
    assert_eq!(params.get("y"), Some("two"));

    assert!(pattern.matches("/a/b").is_none());
}

#[test]
fn test_pattern_without_placeholders() {
    let pattern = PathPattern::compile("/path").unwrap();

    assert!(pattern.matches("/path").unwrap().is_empty());
    assert!(pattern.matches("/path/").is_none());
    assert!(pattern.matches("/Path").is_none());
    assert!(pattern.matches("/path/more").is_none());
}

#[test]
fn test_pattern_three_placeholders() {
    let pattern = PathPattern::compile("/{var1}/{var2}/{var3}").unwrap();
    let params = pattern.matches("/1/12/123").unwrap();

    assert_eq!(params.get("var1"), Some("1"));
    assert_eq!(params.get("var2"), Some("12"));
    assert_eq!(params.get("var3"), Some("123"));
}

#[test]
fn test_pattern_placeholder_character_set() {
    let pattern = PathPattern::compile("/users/{user-id}").unwrap();

    assert_eq!(
        pattern.matches("/users/a_B-9").unwrap().get("user-id"),
        Some("a_B-9")
    );
    assert!(pattern.matches("/users/").is_none());
    assert!(pattern.matches("/users/a.b").is_none());
    assert!(pattern.matches("/users/a%20b").is_none());
}

#[test]
fn test_same_template_compiles_identically() {
    let a = PathPattern::compile("/a/{x}").unwrap();
    let b = PathPattern::compile("/a/{x}").unwrap();

    assert_eq!(a.as_str(), b.as_str());
    assert_eq!(a, b);
}

#[test]
fn test_duplicate_route_rejected() {
    let mut router = Router::new();
    router.add_route("/path", first).unwrap();

    let err = router.add_route("/path", second).unwrap_err();
    assert!(matches!(err, RouteError::DuplicateRoute { .. }));
    assert_eq!(router.len(), 1);
}

#[tokio::test]
async fn test_duplicate_compiled_pattern_keeps_first_route() {
    let mut router = Router::new();
    router.add_route("/items/{id}", first).unwrap();

    let err = router.add_route("/items/{item}", second).unwrap_err();
    match err {
        RouteError::DuplicateRoute { template, existing } => {
            assert_eq!(template, "/items/{item}");
            assert_eq!(existing, "/items/{id}");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let matched = router.get_handler("/items/7").unwrap();
    assert_eq!(matched.params().get("id"), Some("7"));
    assert_eq!(body(matched.handle(Request::new()).await.unwrap()), "first");
}

#[test]
fn test_not_found() {
    let router = Router::new();

    let err = router.get_handler("/some-path").unwrap_err();
    assert!(matches!(err, RouteError::NotFound { path } if path == "/some-path"));
}

#[test]
fn test_no_trailing_slash_normalization() {
    let mut router = Router::new();
    router.add_route("/login", first).unwrap();

    assert!(router.get_handler("/login").is_ok());
    assert!(router.get_handler("/login/").is_err());
}

#[tokio::test]
async fn test_first_registered_match_wins() {
    let mut router = Router::new();
    router.add_route("/", first).unwrap();
    router.add_route("/welcome/{name}", second).unwrap();

    let matched = router.get_handler("/welcome/bob").unwrap();
    assert_eq!(matched.template(), "/welcome/{name}");
    assert_eq!(body(matched.handle(Request::new()).await.unwrap()), "second");
}

#[tokio::test]
async fn test_overlapping_routes_follow_registration_order() {
    let mut router = Router::new();
    router.add_route("/files/{name}", first).unwrap();
    router.add_route("/files/latest", second).unwrap();

    let matched = router.get_handler("/files/latest").unwrap();
    assert_eq!(body(matched.handle(Request::new()).await.unwrap()), "first");
}

#[tokio::test]
async fn test_handler_receives_path_params() {
    let mut router = Router::new();
    router.add_route("/{id}/edit/{name}", echo_params).unwrap();

    let matched = router.get_handler("/12/edit/bob").unwrap();
    let result = matched.handle(Request::new()).await.unwrap();

    assert_eq!(result, HandlerResult::Body(b"12:bob".to_vec()));
}

#[test]
fn test_add_routes_in_order() {
    let mut router = Router::new();
    router
        .add_routes([
            ("/welcome/{name}", shared(second)),
            ("/", shared(first)),
            ("/login", shared(first)),
        ])
        .unwrap();

    let templates: Vec<_> = router.templates().collect();
    assert_eq!(templates, ["/welcome/{name}", "/", "/login"]);
}

#[test]
fn test_add_routes_stops_at_duplicate() {
    let mut router = Router::new();
    let err = router
        .add_routes([
            ("/a", shared(first)),
            ("/a", shared(second)),
            ("/b", shared(first)),
        ])
        .unwrap_err();

    assert!(matches!(err, RouteError::DuplicateRoute { .. }));
    assert_eq!(router.templates().collect::<Vec<_>>(), ["/a"]);
}

#[test]
fn test_invalid_template() {
    let mut router = Router::new();
    let err = router.add_route("/{id}/x/{id}", first).unwrap_err();

    assert!(matches!(err, RouteError::InvalidTemplate { .. }));
    assert!(router.is_empty());
}
