use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::router::RouteError;

/// What a `{name}` placeholder matches within a path.
const PARAM_CHARS: &str = "[a-zA-Z0-9_-]+";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z0-9_-]+)\}").expect("placeholder regex is valid"));

/// Values captured from a path by a route template, keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(HashMap<String, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|v| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.0
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.0
    }
}

impl From<HashMap<String, String>> for PathParams {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

/// A route template compiled into an anchored regular expression.
///
/// `/widgets/{id}` becomes `^/widgets/([a-zA-Z0-9_-]+)$`. Literal text is
/// escaped, and placeholder names are kept beside the regex in capture
/// order, so two templates that differ only in placeholder names compile to
/// the same pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    regex: Regex,
    names: Vec<String>,
}

impl PathPattern {
    /// Compiles a route template.
    ///
    /// ```
    /// # use hearth::router::PathPattern;
    /// let pattern = PathPattern::compile("/a/{x}/b/{y}").unwrap();
    /// let params = pattern.matches("/a/1/b/two").unwrap();
    /// assert_eq!(params.get("x"), Some("1"));
    /// assert_eq!(params.get("y"), Some("two"));
    /// assert!(pattern.matches("/a/b").is_none());
    /// ```
    pub fn compile(template: &str) -> Result<Self, RouteError> {
        let mut source = String::from("^");
        let mut names: Vec<String> = Vec::new();
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(template) {
            let Some(whole) = caps.get(0) else { continue };
            let name = &caps[1];

            if names.iter().any(|n| n == name) {
                return Err(RouteError::InvalidTemplate {
                    template: template.to_string(),
                    reason: format!("placeholder {{{name}}} appears more than once"),
                });
            }

            source.push_str(&regex::escape(&template[last..whole.start()]));
            source.push('(');
            source.push_str(PARAM_CHARS);
            source.push(')');
            names.push(name.to_string());
            last = whole.end();
        }

        source.push_str(&regex::escape(&template[last..]));
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| RouteError::InvalidTemplate {
            template: template.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            template: template.to_string(),
            regex,
            names,
        })
    }

    /// The compiled regular expression source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn param_names(&self) -> &[String] {
        &self.names
    }

    /// Matches the whole of `path`, returning the captured parameters.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let caps = self.regex.captures(path)?;
        let params = self
            .names
            .iter()
            .zip(caps.iter().skip(1))
            .filter_map(|(name, m)| m.map(|m| (name.clone(), m.as_str().to_string())))
            .collect();
        Some(PathParams(params))
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for PathPattern {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_to_anchored_regex() {
        let pattern = PathPattern::compile("/path/{id}").unwrap();
        assert_eq!(pattern.as_str(), "^/path/([a-zA-Z0-9_-]+)$");
        assert_eq!(pattern.param_names(), ["id".to_string()]);
    }

    #[test]
    fn literal_text_is_escaped() {
        let pattern = PathPattern::compile("/test.html").unwrap();
        assert!(pattern.matches("/test.html").is_some());
        assert!(pattern.matches("/testxhtml").is_none());
    }

    #[test]
    fn repeated_placeholder_is_rejected() {
        let err = PathPattern::compile("/{id}/{id}").unwrap_err();
        assert!(matches!(err, RouteError::InvalidTemplate { .. }));
    }
}
