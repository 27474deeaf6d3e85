use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use crate::error::ServerError;
use crate::http::buffer::ByteBuffer;
use crate::http::parser::parse_into;
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::timer::InactivityTimer;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

const READ_CHUNK_SIZE: usize = 1024;

/// How long a connection may go without receiving bytes while a request is
/// still incomplete.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub enum ConnectionState {
    Reading,
    Dispatching(Request),
    /// Bad request, no route, timeout or internal failure; replied to with
    /// the error's status.
    Failed(ServerError),
    Replying(Response),
    Closed,
}

/// One HTTP exchange over one stream: read a request, route it, reply,
/// close. There is no keep-alive.
pub struct Connection<S> {
    stream: Option<S>,
    buffer: ByteBuffer,
    timer: InactivityTimer,
    router: Arc<Router>,
    state: ConnectionState,
    replied: Option<StatusCode>,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>, read_timeout: Duration) -> Self {
        Self {
            stream: Some(stream),
            buffer: ByteBuffer::new(),
            timer: InactivityTimer::new(read_timeout),
            router,
            state: ConnectionState::Reading,
            replied: None,
        }
    }

    /// Drives the connection to completion. The stream is shut down and the
    /// timer cancelled on every path out, including write failures.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.drive().await;
        self.close().await;
        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Ok(request) => ConnectionState::Dispatching(request),
                        Err(err) => ConnectionState::Failed(err),
                    };
                }

                ConnectionState::Dispatching(request) => {
                    self.state = match Self::dispatch(&self.router, request).await {
                        Ok(response) => ConnectionState::Replying(response),
                        Err(err) => ConnectionState::Failed(err),
                    };
                }

                ConnectionState::Failed(err) => {
                    self.timer.cancel();
                    match &err {
                        ServerError::Internal(_) => error!(error = %err, "Request failed"),
                        ServerError::Timeout => warn!(error = %err, "Request failed"),
                        _ => info!(error = %err, "Request rejected"),
                    }
                    self.state = ConnectionState::Replying(err.to_response());
                }

                ConnectionState::Replying(response) => {
                    // state is already Closed; a failed write leaves it there
                    self.reply(&response).await?;
                }

                ConnectionState::Closed => return Ok(()),
            }
        }
    }

    /// Reads until the parser reports a finished request, the peer hangs up,
    /// or the inactivity timer fires.
    async fn read_request(&mut self) -> Result<Request, ServerError> {
        let mut request = Request::new();
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        self.timer.rearm();

        loop {
            let stream = self
                .stream
                .as_mut()
                .context("stream released while reading")?;

            let read = tokio::select! {
                read = stream.read(&mut chunk) => Some(read),
                _ = self.timer.expired() => None,
            };

            let Some(read) = read else {
                return Err(ServerError::Timeout);
            };
            let n = read.context("failed to read from peer")?;

            if n == 0 {
                return Err(ServerError::bad_request("connection closed before request was complete"));
            }

            self.timer.rearm();
            self.buffer.extend_from_slice(&chunk[..n]);
            parse_into(&mut request, &mut self.buffer)?;

            if request.finished {
                self.timer.cancel();
                return Ok(request);
            }
        }
    }

    /// Routes the request and runs its handler in a separate task, so a
    /// panicking handler becomes a 500 instead of taking the connection
    /// task down.
    async fn dispatch(router: &Router, request: Request) -> Result<Response, ServerError> {
        let route = router.get_handler(&request.path)?;
        let method = request.method;
        let path = request.path.clone();

        debug!(method = ?method, path = %path, route = route.template(), "Dispatching request");

        let response = match tokio::spawn(route.handle(request)).await {
            Ok(Ok(result)) => result.into_response(),
            Ok(Err(err)) => return Err(ServerError::Internal(err.context("handler failed"))),
            Err(join_err) => {
                return Err(ServerError::Internal(anyhow::anyhow!(
                    "handler did not complete: {join_err}"
                )));
            }
        };

        info!(
            method = ?method,
            path = %path,
            status = response.status.as_u16(),
            "Request handled"
        );
        Ok(response)
    }

    async fn reply(&mut self, response: &Response) -> anyhow::Result<()> {
        let stream = self
            .stream
            .as_mut()
            .context("stream released before reply")?;

        let mut writer = ResponseWriter::new(response);
        writer.write_to_stream(stream).await?;
        self.replied = Some(response.status);
        Ok(())
    }

    /// Cancels the inactivity timer and shuts the stream down. Calling it
    /// again is a no-op.
    pub async fn close(&mut self) {
        self.timer.cancel();
        self.state = ConnectionState::Closed;

        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown().await {
                debug!(error = %e, "Shutdown failed");
            }
            debug!("Connection closed");
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Whether the stream has been released.
    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Status of the response written to the peer, if one was written.
    pub fn replied_with(&self) -> Option<StatusCode> {
        self.replied
    }
}
