use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tracing::{info, warn};

use crate::app::{App, Route, route};
use crate::http::error::HttpError;
use crate::http::parser::{read_headers, read_request_line};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Drives a single request/response exchange over one stream.
pub struct Connection<S> {
    stream: BufReader<S>,
    peer: SocketAddr,
    app: Arc<App>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request, Route),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, app: Arc<App>) -> Self {
        Self {
            stream: BufReader::new(stream),
            peer,
            app,
            state: ConnectionState::Reading,
        }
    }

    /// Runs the state machine until the response is written.
    ///
    /// Request errors are answered with a canned response and are not
    /// returned; only I/O failures while writing surface as `Err`.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Ok((req, route)) => ConnectionState::Processing(req, route),
                        Err(e) => {
                            warn!(peer = %self.peer, error = %e, "Rejected request");
                            ConnectionState::Writing(ResponseWriter::new(&Response::from_error(&e)))
                        }
                    };
                }

                ConnectionState::Processing(req, route) => {
                    let response = match self.app.respond(*route, req, &mut self.stream).await {
                        Ok(response) => response,
                        Err(e) => {
                            warn!(
                                peer = %self.peer,
                                method = %req.method,
                                target = %req.target,
                                error = %e,
                                "Request failed"
                            );
                            Response::from_error(&e)
                        }
                    };

                    info!(
                        peer = %self.peer,
                        method = %req.method,
                        target = %req.target,
                        status = response.status.as_u16(),
                        "Request served"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    let result = writer.write_to_stream(self.stream.get_mut()).await;
                    self.state = ConnectionState::Closed;
                    result?;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads the request line, checks the route, then reads the headers.
    ///
    /// The route is checked before any header is read so a bad method or
    /// target is refused without consuming the header block.
    async fn read_request(&mut self) -> Result<(Request, Route), HttpError> {
        let line = read_request_line(&mut self.stream).await?;
        let route = route(&line.method, &line.target)?;
        let headers = read_headers(&mut self.stream).await?;
        Ok((line.into_request(headers), route))
    }
}
