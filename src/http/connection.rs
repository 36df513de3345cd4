use std::io;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::encoding;
use crate::http::parser::{parse_http_request, required_length};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::routes::Router;

const READ_CHUNK: usize = 1024;

/// Upper bound on the header block; past it, whatever arrived is parsed as is.
pub const MAX_HEADER_SIZE: usize = 64 * 1024;

/// Serves exactly one request on an accepted stream.
pub struct Connection<'r, S> {
    stream: S,
    router: &'r Router,
    buffer: BytesMut,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// Routes `request` and applies content-encoding negotiation.
pub async fn respond(router: &Router, request: &Request) -> io::Result<Response> {
    let response = router.dispatch(request).await;
    encoding::negotiate(request, response)
}

impl<'r, S> Connection<'r, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: &'r Router) -> Self {
        Self {
            stream,
            router,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(req) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    None => {
                        tracing::debug!("Peer closed before sending a request");
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req) => {
                    if req.is_empty() {
                        tracing::debug!("Unparsable request line, answering 404");
                    } else {
                        tracing::debug!(
                            method = ?req.method,
                            path = %req.path,
                            "Processing request"
                        );
                    }

                    let response = respond(self.router, req).await?;

                    tracing::info!(
                        method = ?req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        bytes = response.body.len(),
                        "Request handled"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    tracing::trace!(bytes = writer.remaining(), "Writing response");
                    writer.write_to_stream(&mut self.stream).await?;
                    self.stream.shutdown().await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until the header block and the declared body have arrived.
    ///
    /// If the peer stops sending early, or the header block outgrows
    /// `MAX_HEADER_SIZE`, the bytes received so far are parsed as they are.
    /// Returns `None` when nothing at all was received.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        let mut needed = None;

        loop {
            if needed.is_none() {
                needed = required_length(&self.buffer);
            }

            match needed {
                Some(needed) if self.buffer.len() >= needed => break,
                None if self.buffer.len() > MAX_HEADER_SIZE => {
                    tracing::warn!(
                        received = self.buffer.len(),
                        "Header block too large, parsing what was received"
                    );
                    break;
                }
                _ => {}
            }

            self.buffer.reserve(READ_CHUNK);
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                if needed.is_some() {
                    tracing::debug!(
                        received = self.buffer.len(),
                        "Peer closed before the full body arrived"
                    );
                }
                break;
            }
        }

        Ok(Some(parse_http_request(&self.buffer)))
    }
}
