use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::http::parser::parse_request;
use crate::http::reader::{HeaderReader, ReadOutcome};
use crate::http::request::RequestOutcome;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::resource::ResourceResolver;

pub struct Connection<S, R> {
    stream: BufReader<S>,
    reader: HeaderReader,
    resolver: R,
    state: ConnectionState,
}

#[derive(Debug)]
pub enum ConnectionState {
    AwaitingRequest,
    Parsing,
    Responding(RequestOutcome),
    Closed,
}

impl<S, R> Connection<S, R>
where
    S: AsyncRead + AsyncWrite + Unpin,
    R: ResourceResolver,
{
    pub fn new(stream: S, resolver: R, max_header_bytes: Option<usize>) -> Self {
        Self {
            stream: BufReader::new(stream),
            reader: HeaderReader::new(max_header_bytes),
            resolver,
            state: ConnectionState::AwaitingRequest,
        }
    }

    /// Serves requests until the peer disconnects or a response asks to
    /// close. I/O failures end the connection with an error.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.serve().await;
        self.state = ConnectionState::Closed;
        // The peer may already be gone.
        if let Err(e) = self.stream.shutdown().await {
            tracing::trace!(error = %e, "shutdown on close failed");
        }
        result
    }

    async fn serve(&mut self) -> anyhow::Result<()> {
        loop {
            match &self.state {
                ConnectionState::AwaitingRequest => {
                    match self.reader.read_header(&mut self.stream).await? {
                        ReadOutcome::Header if self.reader.is_probe() => {
                            tracing::trace!("ignoring empty request probe");
                        }
                        ReadOutcome::Header => {
                            self.state = ConnectionState::Parsing;
                        }
                        ReadOutcome::TooLarge => {
                            tracing::warn!(
                                read = self.reader.header().len(),
                                "request header exceeds limit"
                            );
                            self.state =
                                ConnectionState::Responding(RequestOutcome::bad_request());
                        }
                        ReadOutcome::Closed => {
                            tracing::debug!("peer closed connection");
                            self.state = ConnectionState::Closed;
                        }
                    }
                }

                ConnectionState::Parsing => {
                    let outcome = parse_request(self.reader.header(), &self.resolver).await;
                    self.state = ConnectionState::Responding(outcome);
                }

                ConnectionState::Responding(outcome) => {
                    tracing::debug!(
                        method = outcome.method.as_str(),
                        path = %outcome.path,
                        status = outcome.status.as_u16(),
                        close = outcome.should_close,
                        "serving request"
                    );

                    let response = Response::for_outcome(outcome, &self.resolver).await?;
                    let close = outcome.should_close;

                    let mut writer = ResponseWriter::new(&response);
                    writer.write_to_stream(&mut self.stream).await?;

                    self.state = if close {
                        ConnectionState::Closed
                    } else {
                        ConnectionState::AwaitingRequest
                    };
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }
}
