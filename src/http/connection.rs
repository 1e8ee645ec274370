use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::TcpStream;

use anyhow::Context;

use crate::http::parser::{parse_http_request, ParseError};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::server::ServerContext;

/// Serves exactly one request over a blocking byte stream.
pub struct Connection<R, W> {
    reader: R,
    writer: W,
    ctx: ServerContext,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Rejecting(ParseError),
    Closed,
}

impl Connection<BufReader<TcpStream>, BufWriter<TcpStream>> {
    pub fn from_tcp(stream: TcpStream, ctx: ServerContext) -> anyhow::Result<Self> {
        let read_half = stream.try_clone().context("cloning tcp stream")?;
        Ok(Self::new(BufReader::new(read_half), BufWriter::new(stream), ctx))
    }
}

impl<R: BufRead, W: Write> Connection<R, W> {
    pub fn new(reader: R, writer: W, ctx: ServerContext) -> Self {
        Self {
            reader,
            writer,
            ctx,
            state: ConnectionState::Reading,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match parse_http_request(&mut self.reader, self.ctx.sessions.clone()) {
                        Ok(request) => ConnectionState::Processing(request),
                        Err(e) => ConnectionState::Rejecting(e),
                    };
                }

                ConnectionState::Processing(request) => {
                    let response = Response::new(&mut self.writer as &mut dyn Write, self.ctx.content.clone());
                    let status = self
                        .ctx
                        .handler
                        .handle(&request, response)
                        .context("writing response")?;
                    tracing::info!(
                        method = %request.method(),
                        path = request.path(),
                        status = status.as_u16(),
                        "request served"
                    );
                }

                ConnectionState::Rejecting(e) => {
                    tracing::warn!(error = %e, "rejecting request");
                    let response = Response::new(&mut self.writer as &mut dyn Write, self.ctx.content.clone());
                    response.bad_request().context("writing 400 response")?;
                }

                // One request per connection.
                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
