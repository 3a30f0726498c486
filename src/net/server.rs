//! TCP front end that feeds requests into a [`Router`].
//!
//! Each accepted connection gets its own async-std task and carries exactly
//! one request. The task reads until the [`Parser`] has the header block,
//! lets the [`Validator`] accept or reject the head, reads the body, and then
//! hands the finished [`Request`] to [`Router::call`]. Whatever comes back is
//! encoded by the [`writer`](crate::http::writer) and the socket is closed.
//!
//! Parser and validator failures, as well as a read timeout, are turned into
//! the matching error page instead of reaching the router. I/O failures on a
//! connection are logged and only end that connection.

use std::net::SocketAddr;
use std::sync::Arc;

use async_std::future;
use async_std::io;
use async_std::net::{TcpListener, TcpStream};
use async_std::prelude::*;
use async_std::task;

use crate::config::ServerConfig;
use crate::handler::responses;
use crate::handler::router::Router;
use crate::http::parser::{Parser, ParserError, ParserLimits, ParserOk};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::status;
use crate::http::validator::{Validator, ValidatorError};
use crate::http::writer::encode_response;

pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
    config: Arc<ServerConfig>,
}

/// Why reading a request stopped early. Everything except `Io` and
/// `ConnectionClosed` still gets an error response.
enum ReadError {
    Io(std::io::Error),
    ConnectionClosed,
    TimedOut,
    Parser(ParserError),
    Validator(ValidatorError),
}

impl Server {
    /// Binds the listener. The route tree is frozen from here on.
    pub async fn bind(config: ServerConfig, router: Router) -> std::io::Result<Self> {
        let listener = TcpListener::bind((config.address, config.port)).await?;
        Ok(Self {
            listener,
            router: router.into_shared(),
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the listener fails, spawning a new
    /// asynchronous task for each client.
    pub async fn run(self) -> std::io::Result<()> {
        log::info!("Listening on {}", self.local_addr()?);

        let mut incoming = self.listener.incoming();
        while let Some(stream) = incoming.next().await {
            let stream = match stream {
                Ok(stream) => stream,
                Err(err) => {
                    log::error!("Failed to accept connection: {}", err);
                    continue;
                }
            };

            let router = Arc::clone(&self.router);
            let config = Arc::clone(&self.config);
            task::spawn(async move {
                if let Err(err) = Self::handle_client(stream, router, config).await {
                    log::error!("Connection error: {}", err);
                }
            });
        }

        Ok(())
    }

    /// Pulls one request off the stream.
    ///
    /// Once all headers are read the request is validated, then any body is
    /// read until completion.
    async fn read_request(
        stream: &mut TcpStream,
        config: &ServerConfig,
    ) -> Result<Request, ReadError> {
        let mut parser = Parser::new(ParserLimits::from(config));
        let mut req = Request::empty();
        let mut buffer = vec![0; config.buffer_size];

        loop {
            match parser.advance(&mut req).map_err(ReadError::Parser)? {
                ParserOk::Incomplete => {
                    let n = match stream.read(&mut buffer).await {
                        Ok(0) => return Err(ReadError::ConnectionClosed),
                        Ok(n) => n,
                        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(ReadError::Io(e)),
                    };
                    parser.feed(&buffer[..n]);
                }
                ParserOk::HeadersDone => {
                    // Reject bad heads before reading any body bytes
                    Validator::validate_request(&req, parser.content_length(), config)
                        .map_err(ReadError::Validator)?;
                }
                ParserOk::Done => return Ok(req),
            }
        }
    }

    /// Writes the given [`Response`] back to the TCP stream.
    async fn write_response(
        stream: &mut TcpStream,
        response: &Response,
        head_only: bool,
        config: &ServerConfig,
    ) -> std::io::Result<()> {
        let bytes = encode_response(response, head_only, &config.server_name);
        io::timeout(config.write_timeout, async {
            stream.write_all(&bytes).await?;
            stream.flush().await
        })
        .await
    }

    /// Serves the one request carried by `stream`.
    async fn handle_client(
        mut stream: TcpStream,
        router: Arc<Router>,
        config: Arc<ServerConfig>,
    ) -> std::io::Result<()> {
        let peer = stream.peer_addr()?;

        let read = future::timeout(config.read_timeout, Self::read_request(&mut stream, &config))
            .await
            .unwrap_or(Err(ReadError::TimedOut));

        let (response, head_only) = match read {
            Ok(req) => {
                let res = router.call(&req);
                log::info!("{} {} {} -> {}", peer, req.method, req.path, res.status);
                (res, req.method == "HEAD")
            }
            Err(ReadError::Io(err)) => {
                log::error!("I/O error while reading request from {}: {}", peer, err);
                return Ok(());
            }
            Err(ReadError::ConnectionClosed) => return Ok(()),
            Err(ReadError::TimedOut) => {
                log::warn!("Timed out reading request from {}", peer);
                (responses::error(status::REQUEST_TIMEOUT), false)
            }
            Err(ReadError::Parser(err)) => {
                log::warn!("Rejected request from {}: {}", peer, err);
                (responses::error(err.into_http_status()), false)
            }
            Err(ReadError::Validator(err)) => {
                log::warn!("Rejected request from {}: {}", peer, err);
                (responses::error(err.into_http_status()), false)
            }
        };

        Self::write_response(&mut stream, &response, head_only, &config).await
    }
}
