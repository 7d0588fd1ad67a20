//! Backend HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use log::{debug, error, info};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;

use crate::parser::{BodyFraming, Error as ParserError, HttpRequest, Method, parse_request};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::response::{HttpResponse, StatusCode};

/// A bound backend server.
///
/// Each accepted connection is served on its own task, so one request's delay
/// never holds up another client.
pub struct HttpServer {
    config: Arc<ServerConfig>,
    listener: TcpListener,
}

impl HttpServer {
    /// Bind the listening socket described by `config`.
    ///
    /// If `config.port` is zero the OS picks the port, and the picked port
    /// becomes the one reported in response bodies.
    pub async fn bind(mut config: ServerConfig) -> Result<Self, Error> {
        let addr = config.addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;
        config.port = local_addr.port();

        info!(
            "Backend {port} listening on http://{local_addr} (delay {delay:?})",
            port = config.port,
            delay = config.delay
        );

        Ok(Self {
            config: Arc::new(config),
            listener,
        })
    }

    /// The configuration in effect, with the bound port filled in.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The address the listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept and serve connections until the process is terminated.
    pub async fn serve(self) {
        let mut tasks = JoinSet::new();

        loop {
            tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::handle_new_connection(socket, addr, self.config.clone(), &mut tasks);
                        }
                        Err(e) => Self::handle_accept_error(e).await,
                    }
                }

                // Reap finished connection tasks
                Some(res) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = res {
                        error!("Connection task failed: {e}");
                    }
                }
            }
        }
    }

    /// Spawn a task serving one accepted connection.
    fn handle_new_connection(
        mut socket: TcpStream,
        addr: SocketAddr,
        config: Arc<ServerConfig>,
        tasks: &mut JoinSet<()>,
    ) {
        debug!("Accepted connection from {addr}");

        tasks.spawn(async move {
            match Self::handle_connection(&mut socket, &config).await {
                Ok(()) => debug!("Connection from {addr} closed"),
                Err(e) => debug!("Connection from {addr} closed: {e}"),
            }
        });
    }

    /// Log an accept error and back off briefly before accepting again.
    async fn handle_accept_error(e: std::io::Error) {
        error!("Error accepting connection: {e}");
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    /// Serve every request on a single connection.
    ///
    /// Returns once the connection is finished: the client closed it, the
    /// request asked for it to be closed, or the request could not be parsed.
    /// Malformed requests get an error response before the `Err` is returned.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        config: &ServerConfig,
    ) -> Result<(), Error> {
        let mut pending: Vec<u8> = Vec::new();
        let mut chunk = vec![0u8; config.read_buffer_size.max(1)];

        loop {
            let head =
                Self::read_head(socket, &mut pending, &mut chunk, config.max_head_size).await?;
            let Some(head_end) = head else {
                return Ok(()); // Connection closed
            };

            let head: Vec<u8> = pending.drain(..head_end).collect();
            let parsed = parse_request(&head)
                .and_then(|req| req.body_framing().map(|framing| (req, framing)));
            let (request, framing) = match parsed {
                Ok(parsed) => parsed,
                Err(e) => {
                    Self::reject(socket, Self::status_for(&e), &e.to_string()).await?;
                    return Err(Error::ParseError(e));
                }
            };

            // Chunked bodies are not decoded, so the connection can't be reused
            let keep_alive = request.keep_alive() && framing != BodyFraming::Chunked;

            if let BodyFraming::ContentLength(len) = framing {
                if !Self::discard_body(socket, &mut pending, &mut chunk, len).await? {
                    return Ok(()); // Client went away mid-body
                }
            }

            debug!(
                "{method} {path} {version}, responding in {delay:?}",
                method = request.method,
                path = request.path,
                version = request.version,
                delay = config.delay
            );

            if !config.delay.is_zero() {
                tokio::time::sleep(config.delay).await;
            }

            let response = Self::backend_response(config, &request, keep_alive);
            let bytes = if request.method == Method::HEAD {
                response.head_bytes()
            } else {
                response.to_bytes()
            };
            socket.write_all(&bytes).await?;
            socket.flush().await?;

            if !keep_alive {
                let _ = socket.shutdown().await;
                return Ok(());
            }
        }
    }

    /// The `200 OK` response every request receives.
    pub fn backend_response(config: &ServerConfig, request: &HttpRequest, keep_alive: bool) -> HttpResponse {
        let response = HttpResponse::new(StatusCode::Ok).with_body_string(config.body());

        if !keep_alive {
            response.with_header("Connection", "close")
        } else if !request.version.keep_alive_by_default() {
            response.with_header("Connection", "keep-alive")
        } else {
            response
        }
    }

    /// Buffer bytes until `pending` holds a complete request head.
    ///
    /// Returns the length of the head including its terminating blank line, or
    /// `None` if the client closed the connection first.
    async fn read_head(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        pending: &mut Vec<u8>,
        chunk: &mut [u8],
        max_head_size: usize,
    ) -> Result<Option<usize>, Error> {
        loop {
            // Blank lines between requests are allowed
            let blank = pending.iter().take_while(|b| matches!(b, b'\r' | b'\n')).count();
            pending.drain(..blank);

            if let Some(end) = find_head_end(pending) {
                if end > max_head_size {
                    return Err(Self::reject_oversized(socket, max_head_size).await);
                }
                return Ok(Some(end));
            }

            if pending.len() > max_head_size {
                return Err(Self::reject_oversized(socket, max_head_size).await);
            }

            let n = socket.read(chunk).await?;
            if n == 0 {
                return Ok(None);
            }
            pending.extend_from_slice(&chunk[..n]);
        }
    }

    /// Skip `len` body bytes, using buffered bytes first.
    ///
    /// Bytes read past the body belong to the next request and are left in
    /// `pending`. Returns `false` if the connection closed before the body
    /// ended.
    async fn discard_body(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        pending: &mut Vec<u8>,
        chunk: &mut [u8],
        len: u64,
    ) -> Result<bool, Error> {
        let buffered = len.min(pending.len() as u64) as usize;
        pending.drain(..buffered);
        let mut remaining = len - buffered as u64;

        while remaining > 0 {
            let n = socket.read(chunk).await?;
            if n == 0 {
                return Ok(false);
            }
            let used = remaining.min(n as u64) as usize;
            remaining -= used as u64;
            pending.extend_from_slice(&chunk[used..n]);
        }

        Ok(true)
    }

    fn status_for(e: &ParserError) -> StatusCode {
        match e {
            ParserError::UnsupportedVersion(_) => StatusCode::HttpVersionNotSupported,
            _ => StatusCode::BadRequest,
        }
    }

    async fn reject_oversized(socket: &mut (impl AsyncRead + AsyncWrite + Unpin), max_head_size: usize) -> Error {
        let err = Error::HeadTooLarge(max_head_size);
        match Self::reject(socket, StatusCode::RequestHeaderFieldsTooLarge, &err.to_string()).await {
            Ok(()) => err,
            Err(write_err) => write_err,
        }
    }

    /// Send an error response and close the connection.
    async fn reject(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        status: StatusCode,
        reason: &str,
    ) -> Result<(), Error> {
        let response = HttpResponse::new(status)
            .with_header("Connection", "close")
            .with_content_type("text/plain")
            .with_body_string(format!("{reason}\n"));
        socket.write_all(&response.to_bytes()).await?;
        socket.flush().await?;
        let _ = socket.shutdown().await;
        Ok(())
    }
}

/// Find the end of a request head: the index just past the first blank line.
fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.iter().enumerate().find_map(|(i, &b)| {
        if b != b'\n' {
            return None;
        }
        let rest = &buf[i + 1..];
        if rest.starts_with(b"\r\n") {
            Some(i + 3)
        } else if rest.starts_with(b"\n") {
            Some(i + 2)
        } else {
            None
        }
    })
}
