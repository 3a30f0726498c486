//! Incremental HTTP/1.x request parser.
//!
//! Bytes are pushed with [`Parser::feed`] as they arrive from the socket and
//! [`Parser::advance`] makes as much progress as the buffered data allows.
//! Parsing stops once after the header block ([`ParserOk::HeadersDone`]) so
//! the caller can validate the request before any body is read.

use thiserror::Error;

use crate::config::ServerConfig;
use crate::http::request::Request;
use crate::http::status;
use crate::http::{is_token, HTTP_METHOD_MAX_LEN};

// Room on the request line besides the target: method, two spaces, "HTTP/1.1".
const REQUEST_LINE_OVERHEAD: usize = HTTP_METHOD_MAX_LEN + 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserLimits {
    pub max_path_size: usize,
    pub max_header_size: usize,
}

impl From<&ServerConfig> for ParserLimits {
    fn from(config: &ServerConfig) -> Self {
        Self {
            max_path_size: config.max_path_size,
            max_header_size: config.max_header_size,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParserOk {
    /// More bytes are needed to make progress.
    Incomplete,
    /// The request line and all headers have been parsed.
    HeadersDone,
    /// The request, including any body, is complete.
    Done,
}

// To keep parser logic separate from HTTP status codes,
// direct http error codes are not used here but mapped later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParserError {
    #[error("malformed request")]
    Malformed,

    #[error("request target too long")]
    UriTooLong,

    #[error("header block too large")]
    HeadersTooLarge,

    #[error("unsupported HTTP version")]
    HttpVersionNotSupported,
}

impl ParserError {
    pub fn into_http_status(self) -> u16 {
        match self {
            ParserError::Malformed => status::BAD_REQUEST,
            ParserError::UriTooLong => status::URI_TOO_LONG,
            ParserError::HeadersTooLarge => status::HEADER_FIELDS_TOO_LARGE,
            ParserError::HttpVersionNotSupported => status::HTTP_VERSION_NOT_SUPPORTED,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum ParserState {
    RequestLine,
    Headers,
    Body,
    Done,
}

pub struct Parser {
    buf: Vec<u8>,
    state: ParserState,
    limits: ParserLimits,
    header_bytes: usize,
    content_length: usize,
}

impl Parser {
    pub fn new(limits: ParserLimits) -> Self {
        Self {
            buf: Vec::new(),
            state: ParserState::RequestLine,
            limits,
            header_bytes: 0,
            content_length: 0,
        }
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn is_buffer_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Declared body length, known once [`ParserOk::HeadersDone`] is returned.
    pub fn content_length(&self) -> usize {
        self.content_length
    }

    /// Parses buffered bytes into `req` until more input is needed, the header
    /// block ends, or the request is complete.
    pub fn advance(&mut self, req: &mut Request) -> Result<ParserOk, ParserError> {
        loop {
            match self.state {
                ParserState::RequestLine => match find_crlf(&self.buf) {
                    // Tolerate empty lines before the request line
                    Some(0) => {
                        self.buf.drain(..2);
                    }
                    Some(end) => {
                        self.parse_request_line(end, req)?;
                        self.buf.drain(..end + 2);
                        self.state = ParserState::Headers;
                    }
                    None => {
                        if self.buf.len() > self.limits.max_path_size + REQUEST_LINE_OVERHEAD {
                            return Err(ParserError::UriTooLong);
                        }
                        return Ok(ParserOk::Incomplete);
                    }
                },
                ParserState::Headers => match find_crlf(&self.buf) {
                    Some(0) => {
                        self.buf.drain(..2);
                        self.content_length = content_length(req)?;
                        self.state = ParserState::Body;
                        return Ok(ParserOk::HeadersDone);
                    }
                    Some(end) => {
                        self.header_bytes += end + 2;
                        if self.header_bytes > self.limits.max_header_size {
                            return Err(ParserError::HeadersTooLarge);
                        }
                        parse_header_line(&self.buf[..end], req)?;
                        self.buf.drain(..end + 2);
                    }
                    None => {
                        if self.header_bytes + self.buf.len() > self.limits.max_header_size {
                            return Err(ParserError::HeadersTooLarge);
                        }
                        return Ok(ParserOk::Incomplete);
                    }
                },
                ParserState::Body => {
                    let missing = self.content_length - req.body.len();
                    let to_copy = missing.min(self.buf.len());
                    req.body.extend(self.buf.drain(..to_copy));

                    if req.body.len() < self.content_length {
                        return Ok(ParserOk::Incomplete);
                    }
                    self.state = ParserState::Done;
                }
                ParserState::Done => return Ok(ParserOk::Done),
            }
        }
    }

    fn parse_request_line(&self, end: usize, req: &mut Request) -> Result<(), ParserError> {
        // Request line: METHOD TARGET HTTP/VERSION
        let line = std::str::from_utf8(&self.buf[..end]).map_err(|_| ParserError::Malformed)?;
        let parts: Vec<&str> = line.split(' ').collect();
        let [method, target, version] = parts[..] else {
            return Err(ParserError::Malformed);
        };

        if method.len() > HTTP_METHOD_MAX_LEN || !is_token(method) {
            return Err(ParserError::Malformed);
        }

        if target.len() > self.limits.max_path_size {
            return Err(ParserError::UriTooLong);
        }
        if !target.starts_with('/') {
            return Err(ParserError::Malformed);
        }

        let (major, minor) = version
            .strip_prefix("HTTP/")
            .and_then(|v| v.split_once('.'))
            .and_then(|(maj, min)| Some((maj.parse::<u8>().ok()?, min.parse::<u8>().ok()?)))
            .ok_or(ParserError::Malformed)?;
        if !(major == 1 && (minor == 0 || minor == 1)) {
            return Err(ParserError::HttpVersionNotSupported);
        }

        req.method = method.to_string();
        req.set_target(target);
        req.version = (major, minor);
        Ok(())
    }
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

fn parse_header_line(line: &[u8], req: &mut Request) -> Result<(), ParserError> {
    let line = std::str::from_utf8(line).map_err(|_| ParserError::Malformed)?;
    let (name, value) = line.split_once(':').ok_or(ParserError::Malformed)?;

    // No whitespace allowed before the colon, and no obsolete line folding
    if !is_token(name) {
        return Err(ParserError::Malformed);
    }

    req.headers.append(name, value.trim());
    Ok(())
}

fn content_length(req: &Request) -> Result<usize, ParserError> {
    match req.content_length() {
        Some(v) => v.parse::<usize>().map_err(|_| ParserError::Malformed),
        None => Ok(0),
    }
}
