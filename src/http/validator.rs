use thiserror::Error;

use crate::config::ServerConfig;
use crate::http::HttpVersion;
use crate::http::request::Request;
use crate::http::status;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidatorError {
    #[error("HTTP version not supported")]
    HttpVersionNotSupported,

    #[error("malformed header field")]
    MalformedHeaderField,

    #[error("body not allowed for this method")]
    BodyNotAllowed,

    #[error("payload too large")]
    PayloadTooLarge,

    #[error("unsupported transfer encoding")]
    UnsupportedTransferEncoding,
}

impl ValidatorError {
    pub fn into_http_status(self) -> u16 {
        match self {
            ValidatorError::HttpVersionNotSupported => status::HTTP_VERSION_NOT_SUPPORTED,
            ValidatorError::MalformedHeaderField => status::BAD_REQUEST,
            ValidatorError::BodyNotAllowed => status::BAD_REQUEST,
            ValidatorError::PayloadTooLarge => status::PAYLOAD_TOO_LARGE,
            ValidatorError::UnsupportedTransferEncoding => status::NOT_IMPLEMENTED,
        }
    }
}

/// Checks a parsed request head against protocol rules and server limits.
///
/// Runs once the headers are parsed and before the body is read. Only the
/// protocol is judged here; whether the verb means anything for the target
/// resource is left to routing.
pub struct Validator;

impl Validator {
    fn validate_http_version(v: (u8, u8), max: HttpVersion) -> Result<(), ValidatorError> {
        match HttpVersion::from_pair(v) {
            Some(http_v) if http_v <= max => Ok(()),
            _ => Err(ValidatorError::HttpVersionNotSupported),
        }
    }

    fn validate_http_method(content_length: usize, method: &str) -> Result<(), ValidatorError> {
        match method {
            "GET" | "HEAD" if content_length > 0 => Err(ValidatorError::BodyNotAllowed),
            _ => Ok(()),
        }
    }

    /// `content_length` is the body length the parser read from the headers.
    pub fn validate_request(
        req: &Request,
        content_length: usize,
        config: &ServerConfig,
    ) -> Result<(), ValidatorError> {
        Self::validate_http_version(req.version, config.http_version)?;

        // HTTP/1.1 requires a Host header
        if req.version == (1, 1) && !req.headers.contains("Host") {
            return Err(ValidatorError::MalformedHeaderField);
        }

        if req.headers.contains("Transfer-Encoding") {
            return Err(ValidatorError::UnsupportedTransferEncoding);
        }

        Self::validate_http_method(content_length, &req.method)?;

        if content_length > config.max_body_size {
            return Err(ValidatorError::PayloadTooLarge);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServerConfig {
        ServerConfig {
            max_body_size: 10,
            ..ServerConfig::default()
        }
    }

    #[test]
    fn accepts_plain_requests() {
        let req = Request::new("GET", "/").with_header("Host", "h");
        assert_eq!(Validator::validate_request(&req, 0, &config()), Ok(()));

        let mut req = Request::new("POST", "/dogs/40/fur");
        req.version = (1, 0);
        assert_eq!(Validator::validate_request(&req, 10, &config()), Ok(()));
    }

    #[test]
    fn unknown_verbs_are_left_to_routing() {
        let req = Request::new("BREW", "/pot").with_header("Host", "h");
        assert_eq!(Validator::validate_request(&req, 0, &config()), Ok(()));
    }

    #[test]
    fn requires_host_on_http_1_1() {
        let req = Request::new("GET", "/");
        assert_eq!(
            Validator::validate_request(&req, 0, &config()),
            Err(ValidatorError::MalformedHeaderField)
        );
    }

    #[test]
    fn rejects_body_on_get() {
        let req = Request::new("GET", "/").with_header("Host", "h");
        assert_eq!(
            Validator::validate_request(&req, 3, &config()),
            Err(ValidatorError::BodyNotAllowed)
        );

        let req = Request::new("HEAD", "/").with_header("Host", "h");
        assert_eq!(
            Validator::validate_request(&req, 1, &config()),
            Err(ValidatorError::BodyNotAllowed)
        );
    }

    #[test]
    fn enforces_body_limit() {
        let req = Request::new("PUT", "/cats/1").with_header("Host", "h");
        let err = Validator::validate_request(&req, 11, &config()).unwrap_err();
        assert_eq!(err, ValidatorError::PayloadTooLarge);
        assert_eq!(err.into_http_status(), 413);
    }

    #[test]
    fn rejects_chunked_bodies() {
        let req = Request::new("POST", "/")
            .with_header("Host", "h")
            .with_header("Transfer-Encoding", "chunked");
        let err = Validator::validate_request(&req, 0, &config()).unwrap_err();
        assert_eq!(err.into_http_status(), 501);
    }

    #[test]
    fn respects_configured_max_version() {
        let config = ServerConfig {
            http_version: HttpVersion::V1_0,
            ..ServerConfig::default()
        };
        let req = Request::new("GET", "/").with_header("Host", "h");
        assert_eq!(
            Validator::validate_request(&req, 0, &config),
            Err(ValidatorError::HttpVersionNotSupported)
        );
    }
}
