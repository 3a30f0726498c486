//! Ready-made responses.
//!
//! Every function builds a fresh [`Response`], headers included, so nothing
//! is shared between calls.

use crate::http::response::Response;
use crate::http::status::{self, reason_phrase};

pub const TEXT_HTML: &str = "text/html";

pub fn html(status: u16, body: impl Into<String>) -> Response {
    Response::new(
        status,
        vec![("Content-Type".to_string(), TEXT_HTML.to_string())],
        body.into(),
    )
}

pub fn ok() -> Response {
    html(status::OK, "200 OK")
}

pub fn not_found() -> Response {
    html(status::NOT_FOUND, "404 Not Found")
}

pub fn method_not_allowed() -> Response {
    html(status::METHOD_NOT_ALLOWED, "405 Method Not Allowed")
}

/// Plain HTML response for a protocol-level failure, e.g. `413 Payload Too Large`.
pub fn error(status: u16) -> Response {
    html(status, format!("{} {}", status, reason_phrase(status)))
}
