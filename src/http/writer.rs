//! Serialization of a [`Response`] to HTTP/1.1 wire bytes.
//!
//! Handler headers are written first and in order. The adapter then appends
//! `Content-Length`, `Date` and `Server` only when the handler did not set
//! them, and always closes the connection after one exchange.

use std::time::SystemTime;

use crate::http::response::Response;
use crate::http::status::reason_phrase;

pub fn encode_response(res: &Response, head_only: bool, server_name: &str) -> Vec<u8> {
    // HTTP/1.1 <status> <reason>\r\n
    // <header_name>: <header_value>\r\n
    // ...
    // \r\n
    let mut head = format!("HTTP/1.1 {} {}\r\n", res.status, reason_phrase(res.status));

    for (name, value) in &res.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }

    if !res.has_header("Content-Length") {
        head.push_str(&format!("Content-Length: {}\r\n", res.body.len()));
    }
    if !res.has_header("Date") {
        head.push_str(&format!(
            "Date: {}\r\n",
            httpdate::fmt_http_date(SystemTime::now())
        ));
    }
    if !res.has_header("Server") {
        head.push_str(&format!("Server: {}\r\n", server_name));
    }
    head.push_str("Connection: close\r\n\r\n");

    let mut out = head.into_bytes();
    if !head_only {
        out.extend_from_slice(res.body.as_bytes());
    }
    out
}
