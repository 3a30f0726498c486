use crate::http::headers::HttpHeaders;

/// An inbound request as seen by routing and handlers.
///
/// Built once per call by the [`parser`](crate::http::parser) (or directly
/// with [`Request::new`]) and only ever lent out as `&Request` afterwards.
/// Routing reads `method` and `path` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Verb exactly as received; never case-normalized.
    pub method: String,
    /// Request target without its query string.
    pub path: String,
    pub query: Option<String>,
    pub version: (u8, u8),

    pub headers: HttpHeaders,
    pub body: Vec<u8>,
}

impl Request {
    pub fn new(method: impl Into<String>, target: &str) -> Self {
        let mut req = Self::empty();
        req.method = method.into();
        req.set_target(target);
        req
    }

    pub(crate) fn empty() -> Self {
        Self {
            method: String::new(),
            path: String::new(),
            query: None,
            version: (1, 1),
            headers: HttpHeaders::new(),
            body: Vec::new(),
        }
    }

    /// Splits a request target into path and query.
    pub fn set_target(&mut self, target: &str) {
        match target.split_once('?') {
            Some((path, query)) => {
                self.path = path.to_string();
                self.query = Some(query.to_string());
            }
            None => {
                self.path = target.to_string();
                self.query = None;
            }
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn content_length(&self) -> Option<&str> {
        self.headers.get("Content-Length")
    }
}
