/// Response body: text or raw bytes, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    Bytes(Vec<u8>),
}

impl Body {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Text(s) => s.as_bytes(),
            Body::Bytes(b) => b,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The body as text, if it was produced as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(s) => Some(s),
            Body::Bytes(_) => None,
        }
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Body::Text(s.to_string())
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::Text(s)
    }
}

impl From<Vec<u8>> for Body {
    fn from(b: Vec<u8>) -> Self {
        Body::Bytes(b)
    }
}

impl From<&[u8]> for Body {
    fn from(b: &[u8]) -> Self {
        Body::Bytes(b.to_vec())
    }
}

/// The `(status, headers, body)` triple every handler produces.
///
/// Headers are an ordered list of pairs rather than a map: a repeated name is
/// kept as a second entry and never overwrites the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl Response {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: impl Into<Body>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// First value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }
}

/// Builds a response from its parts, unchanged.
pub fn response(status: u16, headers: Vec<(String, String)>, body: impl Into<Body>) -> Response {
    Response::new(status, headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_headers_are_kept() {
        let res = response(
            200,
            vec![
                ("Set-Cookie".to_string(), "a=1".to_string()),
                ("Set-Cookie".to_string(), "b=2".to_string()),
            ],
            "",
        );
        assert_eq!(res.headers.len(), 2);
        assert_eq!(res.header("set-cookie"), Some("a=1"));
    }

    #[test]
    fn bodies_from_text_and_bytes() {
        let text = Body::from("hello");
        assert_eq!(text.as_text(), Some("hello"));
        assert_eq!(text.len(), 5);

        let bytes = Body::from(vec![0u8, 159, 146, 150]);
        assert_eq!(bytes.as_text(), None);
        assert_eq!(bytes.as_bytes(), &[0u8, 159, 146, 150]);
    }
}
