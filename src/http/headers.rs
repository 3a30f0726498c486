//! HTTP headers abstraction for [`Request`](crate::http::request::Request)
//!
//! Headers are stored in an ordered map to preserve insertion order.
//! Names are matched case-insensitively: the map is keyed by the lowercased
//! name while the name as first received is kept for display.
//! Repeated headers are folded into one comma-separated value.
//!
//! This abstraction does not enforce any HTTP semantics. Routing never looks
//! at request headers; they are only consulted by the
//! [`validator`](crate::http::validator) and by application handlers.
//!
//! Response headers are not stored here: a
//! [`Response`](crate::http::response::Response) keeps a plain ordered list of
//! pairs so that duplicates pass through untouched.

use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpHeaders {
    headers: IndexMap<String, (String, String)>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self {
            headers: IndexMap::new(),
        }
    }

    /// Inserts a header, appending to the existing value if the name is
    /// already present.
    pub fn append(&mut self, name: &str, value: &str) {
        let key = name.to_ascii_lowercase();
        match self.headers.get_mut(&key) {
            Some((_, existing)) => {
                existing.push_str(", ");
                existing.push_str(value);
            }
            None => {
                self.headers
                    .insert(key, (name.to_string(), value.to_string()));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let mut headers = HttpHeaders::new();
        headers.append("Content-Length", "12");
        assert_eq!(headers.get("content-length"), Some("12"));
        assert_eq!(headers.get("CONTENT-LENGTH"), Some("12"));
        assert!(headers.get("Host").is_none());
    }

    #[test]
    fn append_folds_repeated_names() {
        let mut headers = HttpHeaders::new();
        headers.append("Accept", "text/html");
        headers.append("accept", "application/json");
        assert_eq!(headers.iter().count(), 1);
        assert_eq!(headers.get("Accept"), Some("text/html, application/json"));
        assert_eq!(headers.iter().next(), Some(("Accept", "text/html, application/json")));
    }
}
