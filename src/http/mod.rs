use serde::Deserialize;

pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;
pub mod validator;
pub mod writer;

/// HTTP versions the adapter can speak.
///
/// The highest one accepted is set by
/// [`http_version`](crate::config::ServerConfig::http_version); requests above
/// it, or with any other version, are answered with 505.
#[derive(PartialEq, PartialOrd, Debug, Clone, Copy, Deserialize)]
pub enum HttpVersion {
    V1_0,
    V1_1,
}

impl HttpVersion {
    pub fn from_pair(v: (u8, u8)) -> Option<HttpVersion> {
        match v {
            (1, 0) => Some(HttpVersion::V1_0),
            (1, 1) => Some(HttpVersion::V1_1),
            _ => None,
        }
    }
}

/// Longest method token accepted on the request line.
pub const HTTP_METHOD_MAX_LEN: usize = 16;

/// Whether `s` is a non-empty RFC 9110 token (`tchar`s only).
///
/// Methods are checked with this and otherwise kept verbatim: verb matching in
/// the dispatcher is case-sensitive, so `get` and `GET` are different verbs.
pub fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^'
                        | b'_' | b'`' | b'|' | b'~'
                )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_pairs() {
        assert_eq!(HttpVersion::from_pair((1, 1)), Some(HttpVersion::V1_1));
        assert_eq!(HttpVersion::from_pair((1, 0)), Some(HttpVersion::V1_0));
        assert_eq!(HttpVersion::from_pair((1, 2)), None);
        assert_eq!(HttpVersion::from_pair((2, 0)), None);
        assert_eq!(HttpVersion::from_pair((0, 9)), None);
        assert!(HttpVersion::V1_0 < HttpVersion::V1_1);
    }

    #[test]
    fn method_tokens() {
        assert!(is_token("GET"));
        assert!(is_token("get"));
        assert!(is_token("M-SEARCH"));
        assert!(!is_token(""));
        assert!(!is_token("GE T"));
        assert!(!is_token("GET:"));
    }
}
