//! Fetch error type.

use std::io;

/// Error returned by a single HTTP GET (curl failure, HTTP error, or storage failure).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, bad URL, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// 2xx response without a body.
    #[error("empty response body")]
    EmptyBody,
    /// Writing or renaming the downloaded file failed.
    #[error("storage: {0}")]
    Storage(#[source] io::Error),
}

impl FetchError {
    /// True if curl gave up because a configured timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Curl(e) if e.is_operation_timedout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http_status() {
        assert_eq!(FetchError::Http(404).to_string(), "HTTP 404");
        assert!(!FetchError::Http(504).is_timeout());
    }

    #[test]
    fn empty_body_is_not_a_timeout() {
        assert_eq!(FetchError::EmptyBody.to_string(), "empty response body");
        assert!(!FetchError::EmptyBody.is_timeout());
    }

    #[test]
    fn display_storage() {
        let e = FetchError::Storage(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert_eq!(e.to_string(), "storage: disk full");
    }
}
