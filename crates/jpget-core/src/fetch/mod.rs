//! Blocking HTTP GET into a file.
//!
//! The body is staged in `<dest>.part` and renamed into place only after a
//! non-empty 2xx response, so `dest` never holds an error page or an empty
//! or truncated body.

mod error;

pub use error::FetchError;

use crate::layout::temp_path;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

/// Per-request curl limits. Timeouts surface as [`FetchError::Curl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    /// Upper bound for the whole transfer.
    pub timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(600),
        }
    }
}

/// GETs `url` into `dest`, replacing any existing file. Follows redirects.
/// Returns the number of bytes written. The parent directory of `dest` must exist.
pub fn fetch_to_file(url: &str, dest: &Path, opts: &HttpOptions) -> Result<u64, FetchError> {
    let staging = temp_path(dest);
    let result = transfer(url, &staging, opts).and_then(|written| {
        fs::rename(&staging, dest).map_err(FetchError::Storage)?;
        Ok(written)
    });
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn transfer(url: &str, staging: &Path, opts: &HttpOptions) -> Result<u64, FetchError> {
    let mut file = File::create(staging).map_err(FetchError::Storage)?;
    let mut written = 0u64;
    let mut write_error: Option<io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };
    if let Some(e) = write_error {
        return Err(FetchError::Storage(e));
    }
    performed?;

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    if written == 0 {
        return Err(FetchError::EmptyBody);
    }
    file.sync_all().map_err(FetchError::Storage)?;
    Ok(written)
}
