//! Per-URL fetch error type.

use std::string::FromUtf8Error;

/// Why a page could not be turned into text. Never fatal to a run: the driver
/// reports it and moves on to the next URL.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl could not perform the GET (bad URL, DNS, connect, timeout, ...).
    #[error("{0}")]
    Open(#[from] curl::Error),
    /// Server answered with a non-2xx status.
    #[error("HTTP Error {0}")]
    Status(u32),
    /// Body is not valid UTF-8.
    #[error("{0}")]
    Decode(#[from] FromUtf8Error),
}

impl FetchError {
    /// True when the page was received but could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode(_))
    }

    /// Console wording for this failure: open vs decode.
    pub fn action(&self) -> &'static str {
        if self.is_decode() {
            "Error decoding url"
        } else {
            "Error opening url"
        }
    }
}
