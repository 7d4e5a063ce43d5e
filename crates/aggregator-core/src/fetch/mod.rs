//! HTTP GET of one page.
//!
//! Uses the curl crate (libcurl) with a blocking `Easy` handle per URL. The
//! body is collected in memory and decoded as UTF-8.

mod error;

pub use error::FetchError;

use crate::config::FetchConfig;

/// Source of page text, keyed by URL.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`Fetch`] backed by libcurl. Follows redirects up to the configured limit.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    cfg: FetchConfig,
}

impl CurlFetcher {
    pub fn new(cfg: FetchConfig) -> Self {
        Self { cfg }
    }

    /// Performs the GET and returns the raw body bytes.
    ///
    /// Non-HTTP schemes supported by libcurl (e.g. `file://`) report status 0
    /// and are accepted as-is.
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.cfg.max_redirections)?;
        easy.connect_timeout(self.cfg.connect_timeout())?;
        easy.timeout(self.cfg.timeout())?;
        easy.useragent(&self.cfg.user_agent)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if code != 0 && !(200..300).contains(&code) {
            return Err(FetchError::Status(code));
        }

        tracing::debug!(url, code, bytes = body.len(), "fetched page");
        Ok(body)
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let body = self.get_bytes(url)?;
        Ok(String::from_utf8(body)?)
    }
}
