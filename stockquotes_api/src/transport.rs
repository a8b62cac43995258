//! HTTP collaborator used by [`QuoteReader`](crate::QuoteReader) to open a
//! response body.

use std::io::BufRead;
use std::io::BufReader;
use std::time::Duration;

use url::Url;

use crate::{user_agent::get_user_agent, Error};

/// Default request timeout for [`HttpTransport`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Status line and line-buffered body of an opened request.
pub struct TransportResponse {
    pub status: u16,
    pub body: Box<dyn BufRead + Send>,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Opens GET requests. The reader only ever calls [`Transport::get`] when it
/// holds no open body.
pub trait Transport {
    fn get(&self, url: &Url) -> Result<TransportResponse, Error>;
}

/// Blocking `reqwest` transport with a browser-like user agent.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Creates a transport with the default 30-second timeout.
    pub fn new() -> Result<Self, Error> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a transport whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(get_user_agent())
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::ClientBuild(e)
            })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<TransportResponse, Error> {
        let resp = self
            .client
            .get(url.clone())
            .header("accept", "text/csv, text/plain, */*")
            .header("accept-language", "en-US,en;q=0.9")
            .send()
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::Connection(e)
            })?;
        Ok(TransportResponse {
            status: resp.status().as_u16(),
            body: Box::new(BufReader::new(resp)),
        })
    }
}
