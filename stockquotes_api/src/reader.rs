//! Streaming reader over the historical quotes CSV endpoint.

use std::io::{BufRead, Read};
use std::iter::FusedIterator;

use chrono::NaiveDate;
use url::Url;

use crate::{
    dates::CalendarDate,
    query::QuoteQuery,
    transport::{HttpTransport, Transport},
    types::Quote,
    Error,
};

/// Host of the production historical quotes endpoint.
pub const DEFAULT_BASE_URL: &str = "http://www.google.com";

const HISTORICAL_PATH: &str = "/finance/historical";

/// Reads historical daily quotes for one symbol, one line at a time.
///
/// The request is sent lazily by the first [`advance`](Self::advance). Each
/// successful advance replaces the current quote; when the body runs out the
/// stream is released and `advance` returns `Ok(false)`. Calling `advance`
/// again after that sends a fresh request with the current query.
///
/// A line that fails to parse is reported as an error and the stream is left
/// open; call [`release`](Self::release) to drop it.
pub struct QuoteReader<T: Transport = HttpTransport> {
    base_url: String,
    transport: T,
    query: QuoteQuery,
    body: Option<Box<dyn BufRead + Send>>,
    current: Option<Quote>,
    line: String,
    iter_done: bool,
}

impl QuoteReader<HttpTransport> {
    /// Creates a reader against the production endpoint.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a reader against a custom host. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Ok(Self::with_transport(base_url, HttpTransport::new()?))
    }
}

impl<T: Transport> QuoteReader<T> {
    /// Creates a reader that opens its requests through `transport`.
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            query: QuoteQuery::default(),
            body: None,
            current: None,
            line: String::new(),
            iter_done: false,
        }
    }

    /// Replaces the whole query.
    pub fn with_query(mut self, query: QuoteQuery) -> Self {
        self.query = query;
        self
    }

    /// Sets the ticker symbol sent as `q`.
    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.set_symbol(symbol);
        self
    }

    /// Sets the first day of the requested range.
    pub fn with_start_date(mut self, date: impl CalendarDate) -> Self {
        self.set_start_date(date);
        self
    }

    /// Sets the last day of the requested range.
    pub fn with_end_date(mut self, date: impl CalendarDate) -> Self {
        self.set_end_date(date);
        self
    }

    /// Sets the ticker symbol for the next opened request.
    pub fn set_symbol(&mut self, symbol: &str) -> &mut Self {
        self.query.symbol = symbol.to_string();
        self
    }

    /// Sets the start date for the next opened request.
    pub fn set_start_date(&mut self, date: impl CalendarDate) -> &mut Self {
        self.query.start_date = Some(date.calendar_date());
        self
    }

    /// Sets the end date for the next opened request.
    pub fn set_end_date(&mut self, date: impl CalendarDate) -> &mut Self {
        self.query.end_date = Some(date.calendar_date());
        self
    }

    /// Drops the start date so the server picks the range start.
    pub fn clear_start_date(&mut self) -> &mut Self {
        self.query.start_date = None;
        self
    }

    /// Drops the end date so the server picks the range end.
    pub fn clear_end_date(&mut self) -> &mut Self {
        self.query.end_date = None;
        self
    }

    /// The query the next opened request will use.
    pub fn query(&self) -> &QuoteQuery {
        &self.query
    }

    /// Whether a response body is currently held.
    pub fn is_open(&self) -> bool {
        self.body.is_some()
    }

    /// Drops the open response body, if any. Safe to call at any time and
    /// any number of times.
    pub fn release(&mut self) -> &mut Self {
        if self.body.take().is_some() {
            tracing::debug!("Released quote stream for {}", self.query.symbol);
        }
        self
    }

    /// Full request URL for the current query.
    pub fn request_url(&self) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_url, HISTORICAL_PATH).as_str())
            .map_err(|e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::InvalidUrl(e)
            })?;
        Ok(self.query.add_to_url(&url))
    }

    fn open_body(&self) -> Result<Box<dyn BufRead + Send>, Error> {
        let url = self.request_url()?;
        tracing::debug!("Requesting {}", url);
        let resp = self.transport.get(&url)?;

        if !resp.is_success() {
            let status = resp.status;
            let snippet = read_snippet(resp.body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status,
                body: snippet,
            });
        }

        let mut body = resp.body;
        // First line holds the column names.
        let mut header = String::new();
        body.read_line(&mut header).map_err(|e| {
            tracing::error!("Failed to read header line: {}", e);
            Error::Read(e)
        })?;
        tracing::debug!("Skipped header {:?}", header.trim_end());
        Ok(body)
    }

    /// Moves to the next quote, opening the request first if no stream is held.
    ///
    /// Returns `Ok(true)` when a quote was parsed and `Ok(false)` once the body
    /// ends or an empty line is reached. Open and read failures are returned
    /// as is and never retried.
    pub fn advance(&mut self) -> Result<bool, Error> {
        let body = match self.body.take() {
            Some(body) => body,
            None => self.open_body()?,
        };
        let body = self.body.insert(body);

        self.line.clear();
        body.read_line(&mut self.line).map_err(|e| {
            tracing::error!("Failed to read quote line: {}", e);
            Error::Read(e)
        })?;

        let line = self.line.trim_end_matches(&['\r', '\n'][..]);
        if line.is_empty() {
            tracing::debug!("No more quotes for {}", self.query.symbol);
            self.release();
            return Ok(false);
        }

        self.current = Some(Quote::parse_line(line)?);
        Ok(true)
    }

    /// The most recently parsed quote. Stays at the last value after the
    /// stream is exhausted.
    pub fn quote(&self) -> Option<&Quote> {
        self.current.as_ref()
    }

    /// Trading day of the current quote.
    pub fn date(&self) -> Option<NaiveDate> {
        self.current.as_ref().map(|q| q.date)
    }

    /// Opening price of the current quote.
    pub fn open(&self) -> Option<f64> {
        self.current.as_ref().map(|q| q.open)
    }

    /// Daily high of the current quote.
    pub fn high(&self) -> Option<f64> {
        self.current.as_ref().map(|q| q.high)
    }

    /// Daily low of the current quote.
    pub fn low(&self) -> Option<f64> {
        self.current.as_ref().map(|q| q.low)
    }

    /// Closing price of the current quote.
    pub fn close(&self) -> Option<f64> {
        self.current.as_ref().map(|q| q.close)
    }

    /// Shares traded on the day of the current quote.
    pub fn volume(&self) -> Option<u64> {
        self.current.as_ref().map(|q| q.volume)
    }
}

/// Yields each quote until the stream is exhausted.
///
/// The first error is yielded as the last item. Once iteration has ended it
/// stays ended and no further request is sent; a stream left open by a parse
/// error is still held until [`release`](QuoteReader::release).
impl<T: Transport> Iterator for QuoteReader<T> {
    type Item = Result<Quote, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.iter_done {
            return None;
        }
        match self.advance() {
            Ok(true) => self.current.clone().map(Ok),
            Ok(false) => {
                self.iter_done = true;
                None
            }
            Err(e) => {
                self.iter_done = true;
                Some(Err(e))
            }
        }
    }
}

impl<T: Transport> FusedIterator for QuoteReader<T> {}

fn read_snippet(body: Box<dyn BufRead + Send>) -> String {
    const MAX: u64 = 2000;
    let mut bytes = Vec::new();
    if let Err(e) = body.take(MAX).read_to_end(&mut bytes) {
        tracing::debug!("Failed to read error body: {}", e);
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
