//! Parameters of a historical quote request and their URL encoding.

use chrono::NaiveDate;
use url::Url;

use crate::dates::{format_query_date, CalendarDate};

/// Symbol and optional date range of a historical quote request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteQuery {
    /// Ticker symbol, sent as-is (form encoded).
    pub symbol: String,
    /// First trading day to include.
    pub start_date: Option<NaiveDate>,
    /// Last trading day to include.
    pub end_date: Option<NaiveDate>,
}

impl QuoteQuery {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            ..Self::default()
        }
    }

    pub fn with_start_date(mut self, date: impl CalendarDate) -> Self {
        self.start_date = Some(date.calendar_date());
        self
    }

    pub fn with_end_date(mut self, date: impl CalendarDate) -> Self {
        self.end_date = Some(date.calendar_date());
        self
    }

    /// Appends `q`, the optional `startdate`/`enddate` bounds and `output=csv`
    /// to the given URL, returning the modified URL.
    ///
    /// Dates are sent as "Dec 22, 2011", which form-encodes to `Dec+22%2C+2011`.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut().append_pair("q", &self.symbol);
        if let Some(start_date) = self.start_date {
            url.query_pairs_mut()
                .append_pair("startdate", &format_query_date(start_date));
        };
        if let Some(end_date) = self.end_date {
            url.query_pairs_mut()
                .append_pair("enddate", &format_query_date(end_date));
        };
        url.query_pairs_mut().append_pair("output", "csv");
        url
    }
}
