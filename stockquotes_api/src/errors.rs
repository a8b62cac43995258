//! Error types for the quote reader.

use std::fmt;

/// Errors that can occur while requesting or parsing historical quotes.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The configured base URL could not be parsed.
    #[error("Invalid endpoint URL")]
    InvalidUrl(#[from] url::ParseError),
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
    /// The request could not be sent or completed (DNS, connect, TLS, timeout).
    #[error("Request failed")]
    Connection(#[source] reqwest::Error),
    /// The endpoint returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// A column of a quote line could not be parsed.
    #[error("Malformed {field} field: {value:?}")]
    MalformedField { field: Field, value: String },
    /// A quote line did not have exactly six columns.
    #[error("Expected 6 columns, found {found}: {line:?}")]
    ColumnCount { found: usize, line: String },
    /// Reading the response body failed mid-stream.
    #[error("Failed to read response")]
    Read(#[from] std::io::Error),
}

/// Positional columns of a quote line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Date,
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Date => "date",
            Field::Open => "open",
            Field::High => "high",
            Field::Low => "low",
            Field::Close => "close",
            Field::Volume => "volume",
        };
        f.write_str(name)
    }
}
