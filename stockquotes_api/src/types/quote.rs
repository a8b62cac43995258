use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{dates::parse_quote_date, Error, Field};

/// Number of columns in a quote line: date, open, high, low, close, volume.
pub const QUOTE_COLUMNS: usize = 6;

/// One day of historical trading data for a symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Quote {
    /// Parses one CSV line of the historical response.
    ///
    /// Columns are positional, not header driven. The line must hold exactly
    /// six comma-separated columns; surrounding whitespace in a column is
    /// ignored. Nothing is returned for a line with any bad column.
    pub fn parse_line(line: &str) -> Result<Quote, Error> {
        let columns: Vec<&str> = line.split(',').map(str::trim).collect();
        if columns.len() != QUOTE_COLUMNS {
            return Err(Error::ColumnCount {
                found: columns.len(),
                line: line.to_string(),
            });
        }

        let date = parse_quote_date(columns[0]).map_err(|e| {
            tracing::error!("Failed to parse quote date {:?}: {}", columns[0], e);
            malformed(Field::Date, columns[0])
        })?;

        Ok(Quote {
            date,
            open: parse_column(Field::Open, columns[1])?,
            high: parse_column(Field::High, columns[2])?,
            low: parse_column(Field::Low, columns[3])?,
            close: parse_column(Field::Close, columns[4])?,
            volume: parse_column(Field::Volume, columns[5])?,
        })
    }
}

fn parse_column<T>(field: Field, text: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.parse::<T>().map_err(|e| {
        tracing::error!("Failed to parse quote {} {:?}: {}", field, text, e);
        malformed(field, text)
    })
}

fn malformed(field: Field, text: &str) -> Error {
    Error::MalformedField {
        field,
        value: text.to_string(),
    }
}
