//! The `history` subcommand: stream daily quotes for a symbol over a date range.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;
use stockquotes_api::dates;
use stockquotes_api::{HttpTransport, Quote, QuoteReader, Transport};

use crate::config::Config;
use crate::output::{
    print_json, print_quotes_csv, print_quotes_markdown, print_quotes_table, OutputFormat,
};
use crate::validation::{validate_date, validate_range, validate_symbol};

#[derive(Args)]
pub struct HistoryArgs {
    /// Ticker symbol (e.g. tr, NYSE:TR)
    #[arg(long)]
    pub symbol: String,

    /// First trading day to include (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Last trading day to include (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Quotes from the last N days up to today
    #[arg(long, conflicts_with_all = ["weeks", "months", "years", "ytd"])]
    pub days: Option<i64>,

    /// Quotes from the last N weeks up to today
    #[arg(long, conflicts_with_all = ["months", "years", "ytd"])]
    pub weeks: Option<i64>,

    /// Quotes from the last N months up to today
    #[arg(long, conflicts_with_all = ["years", "ytd"])]
    pub months: Option<i64>,

    /// Quotes from the last N years up to today
    #[arg(long, conflicts_with = "ytd")]
    pub years: Option<i64>,

    /// Quotes since January 1st of the current year
    #[arg(long)]
    pub ytd: bool,

    /// Stop after this many quotes
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run(args: &HistoryArgs, config: &Config, format: &OutputFormat) -> Result<()> {
    let symbol = validate_symbol(&args.symbol)?;
    let (start, end) = resolve_range(args, dates::today())?;

    let transport = HttpTransport::with_timeout(config.timeout)?;
    let mut reader = QuoteReader::with_transport(&config.base_url, transport).with_symbol(&symbol);
    if let Some(start) = start {
        reader.set_start_date(start);
    }
    if let Some(end) = end {
        reader.set_end_date(end);
    }

    let quotes = collect_quotes(&mut reader, args.limit)
        .with_context(|| format!("failed to fetch quotes for {}", symbol))?;

    eprintln!("{} quotes for {}", quotes.len(), symbol);

    match format {
        OutputFormat::Table => print_quotes_table(&quotes),
        OutputFormat::Json => print_json(&quotes),
        OutputFormat::Csv => print_quotes_csv(&quotes)?,
        OutputFormat::Markdown => print_quotes_markdown(&quotes),
    }

    Ok(())
}

/// Resolves the requested range against `today`. Explicit `--start`/`--end`
/// win over a relative range; a relative range ends today.
fn resolve_range(
    args: &HistoryArgs,
    today: NaiveDate,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    let relative_start = if let Some(n) = args.days {
        Some(dates::add_days(-positive("days", n)?, today))
    } else if let Some(n) = args.weeks {
        Some(dates::add_weeks(-positive("weeks", n)?, today))
    } else if let Some(n) = args.months {
        Some(dates::add_months(-positive("months", n)?, today))
    } else if let Some(n) = args.years {
        Some(dates::add_years(-positive("years", n)?, today))
    } else if args.ytd {
        Some(dates::start_of_year(today))
    } else {
        None
    };

    let start = match &args.start {
        Some(s) => Some(validate_date(s)?),
        None => relative_start,
    };
    let end = match &args.end {
        Some(s) => Some(validate_date(s)?),
        None => relative_start.map(|_| today),
    };

    validate_range(start, end)?;
    Ok((start, end))
}

fn positive(name: &str, n: i64) -> Result<i64> {
    if n < 1 {
        bail!("--{} must be at least 1, got {}", name, n);
    }
    Ok(n)
}

/// Drains the reader, stopping early after `limit` quotes. The reader is
/// released on every exit path.
fn collect_quotes<T: Transport>(
    reader: &mut QuoteReader<T>,
    limit: Option<usize>,
) -> Result<Vec<Quote>> {
    let mut quotes = Vec::new();
    loop {
        if limit.is_some_and(|limit| quotes.len() >= limit) {
            tracing::debug!("Stopping after {} quotes", quotes.len());
            break;
        }
        match reader.advance() {
            Ok(true) => {
                if let Some(quote) = reader.quote() {
                    quotes.push(quote.clone());
                }
            }
            Ok(false) => break,
            Err(e) => {
                reader.release();
                return Err(e.into());
            }
        }
    }
    reader.release();
    Ok(quotes)
}
