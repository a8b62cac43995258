use anyhow::{bail, Result};
use chrono::NaiveDate;

pub const MAX_SYMBOL_LENGTH: usize = 32;

/// Validate a ticker symbol: trim, reject whitespace/control chars, enforce a
/// byte-length limit. Exchange prefixes such as `NYSE:TR` are allowed.
pub fn validate_symbol(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("symbol must not be empty");
    }
    if trimmed.len() > MAX_SYMBOL_LENGTH {
        bail!(
            "symbol exceeds maximum length of {} bytes",
            MAX_SYMBOL_LENGTH
        );
    }
    if trimmed.chars().any(|c| c.is_control() || c.is_whitespace()) {
        bail!(
            "symbol '{}' contains whitespace or control characters",
            trimmed.escape_debug()
        );
    }
    Ok(trimmed.to_string())
}

/// Validate a YYYY-MM-DD date string.
pub fn validate_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => bail!(
            "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2011-12-22)",
            trimmed
        ),
    }
}

/// Reject a range whose start falls after its end.
pub fn validate_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            bail!("start date {} is after end date {}", start, end);
        }
    }
    Ok(())
}
