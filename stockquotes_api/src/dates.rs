//! Calendar helpers for building quote date ranges.
//!
//! All helpers work on Gregorian calendar dates. "Now" is taken from the local
//! time zone. Arithmetic never fails: results that leave chrono's representable
//! range saturate at [`NaiveDate::MIN`] / [`NaiveDate::MAX`].

use chrono::format::Parsed;
use chrono::{
    DateTime, Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, ParseError, TimeZone,
};

/// Date format used by the `startdate` / `enddate` query parameters ("Dec 22, 2011").
const QUERY_DATE_FORMAT: &str = "%b %-d, %Y";

/// Date format of the first column of the CSV response ("22-Dec-11").
const QUOTE_DATE_FORMAT: &str = "%d-%b-%y";

/// How far past today a two-digit year may land.
const TWO_DIGIT_YEAR_LEAD: i64 = 20;

/// Anything that can be reduced to a calendar date.
///
/// Lets the helpers accept plain dates as well as points in time. A
/// `DateTime` is reduced to its date in its own time zone.
pub trait CalendarDate {
    fn calendar_date(&self) -> NaiveDate;
}

impl CalendarDate for NaiveDate {
    fn calendar_date(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDate for NaiveDateTime {
    fn calendar_date(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDate for DateTime<Tz> {
    fn calendar_date(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// Today's local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Yesterday's local date.
pub fn yesterday() -> NaiveDate {
    add_days(-1, today())
}

/// Adds `days` (may be negative) to `from`.
pub fn add_days(days: i64, from: impl CalendarDate) -> NaiveDate {
    let from = from.calendar_date();
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        from.checked_add_days(step)
    } else {
        from.checked_sub_days(step)
    };
    shifted.unwrap_or(if days >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Adds `weeks` (may be negative) to `from`, in steps of seven days.
pub fn add_weeks(weeks: i64, from: impl CalendarDate) -> NaiveDate {
    add_days(weeks.saturating_mul(7), from)
}

/// Adds `months` (may be negative) to `from`.
///
/// The month carries into the year. When the day does not exist in the target
/// month it is pinned to that month's last day, so Jan 31 + 1 month is Feb 28
/// (or Feb 29 in a leap year).
pub fn add_months(months: i64, from: impl CalendarDate) -> NaiveDate {
    let from = from.calendar_date();
    let shifted = u32::try_from(months.unsigned_abs())
        .ok()
        .and_then(|step| {
            if months >= 0 {
                from.checked_add_months(Months::new(step))
            } else {
                from.checked_sub_months(Months::new(step))
            }
        });
    shifted.unwrap_or(if months >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Adds `years` (may be negative) to `from`. Feb 29 lands on Feb 28 in a
/// non-leap target year.
pub fn add_years(years: i64, from: impl CalendarDate) -> NaiveDate {
    add_months(years.saturating_mul(12), from)
}

/// January 1st of the current year.
pub fn year_start() -> NaiveDate {
    start_of_year(today())
}

/// December 31st of the current year.
pub fn year_end() -> NaiveDate {
    end_of_year(today())
}

/// January 1st of the year containing `date`.
pub fn start_of_year(date: impl CalendarDate) -> NaiveDate {
    let date = date.calendar_date();
    // Ordinal 1 exists in every year.
    date.with_ordinal(1).unwrap_or(date)
}

/// December 31st of the year containing `date`.
pub fn end_of_year(date: impl CalendarDate) -> NaiveDate {
    add_days(-1, add_years(1, start_of_year(date)))
}

/// Renders a date the way the historical endpoint expects it in a query
/// parameter, before form encoding: `Dec 22, 2011`.
pub fn format_query_date(date: impl CalendarDate) -> String {
    date.calendar_date().format(QUERY_DATE_FORMAT).to_string()
}

/// Parses the `D-Mon-YY` date column of a quote line (`22-Dec-11`).
///
/// The two-digit year resolves to the latest matching year that puts the date
/// less than 20 years after today, so `5-Jan-65` is 1965.
pub fn parse_quote_date(text: &str) -> Result<NaiveDate, ParseError> {
    parse_quote_date_from(text, today())
}

fn parse_quote_date_from(text: &str, today: NaiveDate) -> Result<NaiveDate, ParseError> {
    // chrono fixes the century itself; only the last two digits are kept.
    let parsed = NaiveDate::parse_from_str(text, QUOTE_DATE_FORMAT)?;
    let limit = add_years(TWO_DIGIT_YEAR_LEAD, today);

    let yy = parsed.year().rem_euclid(100);
    let mut year = limit.year() - (limit.year() - yy).rem_euclid(100);
    if year == limit.year() && (parsed.month(), parsed.day()) >= (limit.month(), limit.day()) {
        year -= 100;
    }

    let mut resolved = Parsed::new();
    resolved.set_year(i64::from(year))?;
    resolved.set_month(i64::from(parsed.month()))?;
    resolved.set_day(i64::from(parsed.day()))?;
    resolved.to_naive_date()
}
