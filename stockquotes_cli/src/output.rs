use anyhow::Result;
use stockquotes_api::Quote;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to a table.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled)]
struct QuoteRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "Volume")]
    volume: String,
}

fn build_quote_rows(quotes: &[Quote]) -> Vec<QuoteRow> {
    quotes
        .iter()
        .map(|q| QuoteRow {
            date: q.date.to_string(),
            open: format_price(q.open),
            high: format_price(q.high),
            low: format_price(q.low),
            close: format_price(q.close),
            volume: format_volume(q.volume),
        })
        .collect()
}

pub fn print_quotes_table(quotes: &[Quote]) {
    println!("{}", Table::new(build_quote_rows(quotes)));
}

pub fn print_quotes_markdown(quotes: &[Quote]) {
    let mut table = Table::new(build_quote_rows(quotes));
    table.with(Style::markdown());
    println!("{}", table);
}

/// CSV keeps raw numbers so the output can be loaded back without cleanup.
pub fn print_quotes_csv(quotes: &[Quote]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    write_quotes_csv(&mut wtr, quotes)?;
    wtr.flush()?;
    Ok(())
}

fn write_quotes_csv<W: std::io::Write>(wtr: &mut csv::Writer<W>, quotes: &[Quote]) -> Result<()> {
    wtr.write_record(["Date", "Open", "High", "Low", "Close", "Volume"])?;
    for q in quotes {
        wtr.write_record([
            q.date.to_string(),
            q.open.to_string(),
            q.high.to_string(),
            q.low.to_string(),
            q.close.to_string(),
            q.volume.to_string(),
        ])?;
    }
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

/// Groups digits in threes: 1000000 -> "1,000,000".
fn format_volume(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn quotes() -> Vec<Quote> {
        vec![
            Quote {
                date: NaiveDate::from_ymd_opt(2011, 12, 22).unwrap(),
                open: 60.5,
                high: 61.0,
                low: 60.0,
                close: 60.75,
                volume: 1_000_000,
            },
            Quote {
                date: NaiveDate::from_ymd_opt(2011, 12, 21).unwrap(),
                open: 59.95,
                high: 60.7,
                low: 59.8,
                close: 60.4,
                volume: 950,
            },
        ]
    }

    // -- formatting --

    #[test]
    fn test_format_volume_grouping() {
        assert_eq!(format_volume(1_000_000), "1,000,000");
        assert_eq!(format_volume(1_104_500), "1,104,500");
        assert_eq!(format_volume(12_345), "12,345");
    }

    #[test]
    fn test_format_volume_small() {
        assert_eq!(format_volume(950), "950");
        assert_eq!(format_volume(0), "0");
    }

    #[test]
    fn test_format_price_two_decimals() {
        assert_eq!(format_price(60.5), "60.50");
        assert_eq!(format_price(60.756), "60.76");
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::from_name("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_name("CSV"), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_name("md"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_name("whatever"), OutputFormat::Table);
    }

    // -- rows --

    #[test]
    fn test_build_quote_rows_mapping() {
        let rows = build_quote_rows(&quotes());
        assert_eq!(rows.len(), 2);

        let row = &rows[0];
        assert_eq!(row.date, "2011-12-22");
        assert_eq!(row.open, "60.50");
        assert_eq!(row.high, "61.00");
        assert_eq!(row.low, "60.00");
        assert_eq!(row.close, "60.75");
        assert_eq!(row.volume, "1,000,000");
    }

    #[test]
    fn test_build_quote_rows_empty() {
        assert!(build_quote_rows(&[]).is_empty());
    }

    // -- CSV --

    #[test]
    fn test_csv_raw_values() {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_quotes_csv(&mut wtr, &quotes()).unwrap();
        let csv = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Date,Open,High,Low,Close,Volume");
        assert_eq!(lines[1], "2011-12-22,60.5,61,60,60.75,1000000");
        assert_eq!(lines.len(), 3);
    }

    // -- JSON --

    #[test]
    fn test_json_quotes_serializable() {
        let val = serde_json::to_value(quotes()).unwrap();
        assert!(val.is_array());
        assert_eq!(val[0]["date"], "2011-12-22");
        assert_eq!(val[1]["volume"], 950);
    }

    // -- Markdown --

    #[test]
    fn test_markdown_structure() {
        let mut table = Table::new(build_quote_rows(&quotes()));
        table.with(Style::markdown());
        let md = table.to_string();

        assert!(md.contains('|'));
        assert!(md.contains("---"));
        let header_line = md.lines().next().unwrap();
        assert!(header_line.contains("Date"));
        assert!(header_line.contains("Volume"));
    }
}
