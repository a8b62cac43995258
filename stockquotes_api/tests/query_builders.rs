use chrono::NaiveDate;
use stockquotes_api::QuoteQuery;
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/finance/historical").unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[test]
fn symbol_only() {
    let url = QuoteQuery::new("tr").add_to_url(&base_url());
    assert_eq!(url.query(), Some("q=tr&output=csv"));
}

#[test]
fn start_and_end_dates() {
    let url = QuoteQuery::new("tr")
        .with_start_date(date(2011, 12, 22))
        .with_end_date(date(2011, 12, 22))
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("startdate=Dec+22%2C+2011"));
    assert!(query.contains("enddate=Dec+22%2C+2011"));
    assert!(query.contains("output=csv"));
}

#[test]
fn dates_decode_to_month_day_year() {
    let url = QuoteQuery::new("tr")
        .with_start_date(date(2012, 1, 5))
        .add_to_url(&base_url());
    assert_eq!(
        pairs(&url),
        vec![
            ("q".to_string(), "tr".to_string()),
            ("startdate".to_string(), "Jan 5, 2012".to_string()),
            ("output".to_string(), "csv".to_string()),
        ]
    );
}

#[test]
fn end_date_without_start_date() {
    let url = QuoteQuery::new("tr")
        .with_end_date(date(2011, 12, 31))
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(!query.contains("startdate"));
    assert!(query.contains("enddate=Dec+31%2C+2011"));
}

#[test]
fn symbol_is_form_encoded() {
    let url = QuoteQuery::new("NYSE:TR&x").add_to_url(&base_url());
    assert_eq!(url.query(), Some("q=NYSE%3ATR%26x&output=csv"));
    assert_eq!(pairs(&url)[0].1, "NYSE:TR&x");
}

#[test]
fn accepts_points_in_time() {
    let at = date(2011, 12, 22).and_hms_opt(18, 45, 0).unwrap();
    let query = QuoteQuery::new("tr").with_start_date(at);
    assert_eq!(query.start_date, Some(date(2011, 12, 22)));
}

#[test]
fn existing_query_is_preserved() {
    let base = Url::parse("https://example.com/finance/historical?hl=en").unwrap();
    let url = QuoteQuery::new("tr").add_to_url(&base);
    assert_eq!(url.query(), Some("hl=en&q=tr&output=csv"));
}
