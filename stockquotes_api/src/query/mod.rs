mod historical;
pub use self::historical::QuoteQuery;
