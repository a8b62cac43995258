pub mod dates;
mod errors;
mod query;
mod reader;
pub mod transport;
pub mod types;
mod user_agent;
pub use self::errors::{Error, Field};
pub use self::query::QuoteQuery;
pub use self::reader::{QuoteReader, DEFAULT_BASE_URL};
pub use self::transport::{HttpTransport, Transport, TransportResponse};
pub use self::types::Quote;
