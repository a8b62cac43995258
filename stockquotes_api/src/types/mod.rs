mod quote;
pub use self::quote::*;
