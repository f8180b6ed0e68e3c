mod error;

pub use error::Error;
pub use error::PatternError;
pub use error::Result;
