pub mod compiler;
pub mod config;
pub mod engine;
pub mod error_handling;

#[cfg(feature = "scanner-internals")]
pub mod scanner;
#[cfg(not(feature = "scanner-internals"))]
mod scanner;

pub use compiler::{compile, Pattern};
pub use engine::{matches, matches_str, try_matches, SearchLimits};

const VERSION: &str = "0.0.1";

pub fn version() -> &'static str {
    VERSION
}
