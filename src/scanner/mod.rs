mod scanner;

#[cfg(feature = "scanner-internals")]
pub use scanner::scan_token;
pub use scanner::Repetition;
pub use scanner::Scanner;
pub use scanner::TokenDescription;
pub use scanner::TokenType;
