use std::fmt::{Display, Formatter};

/// Errors raised while compiling a pattern. Positions are `char` offsets of the
/// opening `[` in the pattern text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    UnterminatedCharSet(usize),
    EmptyCharSet(usize),
}

#[derive(Debug)]
pub enum Error {
    PatternError(PatternError),
    SearchBudgetExceeded(usize),
    YamlParsingError(serde_yaml::Error),
    IOError(std::io::Error),
    MissingConfigKey(&'static str),
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<PatternError> for Error {
    fn from(e: PatternError) -> Self {
        Error::PatternError(e)
    }
}

impl Display for PatternError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternError::UnterminatedCharSet(pos) => {
                write!(f, "character set opened at {} is never closed", pos)
            }
            PatternError::EmptyCharSet(pos) => {
                write!(f, "character set at {} has no members", pos)
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::PatternError(e) => write!(f, "invalid pattern: {}", e),
            Error::SearchBudgetExceeded(limit) => {
                write!(f, "search gave up after exploring {} states", limit)
            }
            Error::YamlParsingError(e) => write!(f, "yaml: {}", e),
            Error::IOError(e) => write!(f, "io: {}", e),
            Error::MissingConfigKey(key) => write!(f, "missing config key `{}`", key),
            Error::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for PatternError {}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::PatternError(e) => Some(e),
            Error::YamlParsingError(e) => Some(e),
            Error::IOError(e) => Some(e),
            _ => None,
        }
    }
}
