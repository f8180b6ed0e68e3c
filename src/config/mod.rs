mod pattern_set;

pub use pattern_set::NamedPattern;
pub use pattern_set::PatternSetConfig;
