mod engine;

pub use engine::matches;
pub use engine::matches_str;
pub use engine::try_matches;
pub use engine::SearchLimits;
