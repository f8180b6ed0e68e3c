mod compiler;

pub use compiler::compile;
pub use compiler::CharSet;
pub use compiler::CompiledToken;
pub use compiler::Pattern;
pub use compiler::TokenKind;
pub use crate::scanner::Repetition;
