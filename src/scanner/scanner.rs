use crate::error_handling::PatternError;

const WILDCARD: char = '.';
const CHARSET_OPEN: char = '[';
const CHARSET_CLOSE: char = ']';
const STAR: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Literal(char),
    Wildcard,
    CharSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    Exactly1,
    ZeroOrMore,
}

/// One atom as seen by the scanner. `length` counts the `char`s consumed from
/// the pattern, including brackets and a trailing `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenDescription {
    pub token_type: TokenType,
    pub repetition: Repetition,
    pub length: usize,
}

/// Classifies the atom starting at `pos`.
///
/// # Panics
///
/// Panics if `pos` is not inside `pattern`. [`Scanner`] never calls it past the
/// end.
pub fn scan_token(pattern: &[char], pos: usize) -> Result<TokenDescription, PatternError> {
    assert!(pos < pattern.len());

    let (token_type, mut length) = match pattern[pos] {
        WILDCARD => (TokenType::Wildcard, 1),
        CHARSET_OPEN => {
            let close_offset = pattern[pos..]
                .iter()
                .position(|&c| c == CHARSET_CLOSE)
                .ok_or(PatternError::UnterminatedCharSet(pos))?;
            if 1 == close_offset {
                return Err(PatternError::EmptyCharSet(pos));
            }
            (TokenType::CharSet, close_offset + 1)
        }
        c => (TokenType::Literal(c), 1),
    };

    let repetition = match pattern.get(pos + length) {
        Some(&STAR) => {
            length += 1;
            Repetition::ZeroOrMore
        }
        _ => Repetition::Exactly1,
    };

    Ok(TokenDescription {
        token_type,
        repetition,
        length,
    })
}

/// Walks a pattern atom by atom, yielding each atom's start offset with its
/// description. Iteration ends after the first error.
pub struct Scanner<'a> {
    pattern: &'a [char],
    pos: usize,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(pattern: &'a [char]) -> Self {
        Self {
            pattern,
            pos: 0,
            failed: false,
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<(usize, TokenDescription), PatternError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.pattern.len() {
            return None;
        }
        match scan_token(self.pattern, self.pos) {
            Ok(description) => {
                let start = self.pos;
                self.pos += description.length;
                Some(Ok((start, description)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
