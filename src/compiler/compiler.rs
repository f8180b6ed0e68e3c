use crate::error_handling::{Error, Result};
use crate::scanner::{Repetition, Scanner, TokenDescription, TokenType};
use log::debug;
use std::fmt::Debug;
use std::str::FromStr;

/// Sorted, de-duplicated, non-empty set of accepted characters.
#[derive(Clone, PartialEq, Eq)]
pub struct CharSet {
    members: Vec<char>,
}

impl CharSet {
    fn from_members(members: &[char]) -> Self {
        let mut members = members.to_vec();
        members.sort_unstable();
        members.dedup();
        Self { members }
    }

    pub fn contains(&self, c: char) -> bool {
        self.members.binary_search(&c).is_ok()
    }

    pub fn members(&self) -> &[char] {
        &self.members
    }
}

impl Debug for CharSet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{}]", self.members.iter().collect::<String>())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Literal(char),
    Wildcard,
    CharSet(CharSet),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledToken {
    kind: TokenKind,
    repetition: Repetition,
}

impl CompiledToken {
    fn new(description: &TokenDescription, source: &[char]) -> Self {
        let kind = match description.token_type {
            TokenType::Literal(c) => TokenKind::Literal(c),
            TokenType::Wildcard => TokenKind::Wildcard,
            TokenType::CharSet => {
                // Members sit between the brackets; a trailing `*` is outside them.
                let close = match description.repetition {
                    Repetition::Exactly1 => description.length - 1,
                    Repetition::ZeroOrMore => description.length - 2,
                };
                TokenKind::CharSet(CharSet::from_members(&source[1..close]))
            }
        };
        Self {
            kind,
            repetition: description.repetition,
        }
    }

    pub fn get_kind(&self) -> &TokenKind {
        &self.kind
    }

    pub fn get_repetition(&self) -> Repetition {
        self.repetition
    }

    pub fn accepts(&self, c: char) -> bool {
        match &self.kind {
            TokenKind::Literal(value) => *value == c,
            TokenKind::Wildcard => true,
            TokenKind::CharSet(set) => set.contains(c),
        }
    }

    /// Whether the search may move on to the next token after `times_matched`
    /// consecutive acceptances of this one.
    pub fn may_advance(&self, times_matched: usize) -> bool {
        match self.repetition {
            Repetition::Exactly1 => times_matched >= 1,
            Repetition::ZeroOrMore => true,
        }
    }

    /// Whether this token must not consume another character.
    pub fn is_exhausted(&self, times_matched: usize) -> bool {
        match self.repetition {
            Repetition::Exactly1 => times_matched >= 1,
            Repetition::ZeroOrMore => false,
        }
    }

    pub fn is_optional(&self) -> bool {
        Repetition::ZeroOrMore == self.repetition
    }
}

/// An immutable compiled pattern. Token order is the left-to-right order of the
/// atoms in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<CompiledToken>,
}

impl Pattern {
    pub fn get_source(&self) -> &str {
        &self.source
    }

    pub fn get_tokens(&self) -> &[CompiledToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True iff the empty string matches, i.e. every token is zero-or-more.
    pub fn accepts_empty(&self) -> bool {
        self.tokens.iter().all(CompiledToken::is_optional)
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        compile(s)
    }
}

pub fn compile(pattern: &str) -> Result<Pattern> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens: Vec<CompiledToken> = Vec::new();
    for scanned in Scanner::new(&chars) {
        let (start, description) = scanned?;
        let source = &chars[start..start + description.length];
        tokens.push(CompiledToken::new(&description, source));
    }
    debug!("Compiled pattern {:?} into {} tokens", pattern, tokens.len());

    Ok(Pattern {
        source: pattern.to_string(),
        tokens,
    })
}
