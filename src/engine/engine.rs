use crate::compiler::{compile, Pattern};
use crate::error_handling::Error::SearchBudgetExceeded;
use crate::error_handling::Result;
use log::{trace, warn};
use std::collections::{HashSet, VecDeque};

/// Bounds on a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of frontier states to examine. `None` means unbounded.
    pub max_states: Option<usize>,
}

impl SearchLimits {
    pub const UNBOUNDED: SearchLimits = SearchLimits { max_states: None };

    pub fn with_max_states(max_states: usize) -> Self {
        Self {
            max_states: Some(max_states),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FrontierState {
    text_pos: usize,
    pattern_pos: usize,
    times_matched: usize,
}

impl FrontierState {
    fn start() -> Self {
        Self {
            text_pos: 0,
            pattern_pos: 0,
            times_matched: 0,
        }
    }

    fn advance_token(&self) -> Self {
        Self {
            text_pos: self.text_pos,
            pattern_pos: self.pattern_pos + 1,
            times_matched: 0,
        }
    }

    fn consume_char(&self) -> Self {
        Self {
            text_pos: self.text_pos + 1,
            pattern_pos: self.pattern_pos,
            times_matched: self.times_matched + 1,
        }
    }

    // Neither counting predicate looks past the first acceptance, so
    // states that differ only in larger counts have identical futures.
    fn dedup_key(&self) -> (usize, usize, bool) {
        (self.text_pos, self.pattern_pos, self.times_matched > 0)
    }
}

struct Frontier {
    queue: VecDeque<FrontierState>,
    visited: HashSet<(usize, usize, bool)>,
}

impl Frontier {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
        }
    }

    fn push(&mut self, state: FrontierState) {
        if self.visited.insert(state.dedup_key()) {
            self.queue.push_back(state);
        }
    }

    fn pop(&mut self) -> Option<FrontierState> {
        self.queue.pop_front()
    }
}

/// Decides whether `pattern` consumes the whole of `text`.
pub fn matches(text: &str, pattern: &Pattern) -> bool {
    match try_matches(text, pattern, &SearchLimits::UNBOUNDED) {
        Ok(matched) => matched,
        Err(_) => unreachable!("an unbounded search cannot exceed its budget"),
    }
}

/// Compiles `pattern` and matches `text` against it.
pub fn matches_str(text: &str, pattern: &str) -> Result<bool> {
    let compiled = compile(pattern)?;
    Ok(matches(text, &compiled))
}

/// Same as [`matches`], but gives up with `SearchBudgetExceeded` once more than
/// `limits.max_states` states have been examined.
pub fn try_matches(text: &str, pattern: &Pattern, limits: &SearchLimits) -> Result<bool> {
    let text: Vec<char> = text.chars().collect();
    let tokens = pattern.get_tokens();

    let mut frontier = Frontier::new();
    frontier.push(FrontierState::start());
    let mut states_explored = 0usize;

    while let Some(state) = frontier.pop() {
        if let Some(max_states) = limits.max_states {
            if states_explored >= max_states {
                warn!(
                    "Search for {:?} stopped after {} states",
                    pattern.get_source(),
                    states_explored
                );
                return Err(SearchBudgetExceeded(max_states));
            }
        }
        states_explored += 1;

        if state.text_pos == text.len() && state.pattern_pos == tokens.len() {
            trace!("Matched after exploring {} states", states_explored);
            return Ok(true);
        }
        if state.pattern_pos == tokens.len() {
            continue;
        }

        let token = &tokens[state.pattern_pos];
        if token.may_advance(state.times_matched) {
            frontier.push(state.advance_token());
        }
        if token.is_exhausted(state.times_matched) {
            continue;
        }
        if state.text_pos < text.len() && token.accepts(text[state.text_pos]) {
            frontier.push(state.consume_char());
        }
    }

    trace!("No match after exploring {} states", states_explored);
    Ok(false)
}

impl Pattern {
    pub fn matches(&self, text: &str) -> bool {
        matches(text, self)
    }

    pub fn try_matches(&self, text: &str, limits: &SearchLimits) -> Result<bool> {
        try_matches(text, self, limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::Error;

    #[test]
    fn test_pattern_matching() -> Result<()> {
        assert!(matches_str("", "")?);
        assert!(matches_str("a", "a")?);
        assert!(matches_str("ab", "a.")?);
        assert!(matches_str("ab", "..")?);
        assert!(matches_str("", "a*")?);
        assert!(matches_str("aaaaa", ".*")?);
        assert!(matches_str("aaabbaaabaaaaaaa", "aa*aab*aaab.a*")?);
        assert!(matches_str("ba", "[ab][ab]")?);
        assert!(matches_str("b", "[ab][c]*")?);

        assert!(false == matches_str("", "a*a")?);
        assert!(false == matches_str("ab", "aba")?);
        assert!(false == matches_str("ab", "abaa")?);
        assert!(false == matches_str("aaa", "....")?);
        assert!(false == matches_str("a", "b")?);
        assert!(false == matches_str("a", "ab")?);
        assert!(false == matches_str("ab", "a")?);

        Ok(())
    }

    #[test]
    fn test_empty_text_matches_only_optional_patterns() -> Result<()> {
        for source in ["", "a*", "a*.*", "[xyz]*b*", "a", "a*b", ".*.", "[ab]"] {
            let pattern = compile(source)?;
            assert_eq!(matches("", &pattern), pattern.accepts_empty(), "{}", source);
        }
        Ok(())
    }

    #[test]
    fn test_star_explores_every_count() -> Result<()> {
        let pattern = compile("a*a*ab")?;
        assert!(false == pattern.matches("b"));
        assert!(pattern.matches("ab"));
        assert!(pattern.matches("aaaaab"));
        assert!(false == pattern.matches("aaaaa"));

        let pattern = compile(".*x.*")?;
        assert!(pattern.matches("x"));
        assert!(pattern.matches("abcxdef"));
        assert!(false == pattern.matches("abcdef"));

        Ok(())
    }

    #[test]
    fn test_non_ascii_text() -> Result<()> {
        assert!(matches_str("héllo", "h.llo")?);
        assert!(matches_str("日本語", "[日本]*語")?);
        assert!(false == matches_str("日本", "...")?);
        Ok(())
    }

    #[test]
    fn test_compiled_pattern_is_reusable() -> Result<()> {
        let pattern = compile("[ab]*c")?;
        for _ in 0..3 {
            assert!(pattern.matches("ababc"));
            assert!(false == pattern.matches("abab"));
        }
        Ok(())
    }

    #[test]
    fn test_adversarial_pattern_terminates() -> Result<()> {
        let pattern = compile(&"a*".repeat(30))?;
        let text = "a".repeat(200);
        assert!(pattern.matches(&text));

        let pattern = compile(&format!("{}b", "a*".repeat(30)))?;
        assert!(false == pattern.matches(&text));
        Ok(())
    }

    #[derive(Clone, Copy)]
    enum DrainOrder {
        Fifo,
        Lifo,
    }

    // Plain breadth-first search without any visited set.
    fn search_without_dedup(text: &str, pattern: &Pattern, order: DrainOrder) -> bool {
        let text: Vec<char> = text.chars().collect();
        let tokens = pattern.get_tokens();
        let mut frontier = VecDeque::from([FrontierState::start()]);

        loop {
            let state = match order {
                DrainOrder::Fifo => frontier.pop_front(),
                DrainOrder::Lifo => frontier.pop_back(),
            };
            let Some(state) = state else {
                return false;
            };
            if state.text_pos == text.len() && state.pattern_pos == tokens.len() {
                return true;
            }
            if state.pattern_pos == tokens.len() {
                continue;
            }
            let token = &tokens[state.pattern_pos];
            if token.may_advance(state.times_matched) {
                frontier.push_back(state.advance_token());
            }
            if token.is_exhausted(state.times_matched) {
                continue;
            }
            if state.text_pos < text.len() && token.accepts(text[state.text_pos]) {
                frontier.push_back(state.consume_char());
            }
        }
    }

    fn all_strings(alphabet: &[&str], max_len: usize) -> Vec<String> {
        let mut result = vec![String::new()];
        let mut previous = vec![String::new()];
        for _ in 0..max_len {
            let next: Vec<String> = previous
                .iter()
                .flat_map(|prefix| alphabet.iter().map(move |atom| format!("{}{}", prefix, atom)))
                .collect();
            result.extend(next.iter().cloned());
            previous = next;
        }
        result
    }

    #[test]
    fn test_dedup_and_drain_order_do_not_change_result() -> Result<()> {
        let atoms = ["a", "b", ".", "[ab]", "a*", "b*", ".*", "[ab]*"];
        let patterns = all_strings(&atoms, 3);
        let texts = all_strings(&["a", "b"], 5);
        assert_eq!(patterns.len(), 1 + 8 + 64 + 512);
        assert_eq!(texts.len(), 63);

        let mut accepted = 0usize;
        for source in &patterns {
            let pattern = compile(source)?;
            for text in &texts {
                let expected = matches(text, &pattern);
                for order in [DrainOrder::Fifo, DrainOrder::Lifo] {
                    assert_eq!(
                        search_without_dedup(text, &pattern, order),
                        expected,
                        "text: {:?}, pattern: {:?}",
                        text,
                        source
                    );
                }
                if expected {
                    accepted += 1;
                }
            }
        }
        // Both outcomes must be exercised.
        assert!(accepted > 0);
        assert!(accepted < patterns.len() * texts.len());

        Ok(())
    }

    #[test]
    fn test_search_budget() -> Result<()> {
        let pattern = compile(".*.*.*b")?;
        let text = "a".repeat(50);

        match pattern.try_matches(&text, &SearchLimits::with_max_states(10)) {
            Err(Error::SearchBudgetExceeded(10)) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
        assert_eq!(pattern.try_matches(&text, &SearchLimits::UNBOUNDED)?, false);
        assert_eq!(
            pattern.try_matches("ab", &SearchLimits::with_max_states(10_000))?,
            true
        );

        Ok(())
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        match matches_str("a", "[a") {
            Err(Error::PatternError(_)) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
