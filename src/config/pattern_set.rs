use crate::compiler::{compile, Pattern};
use crate::engine::SearchLimits;
use crate::error_handling::Error::{
    IOError, InvalidConfig, MissingConfigKey, YamlParsingError,
};
use crate::error_handling::Result;
use indexmap::IndexMap;
use log::debug;
use serde_yaml::Value;
use std::io::Read;
use std::rc::Rc;

pub struct NamedPattern {
    name: String,
    pattern: Pattern,
}

impl NamedPattern {
    pub fn new(name: String, source: &str) -> Result<NamedPattern> {
        let pattern = compile(source)?;
        Ok(Self { name, pattern })
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_pattern(&self) -> &Pattern {
        &self.pattern
    }
}

/// A named collection of compiled patterns loaded from YAML, together with the
/// search limits applied when matching against them.
pub struct PatternSetConfig {
    patterns: Vec<NamedPattern>,
    limits: SearchLimits,
}

impl PatternSetConfig {
    const PATTERNS_KEY: &'static str = "patterns";
    const MAX_STATES_KEY: &'static str = "max_states";

    pub fn parse_from_file(yaml_file_path: &str) -> Result<Rc<PatternSetConfig>> {
        match std::fs::File::open(yaml_file_path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    return Err(IOError(e));
                }
                Ok(Rc::new(Self::parse_from_str(contents.as_str())?))
            }
            Err(e) => Err(IOError(e)),
        }
    }

    pub fn parse_from_str(yaml_content: &str) -> Result<PatternSetConfig> {
        match Self::load_kv_pairs_from_yaml_content(yaml_content) {
            Ok(kv_pairs) => Self::load_from_kv_pairs(kv_pairs),
            Err(e) => Err(YamlParsingError(e)),
        }
    }

    pub fn get_patterns(&self) -> &[NamedPattern] {
        &self.patterns
    }

    pub fn get_limits(&self) -> &SearchLimits {
        &self.limits
    }

    pub fn get_pattern(&self, name: &str) -> Option<&Pattern> {
        self.patterns
            .iter()
            .find(|p| p.get_name() == name)
            .map(NamedPattern::get_pattern)
    }

    /// Names of every pattern that fully matches `text`, in configuration order.
    pub fn match_all(&self, text: &str) -> Result<Vec<&str>> {
        self.match_all_with_limits(text, &self.limits)
    }

    /// Like [`Self::match_all`], but searches under `limits` instead of the
    /// configured ones.
    pub fn match_all_with_limits(&self, text: &str, limits: &SearchLimits) -> Result<Vec<&str>> {
        let mut matched = Vec::new();
        for named in &self.patterns {
            if named.pattern.try_matches(text, limits)? {
                matched.push(named.get_name());
            }
        }
        Ok(matched)
    }

    fn load_kv_pairs_from_yaml_content(
        yaml_content: &str,
    ) -> serde_yaml::Result<IndexMap<String, Value>> {
        let kv_map_result: IndexMap<String, Value> = serde_yaml::from_str(yaml_content)?;
        Ok(kv_map_result)
    }

    fn load_from_kv_pairs(kv_pairs: IndexMap<String, Value>) -> Result<Self> {
        // Handle patterns
        let mut patterns: Vec<NamedPattern> = Vec::new();
        let pattern_map = kv_pairs
            .get(Self::PATTERNS_KEY)
            .ok_or(MissingConfigKey(Self::PATTERNS_KEY))?;
        if let Value::Mapping(map) = pattern_map {
            for (key, value) in map {
                match (key, value) {
                    (Value::String(name), Value::String(source)) => {
                        if patterns.iter().any(|p| p.get_name() == name) {
                            return Err(InvalidConfig("duplicated pattern name"));
                        }
                        patterns.push(NamedPattern::new(name.clone(), source)?);
                    }
                    _ => return Err(InvalidConfig("pattern entries must be name: \"pattern\"")),
                }
            }
        } else {
            return Err(InvalidConfig("`patterns` must be a mapping"));
        }

        // Handle search budget
        let limits = match kv_pairs.get(Self::MAX_STATES_KEY) {
            None | Some(Value::Null) => SearchLimits::UNBOUNDED,
            Some(Value::Number(n)) => {
                match n.as_u64().and_then(|v| usize::try_from(v).ok()) {
                    Some(max_states) => SearchLimits::with_max_states(max_states),
                    None => {
                        return Err(InvalidConfig(
                            "`max_states` must be a non-negative integer that fits in usize",
                        ))
                    }
                }
            }
            Some(_) => return Err(InvalidConfig("`max_states` must be a non-negative integer")),
        };

        debug!(
            "Loaded {} patterns, max states: {:?}",
            patterns.len(),
            limits.max_states
        );
        Ok(Self { patterns, limits })
    }
}
