//! Compiled pattern cache
//!
//! Patterns are compiled on first use and shared afterwards. The cache is
//! owned by whoever runs passes (the coordinator), so tests get a fresh one.

use std::collections::HashMap;
use std::rc::Rc;

use fancy_regex::Regex;

/// Memoizes compiled regexes keyed by their exact source string
#[derive(Debug, Default)]
pub struct PatternRegistry {
    compiled: HashMap<String, Rc<Regex>>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self {
            compiled: HashMap::new(),
        }
    }

    /// Return the compiled regex for `source`, compiling it on first use.
    ///
    /// Compile errors are returned to the caller and nothing is cached, so a
    /// bad pattern fails again on the next call rather than poisoning the cache.
    pub fn get_or_compile(&mut self, source: &str) -> Result<Rc<Regex>, fancy_regex::Error> {
        if let Some(regex) = self.compiled.get(source) {
            return Ok(Rc::clone(regex));
        }

        let regex = Rc::new(Regex::new(source)?);
        tracing::trace!("Compiled highlight pattern {:?}", source);
        self.compiled.insert(source.to_owned(), Rc::clone(&regex));
        Ok(regex)
    }

    /// Whether `source` has already been compiled
    pub fn contains(&self, source: &str) -> bool {
        self.compiled.contains_key(source)
    }

    /// Number of cached patterns
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_source_returns_same_instance() {
        let mut registry = PatternRegistry::new();
        let first = registry.get_or_compile(r"\*\*(.+?)\*\*").unwrap();
        let second = registry.get_or_compile(r"\*\*(.+?)\*\*").unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_sources_are_cached_separately() {
        let mut registry = PatternRegistry::new();
        registry.get_or_compile("a+").unwrap();
        registry.get_or_compile("b+").unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a+"));
        assert!(!registry.contains("c+"));
    }

    #[test]
    fn test_malformed_pattern_is_not_cached() {
        let mut registry = PatternRegistry::new();
        assert!(registry.get_or_compile("(unclosed").is_err());
        assert!(registry.is_empty());
        assert!(registry.get_or_compile("(unclosed").is_err());
    }

    #[test]
    fn test_lookaround_patterns_compile() {
        let mut registry = PatternRegistry::new();
        let re = registry.get_or_compile(r"(?<!`)`[^`\n]+`(?!`)").unwrap();
        assert!(re.is_match("say `hi` now").unwrap());
        assert!(!re.is_match("``").unwrap());
    }
}
