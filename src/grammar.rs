//! L-System production rules and iterative string rewriting.
//!
//! The alphabet for tree generation is tiny and known ahead of time, so the
//! rule table is an ordered `(symbol, replacement)` list scanned linearly
//! rather than a hash map.

use serde::{Deserialize, Serialize};

/// A table of production rules mapping a single symbol to its replacement
/// sequence. Symbols without an entry pass through expansion unchanged
/// (identity production).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<(char, String)>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed rule set for tree generation: `F -> F[-F]F[+F][F]`.
    ///
    /// The turn and bracket symbols (`+`, `-`, `[`, `]`) carry
    /// interpreter-only meaning and deliberately have no rules.
    pub fn tree_default() -> Self {
        let mut rules = Self::new();
        rules.add('F', "F[-F]F[+F][F]");
        rules
    }

    /// Adds a rule, replacing any existing rule for the same symbol.
    pub fn add(&mut self, symbol: char, replacement: impl Into<String>) {
        let replacement = replacement.into();
        match self.rules.iter_mut().find(|(s, _)| *s == symbol) {
            Some(entry) => entry.1 = replacement,
            None => self.rules.push((symbol, replacement)),
        }
    }

    /// Looks up the replacement for `symbol`, if one is registered.
    pub fn lookup(&self, symbol: char) -> Option<&str> {
        self.rules
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, r)| r.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }
}

/// Expands `axiom` by applying `rules` for `iterations` rewrite passes.
///
/// Each pass scans the current string left-to-right into a fresh buffer:
/// symbols with a rule append their replacement, all others append
/// themselves. No symbol is ever dropped, and the result is fully
/// deterministic. Zero iterations returns the axiom verbatim; an empty
/// axiom stays empty at every iteration count.
pub fn expand(axiom: &str, rules: &RuleSet, iterations: u32) -> String {
    let mut current = axiom.to_owned();
    for _ in 0..iterations {
        let mut next = String::with_capacity(current.len() * 4);
        for symbol in current.chars() {
            match rules.lookup(symbol) {
                Some(replacement) => next.push_str(replacement),
                None => next.push(symbol),
            }
        }
        current = next;
    }
    current
}
