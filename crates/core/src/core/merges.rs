//! Merge rule management for BPE.
//!
//! Rules are kept in application order; a later rule may consume symbols
//! produced by earlier ones, so the order is part of the model.

use super::symbol::Symbol;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// An ordered pair of adjacent symbols.
///
/// Compared structurally, so symbols whose text contains any separator
/// character can never collide as keys.
pub type Pair = (Symbol, Symbol);

/// A single merge: `left` followed by `right` becomes `result`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeRule {
    pub left: Symbol,
    pub right: Symbol,
    pub result: Symbol,
}

impl MergeRule {
    /// Create a new merge rule.
    pub fn new(left: Symbol, right: Symbol, result: Symbol) -> Self {
        Self {
            left,
            right,
            result,
        }
    }

    /// The pair this rule merges.
    pub fn pair(&self) -> Pair {
        (self.left.clone(), self.right.clone())
    }
}

/// Ordered collection of BPE merge rules with rank lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<MergeRule>", into = "Vec<MergeRule>")]
pub struct MergeRules {
    /// Rules in application order; the index is the rank
    rules: Vec<MergeRule>,
    /// Pair -> rank
    ranks: AHashMap<Pair, usize>,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule; its rank is the number of rules before it.
    ///
    /// A pair keeps the rank of its first rule.
    pub fn push(&mut self, rule: MergeRule) {
        let rank = self.rules.len();
        self.ranks.entry(rule.pair()).or_insert(rank);
        self.rules.push(rule);
    }

    /// Rank of the rule merging `left` and `right`, if any.
    #[inline]
    pub fn rank(&self, left: &Symbol, right: &Symbol) -> Option<usize> {
        self.ranks.get(&(left.clone(), right.clone())).copied()
    }

    /// Get the rule at a rank.
    #[inline]
    pub fn get(&self, rank: usize) -> Option<&MergeRule> {
        self.rules.get(rank)
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in application order.
    pub fn as_slice(&self) -> &[MergeRule] {
        &self.rules
    }

    /// Iterate over rules in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, MergeRule> {
        self.rules.iter()
    }
}

impl PartialEq for MergeRules {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl Eq for MergeRules {}

impl From<Vec<MergeRule>> for MergeRules {
    fn from(rules: Vec<MergeRule>) -> Self {
        rules.into_iter().collect()
    }
}

impl From<MergeRules> for Vec<MergeRule> {
    fn from(rules: MergeRules) -> Self {
        rules.rules
    }
}

impl FromIterator<MergeRule> for MergeRules {
    fn from_iter<I: IntoIterator<Item = MergeRule>>(iter: I) -> Self {
        let mut rules = MergeRules::new();
        for rule in iter {
            rules.push(rule);
        }
        rules
    }
}

impl<'a> IntoIterator for &'a MergeRules {
    type Item = &'a MergeRule;
    type IntoIter = std::slice::Iter<'a, MergeRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
