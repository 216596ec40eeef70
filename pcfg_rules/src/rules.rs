use fnv::{FnvHashMap, FnvHashSet};
use indexmap::IndexSet;
use itertools::Itertools;

use crate::production::{rhs_string, Production, Rhs};

/// An attempt to give a preterminal a second expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub preterminal: String,
    pub existing: String,
    pub requested: String,
}

/// The distinct right hand sides seen for each tag. Expansions are kept in first-seen order
/// and inserting one twice has no effect.
#[derive(Debug, Default, Clone)]
pub struct RuleTable {
    rules: FnvHashMap<String, IndexSet<Rhs>>,
    preterminals: FnvHashSet<String>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `rule`, returning true if its expansion was not already present for its tag.
    /// Fails if the tag is a synthesized preterminal and the expansion is not its terminal.
    pub fn insert(&mut self, rule: Production) -> Result<bool, Conflict> {
        if self.preterminals.contains(&rule.lhs) {
            self.check_single_expansion(&rule)?;
        }
        Ok(self.rules.entry(rule.lhs).or_default().insert(rule.rhs))
    }

    /// Registers a synthesized preterminal rule. Once registered, the preterminal may only
    /// ever rewrite to this one terminal.
    pub fn insert_preterminal(&mut self, rule: Production) -> Result<bool, Conflict> {
        if self.rules.contains_key(&rule.lhs) {
            self.check_single_expansion(&rule)?;
            self.preterminals.insert(rule.lhs);
            return Ok(false);
        }
        self.preterminals.insert(rule.lhs.clone());
        let mut expansions = IndexSet::new();
        expansions.insert(rule.rhs);
        self.rules.insert(rule.lhs, expansions);
        Ok(true)
    }

    fn check_single_expansion(&self, rule: &Production) -> Result<(), Conflict> {
        match self.rules.get(&rule.lhs) {
            Some(expansions) if expansions.len() != 1 || !expansions.contains(&rule.rhs) => {
                Err(Conflict {
                    preterminal: rule.lhs.clone(),
                    existing: expansions.iter().map(|rhs| rhs_string(rhs)).join(" | "),
                    requested: rule.rhs_string(),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn get(&self, tag: &str) -> Option<&IndexSet<Rhs>> {
        self.rules.get(tag)
    }

    pub fn is_preterminal(&self, tag: &str) -> bool {
        self.preterminals.contains(tag)
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of distinct rules across all tags.
    pub fn num_rules(&self) -> usize {
        self.rules.values().map(IndexSet::len).sum()
    }

    /// Tags in lexicographic order, each with its expansions in first-seen order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&str, &IndexSet<Rhs>)> {
        self.rules
            .iter()
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(tag, expansions)| (tag.as_str(), expansions))
    }
}
