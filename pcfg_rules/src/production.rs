use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

use itertools::Itertools;
use smallvec::SmallVec;

use crate::utils::{starts_uppercase, SplitFirstChar};

pub const PRETERMINAL_PREFIX: &str = "P_";
pub const TERMINAL_PREFIX: char = '_';

/// A grammar symbol. Preterminals are non-terminals synthesized to rewrite to exactly one
/// terminal, named `P_` followed by the uppercased word.
///
/// Symbols compare by their written form: a preterminal equals the non-terminal of the same
/// name.
#[derive(Clone)]
pub enum Symbol {
    NonTerminal(String),
    Preterminal(String),
    /// The word as it appeared in the listing, without the leading underscore.
    Terminal(String),
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.is_terminal() == other.is_terminal() && self.name() == other.name()
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_terminal().hash(state);
        self.name().hash(state);
    }
}

impl Debug for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::NonTerminal(nt) => write!(f, "NonTerminal::{}", nt),
            Symbol::Preterminal(pt) => write!(f, "Preterminal::{}", pt),
            Symbol::Terminal(t) => write!(f, "Terminal::{{ \"{}\" }}", t),
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::NonTerminal(nt) => f.write_str(nt),
            Symbol::Preterminal(pt) => f.write_str(pt),
            Symbol::Terminal(t) => write!(f, "{}{}", TERMINAL_PREFIX, t),
        }
    }
}

impl Symbol {
    /// Classifies a child token from a grammar listing: tokens starting with an uppercase
    /// ASCII letter are non-terminals, anything else is a terminal.
    pub fn from_listing(token: &str) -> Self {
        if starts_uppercase(token) {
            Symbol::NonTerminal(token.to_string())
        } else {
            Symbol::Terminal(token.to_string())
        }
    }

    /// Classifies a child token from an emitted rule file, where terminals carry a leading
    /// underscore.
    pub fn from_rule_file(token: &str) -> Self {
        match token.split_first() {
            Some((TERMINAL_PREFIX, word)) => Symbol::Terminal(word.to_string()),
            _ if token.starts_with(PRETERMINAL_PREFIX) => Symbol::Preterminal(token.to_string()),
            _ => Symbol::NonTerminal(token.to_string()),
        }
    }

    /// The preterminal standing in for the terminal `word`.
    pub fn preterminal_for(word: &str) -> Self {
        Symbol::Preterminal(format!("{}{}", PRETERMINAL_PREFIX, word.to_uppercase()))
    }

    pub fn is_nonterminal(&self) -> bool {
        !self.is_terminal()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_preterminal(&self) -> bool {
        matches!(self, Symbol::Preterminal(_))
    }

    /// The symbol's name, without the terminal underscore.
    pub fn name(&self) -> &str {
        match self {
            Symbol::NonTerminal(s) | Symbol::Preterminal(s) | Symbol::Terminal(s) => s,
        }
    }
}

pub type Rhs = SmallVec<[Symbol; 6]>;

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Production {
    pub lhs: String,
    pub rhs: Rhs,
}

impl Production {
    pub fn new(lhs: impl Into<String>, rhs: Vec<Symbol>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_nonlexical(&self) -> bool {
        self.rhs.iter().all(Symbol::is_nonterminal)
    }

    pub fn is_lexical(&self) -> bool {
        !self.is_nonlexical()
    }

    /// True if the right hand side is all non-terminals, or a single terminal.
    pub fn is_homogeneous(&self) -> bool {
        self.is_nonlexical() || (self.len() == 1 && self.rhs[0].is_terminal())
    }

    /// The space-joined right hand side, as written to rule files.
    pub fn rhs_string(&self) -> String {
        rhs_string(&self.rhs)
    }
}

pub fn rhs_string(rhs: &[Symbol]) -> String {
    rhs.iter().join(" ")
}

impl Display for Production {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->[{}]", self.lhs, self.rhs_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_listing() {
        assert_eq!(Symbol::from_listing("NP"), Symbol::NonTerminal("NP".to_string()));
        assert_eq!(Symbol::from_listing("dog"), Symbol::Terminal("dog".to_string()));
        assert_eq!(Symbol::from_listing("."), Symbol::Terminal(".".to_string()));
        assert_eq!(Symbol::from_listing("'s"), Symbol::Terminal("'s".to_string()));
    }

    #[test]
    fn test_from_rule_file() {
        assert_eq!(Symbol::from_rule_file("_dog"), Symbol::Terminal("dog".to_string()));
        assert_eq!(
            Symbol::from_rule_file("P_DOG"),
            Symbol::Preterminal("P_DOG".to_string())
        );
        assert!(Symbol::from_rule_file("P_DOG").is_preterminal());
        assert_eq!(Symbol::from_rule_file("VP"), Symbol::NonTerminal("VP".to_string()));
    }

    #[test]
    fn test_preterminal_for() {
        assert_eq!(
            Symbol::preterminal_for("dog"),
            Symbol::Preterminal("P_DOG".to_string())
        );
        assert_eq!(Symbol::preterminal_for("dOg"), Symbol::preterminal_for("dog"));
    }

    #[test]
    fn test_equality_by_written_form() {
        assert_eq!(
            Symbol::NonTerminal("P_DOG".to_string()),
            Symbol::preterminal_for("dog")
        );
        assert_ne!(
            Symbol::NonTerminal("dog".to_string()),
            Symbol::Terminal("dog".to_string())
        );

        let mut expansions = std::collections::HashSet::new();
        let rhs: Rhs = vec![Symbol::from_listing("P_DOG"), Symbol::from_listing("NN")].into();
        expansions.insert(rhs);
        let rhs: Rhs = vec![Symbol::preterminal_for("dog"), Symbol::from_listing("NN")].into();
        assert!(!expansions.insert(rhs));
    }

    #[test]
    fn test_display() {
        let prod = Production::new(
            "VP",
            vec![
                Symbol::NonTerminal("NP".to_string()),
                Symbol::preterminal_for("dog"),
            ],
        );
        assert_eq!(prod.to_string(), "VP->[NP P_DOG]");
        let lex = Production::new("DT", vec![Symbol::Terminal("the".to_string())]);
        assert_eq!(lex.to_string(), "DT->[_the]");
    }

    #[test]
    fn test_homogeneous() {
        let mixed = Production::new(
            "VP",
            vec![
                Symbol::NonTerminal("NP".to_string()),
                Symbol::Terminal("dog".to_string()),
            ],
        );
        assert!(mixed.is_lexical());
        assert!(!mixed.is_homogeneous());

        let lex = Production::new("DT", vec![Symbol::Terminal("the".to_string())]);
        assert!(lex.is_homogeneous());

        let two_terminals = Production::new(
            "X",
            vec![
                Symbol::Terminal("a".to_string()),
                Symbol::Terminal("b".to_string()),
            ],
        );
        assert!(!two_terminals.is_homogeneous());
    }
}
