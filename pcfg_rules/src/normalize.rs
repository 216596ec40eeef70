use smallvec::SmallVec;

use crate::line::ParsedProduction;
use crate::production::{Production, Symbol};

/// A listing line rewritten so its right hand side is homogeneous, along with the
/// preterminal rules it introduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub rule: Production,
    pub preterminals: SmallVec<[Production; 2]>,
}

/// Rewrites the children of `parsed`. A lone terminal child is kept as a terminal; terminals
/// that have siblings are replaced by a `P_` preterminal, and the preterminal's rule is
/// returned alongside.
pub fn normalize(parsed: &ParsedProduction) -> Normalized {
    let num_children = parsed.children.len();
    let mut rhs = Vec::with_capacity(num_children);
    let mut preterminals: SmallVec<[Production; 2]> = SmallVec::new();

    for child in parsed.children.iter().copied() {
        match Symbol::from_listing(child) {
            Symbol::Terminal(word) if num_children > 1 => {
                let child_tag = Symbol::preterminal_for(&word);
                let rule = Production::new(child_tag.name(), vec![Symbol::Terminal(word)]);
                if !preterminals.contains(&rule) {
                    preterminals.push(rule);
                }
                rhs.push(child_tag);
            }
            symbol => rhs.push(symbol),
        }
    }

    Normalized {
        rule: Production::new(parsed.tag, rhs),
        preterminals,
    }
}
