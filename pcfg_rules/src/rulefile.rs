use std::io::BufRead;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::line::is_numeric;
use crate::production::{Production, Symbol};

/// Tolerance for the per-tag probability sum. Probabilities are written with seven
/// significant digits.
pub const SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedRule {
    pub production: Production,
    pub prob: f64,
}

fn eat_open(line: &str) -> Option<(&str, &str)> {
    line.split_once("->[")
}

fn eat_close(line: &str) -> Option<(&str, &str)> {
    line.split_once("] : ")
}

/// Parses one `TAG->[RHS] : P` line.
pub fn parse_rule(line: &str) -> std::result::Result<WeightedRule, &'static str> {
    let line = line.trim();
    let (lhs, rest) = eat_open(line).ok_or("did not find \"->[\" after the tag")?;
    let (rhs, prob) = eat_close(rest).ok_or("did not find \"] : \" after the children")?;

    if lhs.is_empty() {
        return Err("empty tag");
    }
    if !is_numeric(prob) {
        return Err("probability is not a number");
    }
    let prob: f64 = prob.parse().map_err(|_| "probability is not a number")?;
    if prob < 0.0 {
        return Err("probability is negative");
    }

    let rhs: Vec<_> = rhs.split_whitespace().map(Symbol::from_rule_file).collect();
    if rhs.is_empty() {
        return Err("no children");
    }

    let production = Production::new(lhs, rhs);
    if !production.is_homogeneous() {
        return Err("children mix terminals and non-terminals");
    }

    Ok(WeightedRule { production, prob })
}

/// Reads every rule from a rule file, skipping blank lines.
pub fn read_rules<R: BufRead>(reader: R) -> Result<Vec<WeightedRule>> {
    let mut rules = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let rule = parse_rule(&line).map_err(|reason| Error::MalformedRule {
            line_no: index + 1,
            line: line.clone(),
            reason,
        })?;
        rules.push(rule);
    }
    Ok(rules)
}

/// Checks that the probabilities of each tag's expansions sum to one.
pub fn verify(rules: &[WeightedRule]) -> Result<()> {
    let mut totals: IndexMap<&str, f64> = IndexMap::new();
    for rule in rules {
        *totals.entry(rule.production.lhs.as_str()).or_insert(0.0) += rule.prob;
    }

    match totals
        .into_iter()
        .find(|(_, total)| (total - 1.0).abs() > SUM_TOLERANCE)
    {
        Some((tag, total)) => Err(Error::InvalidDistribution {
            tag: tag.to_string(),
            total,
        }),
        None => Ok(()),
    }
}
