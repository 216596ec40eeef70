use std::io::{self, Write};

use crate::production::rhs_string;
use crate::rules::RuleTable;

/// Formats `value` the way C's `%e` does: six fractional digits and a signed exponent of
/// at least two digits.
pub fn format_scientific(value: f64) -> String {
    let formatted = format!("{:.6e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => format!(
                "{}e{}{:02}",
                mantissa,
                if exponent < 0 { '-' } else { '+' },
                exponent.abs()
            ),
            Err(_) => formatted,
        },
        None => formatted,
    }
}

pub fn uniform_probability(num_expansions: usize) -> f64 {
    1.0 / num_expansions as f64
}

/// Writes every rule in `table`, one per line as `TAG->[RHS] : P`, giving each of a tag's
/// expansions the same probability. Returns the number of rules written.
pub fn write_rules<W: Write>(table: &RuleTable, writer: &mut W) -> io::Result<usize> {
    let mut written = 0;
    for (tag, expansions) in table.iter_sorted() {
        let prob = format_scientific(uniform_probability(expansions.len()));
        for rhs in expansions {
            writeln!(writer, "{}->[{}] : {}", tag, rhs_string(rhs), prob)?;
            written += 1;
        }
    }
    Ok(written)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::production::{Production, Symbol};

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_scientific(1.0), "1.000000e+00");
        assert_eq!(format_scientific(0.5), "5.000000e-01");
        assert_eq!(format_scientific(1.0 / 3.0), "3.333333e-01");
        assert_eq!(format_scientific(2.0 / 3.0), "6.666667e-01");
        assert_eq!(format_scientific(1e-5), "1.000000e-05");
        assert_eq!(format_scientific(0.001), "1.000000e-03");
        assert_eq!(format_scientific(1.5e120), "1.500000e+120");
    }

    #[test]
    fn test_write_rules() {
        let mut table = RuleTable::new();
        let nt = |s: &str| Symbol::NonTerminal(s.to_string());
        table
            .insert(Production::new("S", vec![nt("NP"), nt("VP")]))
            .unwrap();
        table
            .insert(Production::new("NP", vec![nt("DT"), nt("NN")]))
            .unwrap();
        table
            .insert(Production::new("NP", vec![nt("NN")]))
            .unwrap();
        table
            .insert_preterminal(Production::new(
                "P_DOG",
                vec![Symbol::Terminal("dog".to_string())],
            ))
            .unwrap();

        let mut out = Vec::new();
        assert_eq!(write_rules(&table, &mut out).unwrap(), 4);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "NP->[DT NN] : 5.000000e-01\n\
             NP->[NN] : 5.000000e-01\n\
             P_DOG->[_dog] : 1.000000e+00\n\
             S->[NP VP] : 1.000000e+00\n"
        );
    }

    #[test]
    fn test_write_empty() {
        let mut out = Vec::new();
        let table = RuleTable::new();
        assert!(table.is_empty());
        assert_eq!(write_rules(&table, &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }
}
