use std::io;

/// Errors raised while converting a grammar listing or reading back a rule file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A listing line has too few tokens or numeric fields in the wrong place.
    #[error("malformed line {line_no} ({reason}): {line:?}")]
    MalformedLine {
        line_no: usize,
        line: String,
        reason: &'static str,
    },

    /// A preterminal was asked to rewrite to something other than its one terminal.
    #[error(
        "preterminal conflict on line {line_no}: {preterminal} already rewrites to [{existing}], cannot add [{requested}]"
    )]
    PreterminalConflict {
        line_no: usize,
        preterminal: String,
        existing: String,
        requested: String,
    },

    #[error("malformed rule on line {line_no} ({reason}): {line:?}")]
    MalformedRule {
        line_no: usize,
        line: String,
        reason: &'static str,
    },

    /// The probabilities of a tag's expansions do not sum to one.
    #[error("probabilities for {tag} sum to {total}, expected 1")]
    InvalidDistribution { tag: String, total: f64 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
