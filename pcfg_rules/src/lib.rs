use std::io::{BufRead, Write};

pub mod emit;
pub mod error;
pub mod line;
pub mod normalize;
pub mod production;
pub mod rulefile;
pub mod rules;
mod utils;

use tracing::{debug, info};

pub use crate::error::{Error, Result};
use crate::line::parse_line;
use crate::normalize::normalize;
pub use crate::production::{Production, Symbol};
use crate::rules::Conflict;
pub use crate::rules::RuleTable;

pub const DEFAULT_PROGRESS_INTERVAL: usize = 10_000;

/// Builds a [`RuleTable`] from a grammar listing, one line at a time.
pub struct Converter {
    table: RuleTable,
    lines: usize,
    progress_interval: usize,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    pub fn new() -> Self {
        Self {
            table: RuleTable::new(),
            lines: 0,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Logs progress every `interval` lines. Zero disables progress logging.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Classifies, normalizes and records a single listing line.
    pub fn process_line(&mut self, line: &str) -> Result<()> {
        let line_no = self.lines + 1;
        let parsed = parse_line(line).map_err(|reason| Error::MalformedLine {
            line_no,
            line: line.to_string(),
            reason,
        })?;
        debug!(line_no, form = ?parsed.form, tag = parsed.tag, "parsed line");

        let normalized = normalize(&parsed);
        let into_error = |conflict: Conflict| Error::PreterminalConflict {
            line_no,
            preterminal: conflict.preterminal,
            existing: conflict.existing,
            requested: conflict.requested,
        };

        for preterminal in normalized.preterminals {
            let rendered = preterminal.to_string();
            if self.table.insert_preterminal(preterminal).map_err(into_error)? {
                debug!(line_no, rule = %rendered, "new preterminal");
            }
        }
        self.table.insert(normalized.rule).map_err(into_error)?;

        self.lines = line_no;
        if self.progress_interval != 0 && self.lines % self.progress_interval == 0 {
            info!(lines = self.lines, "processing");
        }
        Ok(())
    }

    /// Processes every line from `reader`, stopping at the first error.
    pub fn read<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for line in reader.lines() {
            self.process_line(&line?)?;
        }
        Ok(())
    }

    /// Number of lines processed so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn finish(self) -> RuleTable {
        info!(
            lines = self.lines,
            tags = self.table.len(),
            rules = self.table.num_rules(),
            "done"
        );
        self.table
    }
}

/// Converts the grammar listing in `reader` into a rule file written to `writer`, returning
/// the number of rules written. Nothing is written if any line fails.
pub fn convert<R: BufRead, W: Write>(reader: R, writer: &mut W) -> Result<usize> {
    let mut converter = Converter::new();
    converter.read(reader)?;
    let table = converter.finish();
    Ok(emit::write_rules(&table, writer)?)
}
