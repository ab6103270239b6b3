//! Tree construction from parsed records.
//!
//! # Responsibilities
//! - Track open nesting levels by indentation
//! - Attach deeper lines as children of the last line one level up
//! - Reject indentation that returns to a level never opened
//! - Freeze the finished tree into a `Database`

use std::io::BufRead;

use crate::db::parser::{DigitRange, Record, Records};
use crate::db::tree::{Database, Props};
use crate::error::{Error, Result};

/// A line under construction, before freezing.
#[derive(Debug)]
pub(crate) struct PendingLine {
    pub(crate) ranges: Vec<DigitRange>,
    pub(crate) props: Props,
    pub(crate) children: Vec<PendingLine>,
}

impl From<Record> for PendingLine {
    fn from(record: Record) -> Self {
        Self {
            ranges: record.ranges,
            props: record.props,
            children: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct Level {
    indent: usize,
    lines: Vec<PendingLine>,
}

/// Mutable builder folding records into a tree.
///
/// Levels form a stack; the bottom entry is the root list at indent 0
/// and is never popped.
#[derive(Debug)]
pub struct TreeBuilder {
    levels: Vec<Level>,
    records: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            levels: vec![Level {
                indent: 0,
                lines: Vec::new(),
            }],
            records: 0,
        }
    }

    fn top(&self) -> &Level {
        &self.levels[self.levels.len() - 1]
    }

    /// Add one record, opening or closing levels as its indent requires.
    pub fn push(&mut self, record: Record) -> Result<()> {
        let current = self.top().indent;

        if record.indent > current {
            if self.top().lines.is_empty() {
                return Err(Error::Structure {
                    line: record.line,
                    indent: record.indent,
                });
            }
            self.levels.push(Level {
                indent: record.indent,
                lines: Vec::new(),
            });
        } else if record.indent < current {
            while self.top().indent > record.indent {
                self.close_level();
            }
            if self.top().indent != record.indent {
                return Err(Error::Structure {
                    line: record.line,
                    indent: record.indent,
                });
            }
        }

        let last = self.levels.len() - 1;
        self.levels[last].lines.push(PendingLine::from(record));
        self.records += 1;
        Ok(())
    }

    /// Pop the top level and hand its lines to the parent line.
    fn close_level(&mut self) {
        if self.levels.len() < 2 {
            return;
        }
        if let Some(level) = self.levels.pop() {
            if let Some(parent) = self.levels.last_mut().and_then(|l| l.lines.last_mut()) {
                parent.children = level.lines;
            }
        }
    }

    /// Close every open level and freeze the tree.
    pub fn finish(mut self) -> Database {
        while self.levels.len() > 1 {
            self.close_level();
        }
        let root = self.levels.pop().map(|level| level.lines).unwrap_or_default();
        let db = Database::freeze(root);
        tracing::debug!(
            records = self.records,
            nodes = db.node_count(),
            depth = db.depth(),
            "Prefix tree frozen"
        );
        db
    }
}

impl Database {
    /// Build a database from a stream of records.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        let mut builder = TreeBuilder::new();
        for record in records {
            builder.push(record?)?;
        }
        Ok(builder.finish())
    }
}

/// Read a database from a buffered reader.
pub fn read<R: BufRead>(reader: R) -> Result<Database> {
    Database::from_records(Records::new(reader))
}

/// Read a database from text.
pub fn read_str(text: &str) -> Result<Database> {
    read(text.as_bytes())
}
