//! Serialization back into the `.dat` text format.

use std::fmt;
use std::io;

use crate::db::tree::{Database, PrefixNode};

const INDENT: &str = "  ";

impl Database {
    /// Write the database in the text format it was read from.
    ///
    /// Reading the output back yields a database equal to `self`.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{self}")
    }

    fn write_level(
        &self,
        f: &mut fmt::Formatter<'_>,
        nodes: &[PrefixNode],
        depth: usize,
    ) -> fmt::Result {
        let mut start = 0;
        while start < nodes.len() {
            let first = &nodes[start];
            let end = start
                + nodes[start..]
                    .iter()
                    .take_while(|node| node.shares_line_with(first))
                    .count();

            f.write_str(&INDENT.repeat(depth))?;
            for (i, node) in nodes[start..end].iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                if node.low() == node.high() {
                    f.write_str(node.low())?;
                } else {
                    write!(f, "{}-{}", node.low(), node.high())?;
                }
            }
            for (key, value) in first.props().iter() {
                write!(f, " {key}=\"{value}\"")?;
            }
            f.write_str("\n")?;

            self.write_level(f, self.children(first), depth + 1)?;
            start = end;
        }
        Ok(())
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_level(f, self.roots(), 0)
    }
}
