//! Prefix database subsystem.
//!
//! # Data Flow
//! ```text
//! .dat text (UTF-8, line oriented)
//!     → parser.rs (one Record per data line)
//!     → loader.rs (indentation → nesting, mutable TreeBuilder)
//!     → tree.rs (freeze into an immutable arena)
//!     → Database (shared via Arc, queried by lookup/)
//!
//! Round trip:
//!     Database → writer.rs → .dat text
//! ```
//!
//! # Design Decisions
//! - Databases are immutable once frozen; no locking on the query path
//! - Ranges written on one line share props and children
//! - Overlap and ordering are not validated; the matcher tolerates both

pub mod loader;
pub mod parser;
pub mod tree;
pub mod writer;

pub use loader::{read, read_str, TreeBuilder};
pub use parser::{DigitRange, Record, Records};
pub use tree::{Database, PrefixNode, Props};
