//! Hierarchical prefix database.
//!
//! Decomposes structured numbers (phone prefixes, ISBN ranges, IBAN
//! country codes) against a tree of digit ranges annotated with
//! properties.
//!
//! ```text
//! resource (.dat) → db::parser → db::loader → Database (frozen)
//!                                                 │
//!                 registry (cache by name) ◀──────┘
//!                                                 │
//!                 lookup (info / split)  ◀────────┘
//! ```
//!
//! ```
//! let db = numdb::read_str("90,98 prop1=\"booz\"\n  20,89 prop2=\"foo\"\n")?;
//! assert_eq!(db.split("902006"), ["90", "20", "06"]);
//! # Ok::<(), numdb::Error>(())
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod lookup;
pub mod observability;
pub mod registry;

pub use config::NumdbConfig;
pub use db::{read, read_str, Database, PrefixNode, Props};
pub use error::{Error, ParseErrorKind, Result};
pub use lookup::MatchPart;
pub use registry::{get, init, init_from_path, DirOpener, MemoryOpener, Registry, ResourceOpener};
