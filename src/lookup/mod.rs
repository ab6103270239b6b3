//! Number lookup.
//!
//! # Data Flow
//! ```text
//! query digits
//!     → matcher.rs (descend every node whose range covers the prefix)
//!     → merge.rs (align ambiguous branches column by column)
//!     → Vec<MatchPart> (concatenated digits == query)
//! ```
//!
//! # Design Decisions
//! - Never fails: unmatched input comes back as a part with empty props
//! - Props travel as borrowed layers and are resolved once per part
//! - Shortest digits per column, union of props, later sibling wins

pub mod matcher;
mod merge;

pub use matcher::MatchPart;
