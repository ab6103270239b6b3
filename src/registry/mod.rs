//! Database registry.
//!
//! # Data Flow
//! ```text
//! get(name)
//!     → cache.rs (DashMap lookup)
//!     → hit: Arc<Database>
//!     → miss: opener.rs (name → reader)
//!            → db::read (parse, load, freeze)
//!            → insert (first writer wins)
//!            → Arc<Database>
//! ```
//!
//! # Design Decisions
//! - Databases are published fully built; readers never see partial state
//! - Failed loads are not cached; the next call retries
//! - Resource access is a capability (`ResourceOpener`) so tests and
//!   embedders can supply their own sources

pub mod cache;
pub mod global;
pub mod opener;

pub use cache::{is_valid_name, Registry};
pub use global::{default_data_dir, get, global, init, init_from_path};
pub use opener::{DirOpener, MemoryOpener, ResourceOpener};
