//! Process-wide registry.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::config::loader::load_config;
use crate::config::schema::NumdbConfig;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::observability::logging::init_logging;
use crate::registry::cache::Registry;
use crate::registry::opener::MemoryOpener;

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// The crate's `data/` directory as located at build time.
///
/// This is the configured default for `registry.data_dir`. A binary moved
/// off the build machine should set `data_dir` explicitly; the
/// unconfigured [`global`] registry uses the embedded copies instead.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

/// Install the global registry from configuration.
///
/// Must run before the first call to [`get`]; later calls fail with
/// [`Error::AlreadyInitialized`].
pub fn init(config: &NumdbConfig) -> Result<()> {
    if GLOBAL.get().is_some() {
        return Err(Error::AlreadyInitialized);
    }
    let registry = Registry::from_config(&config.registry)?;
    GLOBAL
        .set(registry)
        .map_err(|_| Error::AlreadyInitialized)?;

    tracing::info!(
        data_dir = %config.registry.data_dir.display(),
        "Global registry initialized"
    );
    Ok(())
}

/// Load configuration from a TOML file, install the global registry, and
/// set up logging.
///
/// Logging is only installed once the registry is in place, so a failed
/// call leaves no global subscriber behind.
pub fn init_from_path(path: &Path) -> Result<()> {
    let config = load_config(path)?;
    init(&config)?;
    init_logging(&config.logging);
    Ok(())
}

/// The global registry, created over the bundled databases on first use.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(|| Registry::new(MemoryOpener::bundled()))
}

/// Look up a database in the global registry.
pub fn get(name: &str) -> Result<Arc<Database>> {
    global().get(name)
}
