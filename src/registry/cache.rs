//! Named database cache.

use std::io::BufReader;
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;

use crate::config::schema::RegistryConfig;
use crate::db::{read, Database};
use crate::error::{Error, Result};
use crate::observability::metrics;
use crate::registry::opener::{DirOpener, ResourceOpener};

/// True when `name` is one or more `[A-Za-z0-9_-]` segments joined by `/`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('/').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        })
}

/// A thread-safe cache of loaded databases keyed by name.
#[derive(Debug)]
pub struct Registry {
    databases: DashMap<String, Arc<Database>>,
    opener: Box<dyn ResourceOpener>,
}

impl Registry {
    /// Create an empty registry reading through `opener`.
    pub fn new(opener: impl ResourceOpener + 'static) -> Self {
        Self {
            databases: DashMap::new(),
            opener: Box::new(opener),
        }
    }

    /// Registry reading `<name>.dat` files from `dir`.
    pub fn with_data_dir(dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(DirOpener::new(dir))
    }

    /// Build a registry from configuration and load its preload list.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        let registry = Self::with_data_dir(config.data_dir.clone());
        registry.preload(&config.preload)?;
        Ok(registry)
    }

    /// Return the database called `name`, loading it on first use.
    pub fn get(&self, name: &str) -> Result<Arc<Database>> {
        if !is_valid_name(name) {
            return Err(Error::InvalidName(name.to_string()));
        }

        if let Some(db) = self.databases.get(name) {
            tracing::debug!(database = name, "Database cache hit");
            metrics::record_cache_hit();
            return Ok(Arc::clone(db.value()));
        }

        tracing::debug!(database = name, "Database cache miss, loading");
        let started = Instant::now();
        let db = match self.load(name) {
            Ok(db) => db,
            Err(e) => {
                tracing::warn!(database = name, error = %e, "Failed to load database");
                metrics::record_load("error");
                return Err(Error::Load {
                    name: name.to_string(),
                    source: Box::new(e),
                });
            }
        };
        let elapsed = started.elapsed();

        tracing::info!(
            database = name,
            nodes = db.node_count(),
            depth = db.depth(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Database loaded"
        );
        metrics::record_load("ok");
        metrics::record_load_duration(elapsed);

        Ok(self.publish(name, db))
    }

    fn load(&self, name: &str) -> Result<Database> {
        let reader = self.opener.open(name)?;
        read(BufReader::new(reader))
    }

    /// Insert unless another caller got there first; return the cached value.
    fn publish(&self, name: &str, db: Database) -> Arc<Database> {
        let cached = {
            let entry = self
                .databases
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(db));
            Arc::clone(entry.value())
        };
        metrics::record_cached_databases(self.databases.len());
        cached
    }

    /// Register an already built database under `name`.
    ///
    /// An existing entry is kept; the cached database is returned.
    pub fn insert(&self, name: &str, db: Database) -> Result<Arc<Database>> {
        if !is_valid_name(name) {
            return Err(Error::InvalidName(name.to_string()));
        }
        Ok(self.publish(name, db))
    }

    /// Load every named database, stopping at the first failure.
    pub fn preload<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        for name in names {
            self.get(name.as_ref())?;
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.databases.contains_key(name)
    }

    /// Number of cached databases.
    pub fn len(&self) -> usize {
        self.databases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }

    /// Names of cached databases, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.databases.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }
}
