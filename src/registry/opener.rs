//! Resource access for the registry.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::PathBuf;

/// Capability to open the text of a named database.
pub trait ResourceOpener: Send + Sync + fmt::Debug {
    /// Open the resource backing `name`.
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + Send>>;
}

/// Reads `<root>/<name>.dat` from the filesystem.
#[derive(Debug, Clone)]
pub struct DirOpener {
    root: PathBuf,
}

impl DirOpener {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file backing `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.dat"))
    }
}

impl ResourceOpener for DirOpener {
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + Send>> {
        let path = self.path_for(name);
        let file = File::open(&path).map_err(|e| {
            io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
        })?;
        Ok(Box::new(file))
    }
}

/// Databases compiled into the crate.
const BUNDLED: &[(&str, &str)] = &[("example", include_str!("../../data/example.dat"))];

/// Serves database text from memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryOpener {
    resources: HashMap<String, String>,
}

impl MemoryOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opener over the databases shipped in `data/`, embedded at build time.
    pub fn bundled() -> Self {
        BUNDLED
            .iter()
            .fold(Self::new(), |opener, (name, text)| opener.with(*name, *text))
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.resources.insert(name.into(), text.into());
    }
}

impl ResourceOpener for MemoryOpener {
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + Send>> {
        match self.resources.get(name) {
            Some(text) => Ok(Box::new(Cursor::new(text.clone().into_bytes()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no resource named {name:?}"),
            )),
        }
    }
}
