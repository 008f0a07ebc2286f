//! Where the bundled library bytes come from.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::PathBuf;

/// A bundle of named resources the provisioner can copy out of.
pub trait PayloadSource {
    /// Open the resource called `name`, or `None` if the bundle lacks it.
    fn open(&self, name: &str) -> Option<Box<dyn Read + '_>>;
}

impl<T: PayloadSource + ?Sized> PayloadSource for &T {
    fn open(&self, name: &str) -> Option<Box<dyn Read + '_>> {
        (**self).open(name)
    }
}

/// Resources stored as plain files in a bundle directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `resources/` next to the running executable.
    pub fn beside_executable() -> Option<Self> {
        let exe = std::env::current_exe().ok()?;
        Some(Self::new(exe.parent()?.join("resources")))
    }
}

impl PayloadSource for DirectorySource {
    fn open(&self, name: &str) -> Option<Box<dyn Read + '_>> {
        let file = File::open(self.root.join(name)).ok()?;
        Some(Box::new(file))
    }
}

/// Resources held in memory, typically from `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedSource {
    entries: HashMap<String, &'static [u8]>,
}

impl EmbeddedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, bytes: &'static [u8]) -> Self {
        self.entries.insert(name.into(), bytes);
        self
    }
}

impl PayloadSource for EmbeddedSource {
    fn open(&self, name: &str) -> Option<Box<dyn Read + '_>> {
        let bytes = *self.entries.get(name)?;
        Some(Box::new(Cursor::new(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_source_reads_back_entry() {
        let source = EmbeddedSource::new().with("a.dll", b"abc");
        let mut out = Vec::new();
        source.open("a.dll").unwrap().read_to_end(&mut out).unwrap();
        assert_eq!(out, b"abc");
        assert!(source.open("b.dll").is_none());
    }

    #[test]
    fn directory_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(source.open("speechbridge-x64.dll").is_none());

        std::fs::write(dir.path().join("speechbridge-x64.dll"), b"MZ").unwrap();
        assert!(source.open("speechbridge-x64.dll").is_some());
    }
}
