//! Copy-if-absent staging of the bridge library.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::arch::Arch;
use crate::loader::{LibraryLoader, LoadError};
use crate::payload::PayloadSource;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("no usable directory among {searched} search path entries")]
    NoUsableDirectory { searched: usize },
    #[error("bundled resource {0} not found")]
    ResourceMissing(String),
    #[error("failed to copy bridge library to {path}: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("{loaded} bridge library already loaded, cannot load {requested}")]
    ArchMismatch { loaded: Arch, requested: Arch },
}

pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Result of a successful staging pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staged {
    pub path: PathBuf,
    /// Bytes copied out of the bundle, `None` when the file was already there.
    pub bytes_written: Option<u64>,
}

impl Staged {
    pub fn was_written(&self) -> bool {
        self.bytes_written.is_some()
    }
}

pub struct Provisioner<S, L> {
    search_path: Vec<PathBuf>,
    arch: Arch,
    source: S,
    loader: L,
}

impl<S: PayloadSource, L: LibraryLoader> Provisioner<S, L> {
    pub fn new(search_path: impl IntoIterator<Item = PathBuf>, arch: Arch, source: S, loader: L) -> Self {
        Self {
            search_path: search_path.into_iter().collect(),
            arch,
            source,
            loader,
        }
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// Stage the library and load it.
    pub fn provision(&self) -> Result<Staged> {
        let staged = self.stage()?;
        self.loader.load(&staged.path)?;
        info!("loaded bridge library {}", staged.path.display());
        Ok(staged)
    }

    /// Make sure the library file exists in the first usable search directory.
    ///
    /// A directory is usable when it already holds a readable copy, or when it
    /// is writable and the bundled copy can be written into it. Directories
    /// are tried in order and the first usable one wins.
    pub fn stage(&self) -> Result<Staged> {
        let name = self.arch.library_name();

        for dir in &self.search_path {
            if dir.as_os_str().is_empty() || !dir.is_dir() {
                continue;
            }

            let target = dir.join(name);
            if is_readable_file(&target) {
                info!("bridge library exists, the path is {}", target.display());
                return Ok(Staged {
                    path: target,
                    bytes_written: None,
                });
            }

            if !is_writable_dir(dir) {
                debug!("skipping read-only directory {}", dir.display());
                continue;
            }

            match self.write_resource(name, dir, &target)? {
                Some(staged) => return Ok(staged),
                None => debug!("write refused in {}", dir.display()),
            }
        }

        Err(ProvisionError::NoUsableDirectory {
            searched: self.search_path.len(),
        })
    }

    /// Copy the bundled resource to `target`.
    ///
    /// The bytes go to a temporary file in `dir` first and are renamed into
    /// place only once complete, so `target` never holds a truncated copy.
    /// Returns `Ok(None)` when the OS refuses to create the file, so the caller
    /// can move on to the next directory. Any other failure aborts staging.
    fn write_resource(&self, name: &str, dir: &Path, target: &Path) -> Result<Option<Staged>> {
        let mut resource = self
            .source
            .open(name)
            .ok_or_else(|| ProvisionError::ResourceMissing(name.to_string()))?;

        let copy_error = |source: io::Error| ProvisionError::Copy {
            path: target.to_path_buf(),
            source,
        };

        let mut partial = match tempfile::Builder::new()
            .prefix(".speechbridge")
            .suffix(".part")
            .tempfile_in(dir)
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => return Ok(None),
            Err(e) => return Err(copy_error(e)),
        };

        // On failure `partial` is dropped here, which deletes it.
        let bytes = io::copy(&mut resource, &mut partial).map_err(copy_error)?;
        partial.as_file().sync_all().map_err(copy_error)?;

        match partial.persist_noclobber(target) {
            Ok(_) => {
                info!(
                    "generated new bridge library, the path is {} ({} bytes)",
                    target.display(),
                    bytes
                );
                Ok(Some(Staged {
                    path: target.to_path_buf(),
                    bytes_written: Some(bytes),
                }))
            }
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                info!("bridge library appeared concurrently at {}", target.display());
                Ok(Some(Staged {
                    path: target.to_path_buf(),
                    bytes_written: None,
                }))
            }
            Err(e) => Err(copy_error(e.error)),
        }
    }
}

fn is_readable_file(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}

/// Windows ignores the read-only attribute on directories (Explorer sets it
/// on customised folders), so only the create call can tell there.
#[cfg(windows)]
fn is_writable_dir(_dir: &Path) -> bool {
    true
}

#[cfg(not(windows))]
fn is_writable_dir(dir: &Path) -> bool {
    std::fs::metadata(dir)
        .map(|meta| !meta.permissions().readonly())
        .unwrap_or(false)
}
