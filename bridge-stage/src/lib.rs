//! Native bridge library staging.
//!
//! The bridge library ships inside a resource bundle. Before it can be loaded
//! it has to sit in a directory on the library search path, so this crate
//! walks the search path, copies the architecture-matched file into the first
//! usable directory (unless a copy is already there) and loads it.
//!
//! # Example
//!
//! ```ignore
//! use bridge_stage::{Arch, DirectorySource, Provisioner, SystemLoader};
//!
//! let search_path = std::env::split_paths(&std::env::var_os("PATH").unwrap()).collect::<Vec<_>>();
//! let provisioner = Provisioner::new(
//!     search_path,
//!     Arch::from_pointer_width(Arch::host_pointer_width()),
//!     DirectorySource::new("resources"),
//!     SystemLoader,
//! );
//! let path = bridge_stage::ensure_loaded(&provisioner)?;
//! ```

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use log::debug;

mod arch;
mod loader;
pub mod payload;
mod provision;

pub use arch::{Arch, LIBRARY_X64, LIBRARY_X86};
pub use loader::{LibraryLoader, LoadError, SystemLoader};
pub use payload::{DirectorySource, EmbeddedSource, PayloadSource};
pub use provision::{ProvisionError, Provisioner, Result, Staged};

/// Architecture and path of the bridge library loaded into this process.
static LOADED: Mutex<Option<(Arch, PathBuf)>> = Mutex::new(None);

/// Provision the bridge library once per process.
///
/// After the first success later calls return the recorded path without
/// touching the filesystem, whatever search path the provisioner carries.
/// A provisioner for a different architecture than the loaded one gets
/// [`ProvisionError::ArchMismatch`]. Failures are not recorded, so the next
/// call runs the whole staging pass again. Holding the lock across staging
/// keeps two threads from copying into the same file at once.
pub fn ensure_loaded<S: PayloadSource, L: LibraryLoader>(
    provisioner: &Provisioner<S, L>,
) -> Result<PathBuf> {
    let mut loaded = LOADED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some((arch, path)) = loaded.as_ref() {
        if *arch != provisioner.arch() {
            return Err(ProvisionError::ArchMismatch {
                loaded: *arch,
                requested: provisioner.arch(),
            });
        }
        debug!("bridge library already loaded from {}", path.display());
        return Ok(path.clone());
    }

    let staged = provisioner.provision()?;
    *loaded = Some((provisioner.arch(), staged.path.clone()));
    Ok(staged.path)
}

/// Path recorded by a successful [`ensure_loaded`].
pub fn loaded_library() -> Option<PathBuf> {
    LOADED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(|(_, path)| path.clone())
}
