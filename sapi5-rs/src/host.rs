//! Platform properties read at call time.

use std::ffi::OsStr;
use std::path::PathBuf;

use bridge_stage::Arch;

use crate::sapi5::OsInfo;

/// Snapshot of the properties a speak call depends on. Nothing here is
/// cached between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostProperties {
    pub os: OsInfo,
    /// Directories searched for the bridge library, in order.
    pub library_path: Vec<PathBuf>,
    /// `"64"` on 64-bit processes.
    pub pointer_width: String,
}

impl HostProperties {
    pub fn detect() -> Self {
        Self {
            os: OsInfo::detect(),
            library_path: std::env::var_os("PATH")
                .map(|path| split_search_path(&path))
                .unwrap_or_default(),
            pointer_width: Arch::host_pointer_width().to_string(),
        }
    }

    pub fn arch(&self) -> Arch {
        Arch::from_pointer_width(&self.pointer_width)
    }
}

/// Split a search path in the platform's list syntax.
pub fn split_search_path(path: &OsStr) -> Vec<PathBuf> {
    std::env::split_paths(path).collect()
}
