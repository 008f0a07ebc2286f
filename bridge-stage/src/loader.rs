//! Loading a staged library into the process.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("loading native libraries is not supported on this platform")]
    Unsupported,
    #[error("failed to load {path}: {message}")]
    Os { path: PathBuf, message: String },
}

pub trait LibraryLoader {
    fn load(&self, path: &Path) -> Result<(), LoadError>;
}

impl<T: LibraryLoader + ?Sized> LibraryLoader for &T {
    fn load(&self, path: &Path) -> Result<(), LoadError> {
        (**self).load(path)
    }
}

/// Loads through the operating system loader.
///
/// The module is never unloaded; a bridge library stays resident for the
/// rest of the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLoader;

#[cfg(windows)]
impl LibraryLoader for SystemLoader {
    fn load(&self, path: &Path) -> Result<(), LoadError> {
        use windows::Win32::System::LibraryLoader::LoadLibraryW;
        use windows::core::PCWSTR;

        let path_str = path.to_string_lossy();
        let wide_path: Vec<u16> = path_str.encode_utf16().chain(std::iter::once(0)).collect();

        unsafe { LoadLibraryW(PCWSTR::from_raw(wide_path.as_ptr())) }
            .map(|_module| ())
            .map_err(|e| LoadError::Os {
                path: path.to_path_buf(),
                message: format!("{:?}", e),
            })
    }
}

#[cfg(not(windows))]
impl LibraryLoader for SystemLoader {
    fn load(&self, _path: &Path) -> Result<(), LoadError> {
        Err(LoadError::Unsupported)
    }
}
