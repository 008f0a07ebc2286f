//! Process architecture and the bridge file name that goes with it.

use std::fmt;

/// File name of the 64-bit bridge library, both in the bundle and on disk.
pub const LIBRARY_X64: &str = "speechbridge-x64.dll";
/// File name of the 32-bit bridge library.
pub const LIBRARY_X86: &str = "speechbridge-x86.dll";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86,
    X64,
}

impl Arch {
    /// Map a pointer-width property to an architecture.
    ///
    /// Only the exact string `"64"` selects the 64-bit library, every other
    /// value (including an empty or malformed one) falls back to 32-bit.
    pub fn from_pointer_width(width: &str) -> Self {
        if width == "64" { Self::X64 } else { Self::X86 }
    }

    /// Pointer width of the running process, as the platform reports it.
    pub fn host_pointer_width() -> &'static str {
        if cfg!(target_pointer_width = "64") {
            "64"
        } else {
            "32"
        }
    }

    pub fn library_name(self) -> &'static str {
        match self {
            Self::X64 => LIBRARY_X64,
            Self::X86 => LIBRARY_X86,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X86 => write!(f, "x86"),
            Self::X64 => write!(f, "x64"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_width_64_selects_x64() {
        assert_eq!(Arch::from_pointer_width("64"), Arch::X64);
        assert_eq!(Arch::X64.library_name(), LIBRARY_X64);
    }

    #[test]
    fn anything_else_selects_x86() {
        for width in ["32", "", " 64", "64bit", "amd64"] {
            assert_eq!(Arch::from_pointer_width(width), Arch::X86, "{width:?}");
        }
        assert_eq!(Arch::X86.library_name(), LIBRARY_X86);
    }
}
