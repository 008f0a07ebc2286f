//! Host OS identification and the coarse release classification that decides
//! whether the alternate voice lookup runs.

use std::fmt;

/// OS name and version as the platform reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsInfo {
    pub name: String,
    pub version: String,
}

impl OsInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    #[cfg(windows)]
    pub fn detect() -> Self {
        use windows::Wdk::System::SystemServices::RtlGetVersion;
        use windows::Win32::System::SystemInformation::OSVERSIONINFOW;

        let mut info = OSVERSIONINFOW {
            dwOSVersionInfoSize: std::mem::size_of::<OSVERSIONINFOW>() as u32,
            ..Default::default()
        };
        let status = unsafe { RtlGetVersion(&mut info) };
        if status.is_err() {
            log::debug!("RtlGetVersion failed: {:?}", status);
            return Self::new("Windows", "");
        }

        Self::new(
            windows_release_name(info.dwMajorVersion, info.dwMinorVersion, info.dwBuildNumber),
            format!("{}.{}", info.dwMajorVersion, info.dwMinorVersion),
        )
    }

    #[cfg(not(windows))]
    pub fn detect() -> Self {
        Self::new(std::env::consts::OS, "")
    }
}

/// Marketing name of a Windows release from its kernel version numbers.
pub fn windows_release_name(major: u32, minor: u32, build: u32) -> String {
    match (major, minor) {
        (5, 1) => "Windows XP".to_string(),
        (6, 0) => "Windows Vista".to_string(),
        (6, 1) => "Windows 7".to_string(),
        (6, 2) => "Windows 8".to_string(),
        (6, 3) => "Windows 8.1".to_string(),
        (10, 0) if build >= 22000 => "Windows 11".to_string(),
        (10, 0) => "Windows 10".to_string(),
        _ => format!("Windows NT {}.{}", major, minor),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsVariant {
    /// Windows 7: speak with the default voice only.
    Legacy,
    /// Anything not matched below.
    Standard,
    Windows81,
}

impl OsVariant {
    /// Only the OS name matters; the version is carried for logging.
    pub fn classify(os: &OsInfo) -> Self {
        if os.name.trim().eq_ignore_ascii_case("Windows 7") {
            Self::Legacy
        } else if os.name.starts_with("Windows 8.1") {
            Self::Windows81
        } else {
            Self::Standard
        }
    }

    pub fn looks_up_alternate_voice(self) -> bool {
        self != Self::Legacy
    }
}

impl fmt::Display for OsVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Standard => write!(f, "standard"),
            Self::Windows81 => write!(f, "windows-8.1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(name: &str) -> OsVariant {
        OsVariant::classify(&OsInfo::new(name, "6.1"))
    }

    #[test]
    fn windows_7_in_any_case_is_legacy() {
        assert_eq!(classify("Windows 7"), OsVariant::Legacy);
        assert_eq!(classify("WINDOWS 7"), OsVariant::Legacy);
        assert_eq!(classify("windows 7"), OsVariant::Legacy);
        assert_eq!(classify("  Windows 7 "), OsVariant::Legacy);
    }

    #[test]
    fn windows_7_match_is_exact() {
        assert_eq!(classify("Windows 7 Professional"), OsVariant::Standard);
        assert_eq!(classify("Windows 70"), OsVariant::Standard);
    }

    #[test]
    fn windows_8_1_prefix() {
        assert_eq!(classify("Windows 8.1"), OsVariant::Windows81);
        assert_eq!(classify("Windows 8.1 Pro"), OsVariant::Windows81);
        // prefix match is case sensitive and untrimmed
        assert_eq!(classify("windows 8.1"), OsVariant::Standard);
        assert_eq!(classify(" Windows 8.1"), OsVariant::Standard);
    }

    #[test]
    fn everything_else_is_standard() {
        for name in ["Windows 10", "Windows XP", "Windows 8", "Windows 11", "linux", ""] {
            assert_eq!(classify(name), OsVariant::Standard, "{name:?}");
        }
    }

    #[test]
    fn version_is_ignored() {
        let a = OsVariant::classify(&OsInfo::new("Windows 7", "6.1"));
        let b = OsVariant::classify(&OsInfo::new("Windows 7", "10.0"));
        assert_eq!(a, b);
    }

    #[test]
    fn only_legacy_skips_alternate_voice() {
        assert!(!OsVariant::Legacy.looks_up_alternate_voice());
        assert!(OsVariant::Standard.looks_up_alternate_voice());
        assert!(OsVariant::Windows81.looks_up_alternate_voice());
    }

    #[test]
    fn release_names() {
        assert_eq!(windows_release_name(6, 1, 7601), "Windows 7");
        assert_eq!(windows_release_name(6, 3, 9600), "Windows 8.1");
        assert_eq!(windows_release_name(10, 0, 19045), "Windows 10");
        assert_eq!(windows_release_name(10, 0, 22631), "Windows 11");
        assert_eq!(windows_release_name(4, 0, 1381), "Windows NT 4.0");
    }

    #[test]
    fn release_names_feed_classification() {
        let os = OsInfo::new(windows_release_name(6, 1, 7601), "6.1");
        assert_eq!(OsVariant::classify(&os), OsVariant::Legacy);
        let os = OsInfo::new(windows_release_name(6, 3, 9600), "6.3");
        assert_eq!(OsVariant::classify(&os), OsVariant::Windows81);
    }
}
