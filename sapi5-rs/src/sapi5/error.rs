use std::fmt;

/// Error types for SAPI5 operations
#[derive(Debug, thiserror::Error)]
pub enum SpeakError {
    #[error("COM initialization failed: {0}")]
    ComInit(String),
    #[error("Failed to create voice: {0}")]
    VoiceCreate(String),
    #[error("Failed to set {name}: {message}")]
    Property { name: &'static str, message: String },
    #[error("Failed to enumerate voices: {0}")]
    EnumerateVoices(String),
    #[error("Failed to look up voice {index}: {message}")]
    VoiceLookup { index: i32, message: String },
    #[error("Failed to speak text: {0}")]
    Speak(String),
    #[error("SAPI speech requires Windows")]
    Unsupported,
}

pub type Result<T> = std::result::Result<T, SpeakError>;

/// Coarse grouping of failures for callers that only want to branch on the
/// kind of problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The bridge library could not be staged or loaded.
    Provisioning,
    /// A COM call on the automation voice failed.
    Automation,
    Unsupported,
}

impl SpeakError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unsupported => ErrorKind::Unsupported,
            _ => ErrorKind::Automation,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provisioning => write!(f, "provisioning"),
            Self::Automation => write!(f, "automation"),
            Self::Unsupported => write!(f, "unsupported"),
        }
    }
}
