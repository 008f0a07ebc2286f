//! SAPI5 - Microsoft Speech API 5 automation voice for Rust
//!
//! Thin wrapper over the `SpVoice` automation object: set volume and rate,
//! optionally look up an alternate voice, speak synchronously.

mod error;
pub mod os;
pub mod types;

#[cfg(windows)]
mod synthesizer;

#[cfg(not(windows))]
mod unsupported;

pub use error::{ErrorKind, Result, SpeakError};
pub use os::{OsInfo, OsVariant};
pub use types::{SpeechRequest, VoiceInfo, VoiceOptions};

#[cfg(windows)]
pub use synthesizer::Synthesizer;

#[cfg(not(windows))]
pub use unsupported::Synthesizer;
