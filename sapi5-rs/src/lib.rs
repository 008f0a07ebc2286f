//! Windows text-to-speech through the SAPI5 automation voice.
//!
//! Each call stages the bundled bridge library onto the library search path
//! (see [`bridge_stage`]), then creates an `SpVoice`, applies volume and rate
//! and speaks synchronously.
//!
//! ```ignore
//! use sapi5_rs::{speak, SpeakOptions, SpeechRequest};
//!
//! let outcome = speak(&SpeechRequest::new(80, 0, "Hello"), &SpeakOptions::detect());
//! if !outcome.is_success() {
//!     eprintln!("{:?}", outcome.error_kind());
//! }
//! ```

pub mod host;
pub mod sapi5;
mod speak;

pub use host::HostProperties;
pub use sapi5::{ErrorKind, SpeakError, SpeechRequest};
pub use speak::{speak, speak_or_log, SpeakOptions, SpeakOutcome};
