//! Request and voice types shared by every platform.

use std::ops::RangeInclusive;

/// Volume range the automation voice documents. Not enforced.
pub const VOLUME_RANGE: RangeInclusive<i32> = 0..=100;
/// Rate range the automation voice documents. Not enforced.
pub const RATE_RANGE: RangeInclusive<i32> = -10..=10;

/// Index into the installed voice list looked up on non-legacy releases.
pub const DEFAULT_ALTERNATE_VOICE: i32 = 1;

/// One speak call. Values are handed to SAPI untouched; out-of-range values
/// get whatever treatment the voice gives them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub volume: i32,
    pub rate: i32,
    pub text: String,
}

impl SpeechRequest {
    pub fn new(volume: i32, rate: i32, text: impl Into<String>) -> Self {
        Self {
            volume,
            rate,
            text: text.into(),
        }
    }

    pub fn in_documented_range(&self) -> bool {
        VOLUME_RANGE.contains(&self.volume) && RATE_RANGE.contains(&self.rate)
    }
}

/// How the alternate voice lookup behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceOptions {
    /// Assign the looked-up voice to the speaking object. When false the
    /// lookup only reads the voice description.
    pub apply_alternate: bool,
    pub alternate_index: i32,
}

impl Default for VoiceOptions {
    fn default() -> Self {
        Self {
            apply_alternate: false,
            alternate_index: DEFAULT_ALTERNATE_VOICE,
        }
    }
}

/// An installed voice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    pub index: i32,
    pub description: String,
}
