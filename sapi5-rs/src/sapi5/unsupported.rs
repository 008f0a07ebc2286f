//! Stand-in synthesizer for hosts without SAPI.

#![cfg(not(windows))]

use super::error::{Result, SpeakError};
use super::os::OsVariant;
use super::types::{SpeechRequest, VoiceInfo, VoiceOptions};

pub struct Synthesizer {
    _private: (),
}

impl Synthesizer {
    pub fn new() -> Result<Self> {
        Err(SpeakError::Unsupported)
    }

    pub fn speak(
        &self,
        _request: &SpeechRequest,
        _variant: OsVariant,
        _voice_options: &VoiceOptions,
    ) -> Result<()> {
        Err(SpeakError::Unsupported)
    }

    pub fn list_voices(&self) -> Result<Vec<VoiceInfo>> {
        Err(SpeakError::Unsupported)
    }
}
