//! One speak call: stage the bridge library, then drive the voice.

use std::path::PathBuf;

use bridge_stage::{DirectorySource, ProvisionError, Provisioner, SystemLoader};
use log::{debug, error};

use crate::host::HostProperties;
use crate::sapi5::{ErrorKind, OsVariant, SpeakError, SpeechRequest, Synthesizer, VoiceOptions};

/// Everything a speak call reads besides the request itself.
#[derive(Debug, Clone)]
pub struct SpeakOptions {
    pub host: HostProperties,
    /// Bundle directory holding the bridge libraries. `None` means
    /// `resources/` next to the executable.
    pub resource_dir: Option<PathBuf>,
    pub voice: VoiceOptions,
}

impl SpeakOptions {
    pub fn detect() -> Self {
        Self::for_host(HostProperties::detect())
    }

    pub fn for_host(host: HostProperties) -> Self {
        Self {
            host,
            resource_dir: None,
            voice: VoiceOptions::default(),
        }
    }

    fn payload(&self) -> DirectorySource {
        match &self.resource_dir {
            Some(dir) => DirectorySource::new(dir),
            None => DirectorySource::beside_executable()
                .unwrap_or_else(|| DirectorySource::new("resources")),
        }
    }
}

/// What happened during a speak call.
///
/// A provisioning failure does not stop the speech attempt, so both results
/// are always filled in.
#[derive(Debug)]
pub struct SpeakOutcome {
    pub variant: OsVariant,
    pub provisioning: Result<PathBuf, ProvisionError>,
    pub speech: Result<(), SpeakError>,
}

impl SpeakOutcome {
    /// True when the text was spoken, whatever became of the bridge library.
    pub fn is_success(&self) -> bool {
        self.speech.is_ok()
    }

    /// Kind of the failure that matters most: the speech failure if there is
    /// one, else a provisioning failure.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match (&self.speech, &self.provisioning) {
            (Err(e), _) => Some(e.kind()),
            (Ok(()), Err(_)) => Some(ErrorKind::Provisioning),
            (Ok(()), Ok(_)) => None,
        }
    }
}

/// Speak `request`, reporting every failure to the caller.
pub fn speak(request: &SpeechRequest, options: &SpeakOptions) -> SpeakOutcome {
    let provisioning = ensure_bridge(options);
    if let Err(e) = &provisioning {
        debug!("continuing without bridge library: {}", e);
    }

    let variant = OsVariant::classify(&options.host.os);
    debug!(
        "os {} {} classified as {}",
        options.host.os.name, options.host.os.version, variant
    );

    let speech = Synthesizer::new().and_then(|synth| synth.speak(request, variant, &options.voice));

    SpeakOutcome {
        variant,
        provisioning,
        speech,
    }
}

/// Speak with the detected host settings. Never fails: errors are logged.
pub fn speak_or_log(volume: i32, rate: i32, text: &str) {
    let outcome = speak(&SpeechRequest::new(volume, rate, text), &SpeakOptions::detect());
    if let Err(e) = &outcome.provisioning {
        error!("load bridge library error: {}", e);
    }
    if let Err(e) = &outcome.speech {
        error!("speak error: {}", e);
    }
}

fn ensure_bridge(options: &SpeakOptions) -> Result<PathBuf, ProvisionError> {
    let provisioner = Provisioner::new(
        options.host.library_path.iter().cloned(),
        options.host.arch(),
        options.payload(),
        SystemLoader,
    );
    bridge_stage::ensure_loaded(&provisioner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(
        provisioning: Result<PathBuf, ProvisionError>,
        speech: Result<(), SpeakError>,
    ) -> SpeakOutcome {
        SpeakOutcome {
            variant: OsVariant::Standard,
            provisioning,
            speech,
        }
    }

    #[test]
    fn spoken_without_bridge_reports_provisioning() {
        let result = outcome(Err(ProvisionError::NoUsableDirectory { searched: 0 }), Ok(()));
        assert!(result.is_success());
        assert_eq!(result.error_kind(), Some(ErrorKind::Provisioning));
    }

    #[test]
    fn speech_failure_outranks_provisioning() {
        let result = outcome(
            Err(ProvisionError::NoUsableDirectory { searched: 0 }),
            Err(SpeakError::Speak("E_FAIL".to_string())),
        );
        assert!(!result.is_success());
        assert_eq!(result.error_kind(), Some(ErrorKind::Automation));
    }

    #[test]
    fn clean_run_has_no_error_kind() {
        let result = outcome(Ok(PathBuf::from("speechbridge-x64.dll")), Ok(()));
        assert!(result.is_success());
        assert_eq!(result.error_kind(), None);
    }
}
