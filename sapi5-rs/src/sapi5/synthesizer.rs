//! SAPI5 automation voice
//!
//! Drives `SpVoice` through its automation interface (`ISpeechVoice`). Every
//! interface pointer obtained here is released when it goes out of scope, on
//! the error paths as well.

#![cfg(windows)]

use log::debug;
use windows::core::{BSTR, HRESULT};
use windows::Win32::Foundation::RPC_E_CHANGED_MODE;
use windows::Win32::Media::Speech::{ISpeechObjectToken, ISpeechVoice, SpVoice, SVSFDefault};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_APARTMENTTHREADED,
};

use super::error::{Result, SpeakError};
use super::os::OsVariant;
use super::types::{SpeechRequest, VoiceInfo, VoiceOptions};

/// Locale argument for `GetDescription`: the user default.
const DEFAULT_LOCALE: i32 = 0;

/// SAPI5 TTS Synthesizer
///
/// Initializes COM for the calling thread if the caller has not, and undoes
/// only its own initialization when dropped.
pub struct Synthesizer {
    com_initialized: bool,
}

impl Synthesizer {
    /// Create a new synthesizer, initializing COM
    ///
    /// A thread already running a multithreaded apartment keeps it; `SpVoice`
    /// works there too.
    pub fn new() -> Result<Self> {
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        Ok(Self {
            com_initialized: owns_com_init(hr)?,
        })
    }

    /// Whether dropping this synthesizer balances a COM initialization.
    pub fn owns_com(&self) -> bool {
        self.com_initialized
    }

    fn create_voice(&self) -> Result<ISpeechVoice> {
        unsafe { CoCreateInstance(&SpVoice, None, CLSCTX_ALL) }
            .map_err(|e| SpeakError::VoiceCreate(format!("{:?}", e)))
    }

    /// Speak `request.text` and block until the voice is done.
    pub fn speak(
        &self,
        request: &SpeechRequest,
        variant: OsVariant,
        voice_options: &VoiceOptions,
    ) -> Result<()> {
        let voice = self.create_voice()?;

        unsafe {
            voice.SetVolume(request.volume).map_err(|e| SpeakError::Property {
                name: "Volume",
                message: format!("{:?}", e),
            })?;
            voice.SetRate(request.rate).map_err(|e| SpeakError::Property {
                name: "Rate",
                message: format!("{:?}", e),
            })?;
        }

        if variant.looks_up_alternate_voice() {
            let index = voice_options.alternate_index;
            let token = alternate_voice(&voice, index)?;
            let description = unsafe { token.GetDescription(DEFAULT_LOCALE) }
                .map_err(|e| SpeakError::VoiceLookup {
                    index,
                    message: format!("{:?}", e),
                })?;
            debug!("voice {} on {}: {}", index, variant, description);

            if voice_options.apply_alternate {
                unsafe { voice.putref_Voice(&token) }.map_err(|e| SpeakError::Property {
                    name: "Voice",
                    message: format!("{:?}", e),
                })?;
                debug!("speaking with {}", description);
            }
        }

        let text = BSTR::from(request.text.as_str());
        unsafe { voice.Speak(&text, SVSFDefault) }
            .map_err(|e| SpeakError::Speak(format!("{:?}", e)))?;

        Ok(())
    }

    /// List all installed voices
    pub fn list_voices(&self) -> Result<Vec<VoiceInfo>> {
        let voice = self.create_voice()?;

        unsafe {
            let tokens = voice
                .GetVoices(&BSTR::new(), &BSTR::new())
                .map_err(|e| SpeakError::EnumerateVoices(format!("{:?}", e)))?;
            let count = tokens
                .Count()
                .map_err(|e| SpeakError::EnumerateVoices(format!("{:?}", e)))?;

            let mut voices = Vec::with_capacity(count.max(0) as usize);
            for index in 0..count {
                let token = tokens.Item(index).map_err(|e| SpeakError::VoiceLookup {
                    index,
                    message: format!("{:?}", e),
                })?;
                let description = token.GetDescription(DEFAULT_LOCALE).map_err(|e| {
                    SpeakError::VoiceLookup {
                        index,
                        message: format!("{:?}", e),
                    }
                })?;
                voices.push(VoiceInfo {
                    index,
                    description: description.to_string(),
                });
            }

            Ok(voices)
        }
    }
}

/// Fetch the voice token at `index` of the installed voice list.
fn alternate_voice(voice: &ISpeechVoice, index: i32) -> Result<ISpeechObjectToken> {
    unsafe {
        let tokens = voice
            .GetVoices(&BSTR::new(), &BSTR::new())
            .map_err(|e| SpeakError::EnumerateVoices(format!("{:?}", e)))?;
        tokens.Item(index).map_err(|e| SpeakError::VoiceLookup {
            index,
            message: format!("{:?}", e),
        })
    }
}

/// `S_OK` and `S_FALSE` both count as an initialization to undo.
/// `RPC_E_CHANGED_MODE` means the thread already runs COM in another mode.
fn owns_com_init(hr: HRESULT) -> Result<bool> {
    if hr == RPC_E_CHANGED_MODE {
        debug!("COM already initialized in another apartment mode");
        Ok(false)
    } else if hr.is_err() {
        Err(SpeakError::ComInit(format!("HRESULT: {:?}", hr)))
    } else {
        Ok(true)
    }
}

impl Drop for Synthesizer {
    fn drop(&mut self) {
        if self.com_initialized {
            unsafe {
                CoUninitialize();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::Foundation::{E_OUTOFMEMORY, S_FALSE, S_OK};
    use windows::Win32::System::Com::COINIT_MULTITHREADED;

    #[test]
    fn init_results() {
        assert!(owns_com_init(S_OK).unwrap());
        assert!(owns_com_init(S_FALSE).unwrap());
        assert!(!owns_com_init(RPC_E_CHANGED_MODE).unwrap());
        assert!(matches!(
            owns_com_init(E_OUTOFMEMORY),
            Err(SpeakError::ComInit(_))
        ));
    }

    #[test]
    fn works_inside_multithreaded_apartment() {
        std::thread::spawn(|| unsafe {
            CoInitializeEx(None, COINIT_MULTITHREADED).ok().unwrap();
            {
                let synth = Synthesizer::new().unwrap();
                assert!(!synth.owns_com());
            }
            // still initialized: the synthesizer left the caller's apartment alone
            assert_eq!(CoInitializeEx(None, COINIT_MULTITHREADED), S_FALSE);
            CoUninitialize();
            CoUninitialize();
        })
        .join()
        .unwrap();
    }
}
