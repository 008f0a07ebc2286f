//! SAPI5 TTS CLI
//!
//! Command-line interface for SAPI5 text-to-speech

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{info, warn};

use sapi5_rs::host::split_search_path;
use sapi5_rs::sapi5::types::DEFAULT_ALTERNATE_VOICE;
use sapi5_rs::sapi5::{OsInfo, Synthesizer, VoiceOptions};
use sapi5_rs::{HostProperties, SpeakOptions, SpeechRequest};

#[derive(Parser)]
#[command(name = "sapi5-rs")]
#[command(about = "Text-to-Speech CLI using the Microsoft Speech API 5 voice")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    debug: bool,

    /// Directories searched for the bridge library, in PATH syntax (default: PATH)
    #[arg(long, global = true, env = "SAPI5_LIBRARY_PATH")]
    library_path: Option<OsString>,

    /// Directory holding the bundled bridge libraries
    #[arg(long, global = true, env = "SAPI5_RESOURCE_DIR")]
    resource_dir: Option<PathBuf>,

    /// Override the detected OS name (e.g. "Windows 7")
    #[arg(long, global = true, env = "SAPI5_OS_NAME")]
    os_name: Option<String>,

    /// Override the detected pointer width ("64" selects the x64 library)
    #[arg(long, global = true, env = "SAPI5_POINTER_WIDTH")]
    pointer_width: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List installed SAPI5 voices
    List,

    /// Speak text through the default audio output
    Speak {
        /// Text to speak
        #[arg(short, long)]
        text: String,

        /// Volume, 0-100 (passed through unchecked)
        #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
        volume: i32,

        /// Rate, -10 to 10 (passed through unchecked)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        rate: i32,

        /// Speak with the alternate voice instead of only looking it up
        #[arg(long)]
        apply_voice: bool,

        /// Index of the alternate voice in the installed voice list
        #[arg(long, default_value_t = DEFAULT_ALTERNATE_VOICE)]
        voice_index: i32,
    },
}

impl Cli {
    fn host(&self) -> HostProperties {
        let mut host = HostProperties::detect();
        if let Some(ref path) = self.library_path {
            host.library_path = split_search_path(path);
        }
        if let Some(ref name) = self.os_name {
            host.os = OsInfo::new(name.clone(), host.os.version.clone());
        }
        if let Some(ref width) = self.pointer_width {
            host.pointer_width = width.clone();
        }
        host
    }
}

fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Commands::List => {
            let synth = Synthesizer::new()?;
            let voices = synth.list_voices()?;
            if voices.is_empty() {
                println!("No SAPI5 voices found.");
            } else {
                println!("Installed SAPI5 voices:");
                println!("{:-<70}", "");
                for voice in voices {
                    println!("  [{}] {}", voice.index, voice.description);
                }
                println!("{:-<70}", "");
            }
        }

        Commands::Speak {
            ref text,
            volume,
            rate,
            apply_voice,
            voice_index,
        } => {
            let request = SpeechRequest::new(volume, rate, text.as_str());
            if !request.in_documented_range() {
                warn!(
                    "volume {} / rate {} outside the documented range, passing through",
                    volume, rate
                );
            }

            let options = SpeakOptions {
                host: cli.host(),
                resource_dir: cli.resource_dir.clone(),
                voice: VoiceOptions {
                    apply_alternate: apply_voice,
                    alternate_index: voice_index,
                },
            };

            let outcome = sapi5_rs::speak(&request, &options);
            match &outcome.provisioning {
                Ok(path) => info!("bridge library: {}", path.display()),
                Err(e) => warn!("bridge library not loaded: {}", e),
            }
            if let Err(e) = outcome.speech {
                eprintln!("Speech failed ({}): {}", e.kind(), e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_rate_parses() {
        let cli = Cli::try_parse_from(["sapi5-rs", "speak", "-t", "hi", "--rate", "-5"]).unwrap();
        match cli.command {
            Commands::Speak {
                rate,
                volume,
                apply_voice,
                voice_index,
                ..
            } => {
                assert_eq!(rate, -5);
                assert_eq!(volume, 100);
                assert!(!apply_voice);
                assert_eq!(voice_index, 1);
            }
            Commands::List => panic!("expected speak"),
        }
    }

    #[test]
    fn overrides_replace_detected_host() {
        let cli = Cli::try_parse_from([
            "sapi5-rs",
            "--os-name",
            "Windows 7",
            "--pointer-width",
            "32",
            "list",
        ])
        .unwrap();
        let host = cli.host();
        assert_eq!(host.os.name, "Windows 7");
        assert_eq!(host.pointer_width, "32");
    }
}
