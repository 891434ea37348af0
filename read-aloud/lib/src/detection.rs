//! Speech engine detection.
//!
//! An explicit [`EngineChoice`] is honored when its executable exists.
//! `Auto` probes the host in priority order:
//! - **macOS**: `say`, `espeak-ng`, `espeak`
//! - **elsewhere**: `espeak-ng`, `espeak`

use crate::config::EngineChoice;
use crate::providers::host::HostEngine;

/// eSpeak executables in preference order.
const ESPEAK_BINARIES: [&str; 2] = ["espeak-ng", "espeak"];

/// Find the engine to use for `choice`, or `None` when speech is unavailable.
///
/// ## Examples
///
/// ```
/// use read_aloud::{detect_engine, EngineChoice};
///
/// assert!(detect_engine(EngineChoice::None).is_none());
/// ```
pub fn detect_engine(choice: EngineChoice) -> Option<HostEngine> {
    detect_with(choice, |binary| which::which(binary).is_ok())
}

fn detect_with(choice: EngineChoice, installed: impl Fn(&str) -> bool) -> Option<HostEngine> {
    let found = match choice {
        EngineChoice::None => return None,
        EngineChoice::ESpeak => find_espeak(&installed),
        EngineChoice::Say => installed("say").then_some(HostEngine::Say),
        EngineChoice::Auto => {
            let say = (cfg!(target_os = "macos") && installed("say")).then_some(HostEngine::Say);
            say.or_else(|| find_espeak(&installed))
        }
    };

    match &found {
        Some(engine) => tracing::debug!(
            engine = engine.name(),
            binary = engine.binary(),
            "Detected speech engine"
        ),
        None if choice == EngineChoice::Auto => {
            tracing::info!("No speech engine found on this host")
        }
        None => tracing::warn!(engine = %choice, "Requested speech engine is not installed"),
    }
    found
}

fn find_espeak(installed: &impl Fn(&str) -> bool) -> Option<HostEngine> {
    ESPEAK_BINARIES
        .iter()
        .find(|binary| installed(binary))
        .map(|binary| HostEngine::ESpeak {
            binary: binary.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(names: &'static [&'static str]) -> impl Fn(&str) -> bool {
        move |binary| names.iter().any(|name| *name == binary)
    }

    #[test]
    fn test_none_never_probes() {
        let probe = |_: &str| -> bool { panic!("should not probe") };
        assert!(detect_with(EngineChoice::None, probe).is_none());
    }

    #[test]
    fn test_espeak_prefers_espeak_ng() {
        assert_eq!(
            detect_with(EngineChoice::ESpeak, only(&["espeak", "espeak-ng"])),
            Some(HostEngine::ESpeak {
                binary: "espeak-ng".to_string()
            })
        );
        assert_eq!(
            detect_with(EngineChoice::ESpeak, only(&["espeak"])),
            Some(HostEngine::ESpeak {
                binary: "espeak".to_string()
            })
        );
    }

    #[test]
    fn test_explicit_choice_missing_is_none() {
        assert!(detect_with(EngineChoice::ESpeak, only(&["say"])).is_none());
        assert!(detect_with(EngineChoice::Say, only(&["espeak-ng"])).is_none());
    }

    #[test]
    fn test_explicit_say() {
        assert_eq!(
            detect_with(EngineChoice::Say, only(&["say"])),
            Some(HostEngine::Say)
        );
    }

    #[test]
    fn test_auto_with_nothing_installed() {
        assert!(detect_with(EngineChoice::Auto, only(&[])).is_none());
    }

    #[test]
    fn test_auto_falls_back_to_espeak() {
        assert_eq!(
            detect_with(EngineChoice::Auto, only(&["espeak"])),
            Some(HostEngine::ESpeak {
                binary: "espeak".to_string()
            })
        );
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_auto_prefers_say_on_macos() {
        assert_eq!(
            detect_with(EngineChoice::Auto, only(&["say", "espeak-ng"])),
            Some(HostEngine::Say)
        );
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_auto_ignores_say_off_macos() {
        assert!(detect_with(EngineChoice::Auto, only(&["say"])).is_none());
    }
}
