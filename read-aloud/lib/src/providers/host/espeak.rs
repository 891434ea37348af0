//! eSpeak/eSpeak-NG command line handling.
//!
//! Common on Linux systems, also available on macOS and Windows. Voices are
//! selected with `-v <language code>`; the names `--voices` prints are for
//! display only.

use crate::locale::normalize_locale;
use crate::types::{Utterance, Voice};

/// Default eSpeak speaking rate in words per minute.
const BASE_WPM: f32 = 175.0;
/// Default eSpeak pitch (range 0-99).
const BASE_PITCH: f32 = 50.0;
/// Default eSpeak amplitude (range 0-200).
const BASE_AMPLITUDE: f32 = 100.0;

/// Arguments for speaking `utterance`; the text itself goes to stdin.
pub(crate) fn speak_args(utterance: &Utterance) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(voice) = &utterance.voice {
        args.push("-v".to_string());
        args.push(voice.engine_id().to_string());
    }

    let wpm = (BASE_WPM * utterance.rate).round().clamp(80.0, 500.0) as u32;
    let pitch = (BASE_PITCH * utterance.pitch).round().clamp(0.0, 99.0) as u32;
    let amplitude = (BASE_AMPLITUDE * utterance.volume).round().clamp(0.0, 200.0) as u32;

    args.extend([
        "-s".to_string(),
        wpm.to_string(),
        "-p".to_string(),
        pitch.to_string(),
        "-a".to_string(),
        amplitude.to_string(),
    ]);
    args
}

/// Parse the output of `espeak-ng --voices` or `espeak --voices`.
///
/// The output is whitespace separated:
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  af                 -/M    Afrikaans          gmw/af
///  5  en-gb              -/M    English_(GB)       gmw/en-GB
/// ```
///
/// Lines that do not parse are skipped.
pub(crate) fn parse_voices(output: &str) -> Vec<Voice> {
    let mut voices = Vec::new();

    for line in output.lines() {
        if line.trim_start().starts_with("Pty") || line.trim().is_empty() {
            continue;
        }

        if let Some(voice) = parse_voice_line(line) {
            voices.push(voice);
        } else {
            tracing::debug!(line = line, "Skipping unparseable eSpeak voice line");
        }
    }

    voices
}

/// Parse a single line of eSpeak voice output.
///
/// Columns: priority, language code, age/gender, voice name, file, and
/// optionally other languages. The voice name uses underscores for spaces.
fn parse_voice_line(line: &str) -> Option<Voice> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    // Pty, Language, Age/Gender, VoiceName, File
    if parts.len() < 5 {
        return None;
    }

    if parts[0].parse::<u32>().is_err() {
        return None;
    }

    let code = parts[1];
    let name = parts[3].replace('_', " ");
    if code.is_empty() || name.is_empty() {
        return None;
    }

    Some(Voice::new(name, normalize_locale(code)).with_identifier(code))
}
