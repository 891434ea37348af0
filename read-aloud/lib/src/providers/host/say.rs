//! macOS `say` command line handling.

use tracing::trace;

use crate::locale::normalize_locale;
use crate::types::{Utterance, Voice};

/// Default `say` speaking rate in words per minute.
const BASE_WPM: f32 = 175.0;

/// Arguments for speaking `utterance`; the text itself goes to stdin.
///
/// `say` has no pitch or volume flags, so only voice and rate are passed.
pub(crate) fn speak_args(utterance: &Utterance) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(voice) = &utterance.voice {
        args.push("-v".to_string());
        args.push(voice.engine_id().to_string());
    }

    let wpm = (BASE_WPM * utterance.rate).round().clamp(50.0, 700.0) as u32;
    args.push("-r".to_string());
    args.push(wpm.to_string());
    args
}

/// Parse the output of `say -v '?'`.
pub(crate) fn parse_voices(output: &str) -> Vec<Voice> {
    output.lines().filter_map(parse_voice_line).collect()
}

/// Parse a single line of `say -v '?'` output.
///
/// The format is:
/// ```text
/// VoiceName           locale    # Sample text
/// VoiceName (Qualifier) locale  # Sample text
/// ```
fn parse_voice_line(line: &str) -> Option<Voice> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    // Everything after '#' is sample text
    let metadata = line.split('#').next()?.trim();

    // The locale is the last token; the name is everything before it and
    // may contain spaces and parentheses.
    let locale = metadata.split_whitespace().last()?;
    let name_end = metadata.rfind(locale)?;
    let name = metadata[..name_end].trim();

    if name.is_empty() {
        trace!(line = line, "Skipping say voice line with empty name");
        return None;
    }

    // `say` identifies voices by the full name, qualifiers included.
    Some(Voice::new(name, normalize_locale(locale)))
}
