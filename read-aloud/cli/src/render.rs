//! Terminal formatting for voices, suggestions and playback status.
//!
//! Colors are only applied when stdout supports them, so piped output stays
//! plain text.

use owo_colors::{OwoColorize, Stream};
use read_aloud::locale::{describe_voice, display_name, flag_for, short_display_name};
use read_aloud::{Carousel, DirectorySummary, PlaybackState, Suggestion, Voice};
use serde::Serialize;

/// Longest excerpt of a suggestion shown on a card.
const EXCERPT_CHARS: usize = 60;

/// "N voices available • M languages supported"
pub fn summary_line(summary: DirectorySummary) -> String {
    format!(
        "{} voices available • {} languages supported",
        summary.voice_count, summary.language_count
    )
}

/// One line per voice: flag, name, locale and description.
pub fn voice_line(voice: &Voice, selected: bool) -> String {
    let marker = if selected { "●" } else { " " };
    format!(
        "{} {} {} {} {}",
        marker.if_supports_color(Stream::Stdout, |t| t.green()),
        flag_for(&voice.lang),
        display_name(voice).if_supports_color(Stream::Stdout, |t| t.bold()),
        format!("({})", voice.lang).if_supports_color(Stream::Stdout, |t| t.dimmed()),
        describe_voice(voice).if_supports_color(Stream::Stdout, |t| t.italic()),
    )
}

/// Label used in voice pickers, where colors would be escaped.
pub fn voice_label(voice: &Voice) -> String {
    format!(
        "{} {} ({}) - {}",
        flag_for(&voice.lang),
        short_display_name(voice),
        voice.lang,
        describe_voice(voice)
    )
}

/// One voice in the `voices --json` listing.
#[derive(Debug, Serialize)]
pub struct VoiceEntry<'a> {
    #[serde(flatten)]
    pub voice: &'a Voice,
    pub flag: &'static str,
    pub description: &'static str,
}

/// The voice list as serializable entries for `voices --json`.
pub fn voices_json(voices: &[Voice]) -> Vec<VoiceEntry<'_>> {
    voices
        .iter()
        .map(|voice| VoiceEntry {
            voice,
            flag: flag_for(&voice.lang),
            description: describe_voice(voice),
        })
        .collect()
}

/// First `EXCERPT_CHARS` characters of `text`, with an ellipsis when cut.
pub fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}

/// The visible window of suggestion cards with its navigation header.
///
/// Card numbers are 1-based positions in the whole catalog.
pub fn suggestion_cards(carousel: &Carousel) -> String {
    let range = carousel.visible_range();
    let back = if carousel.can_retreat() { "◀" } else { " " };
    let forward = if carousel.can_advance() { "▶" } else { " " };

    let mut out = format!(
        "{back} Suggestions {}-{} of {} {forward}\n",
        range.start + 1,
        range.end,
        carousel.total_items()
    );
    for (offset, suggestion) in carousel.visible_slice().iter().enumerate() {
        out.push_str(&suggestion_card(range.start + offset + 1, suggestion));
    }
    out
}

fn suggestion_card(number: usize, suggestion: &Suggestion) -> String {
    format!(
        "  {}. {}\n     {}\n",
        number,
        suggestion.title.if_supports_color(Stream::Stdout, |t| t.bold()),
        excerpt(suggestion.content).if_supports_color(Stream::Stdout, |t| t.dimmed()),
    )
}

/// Playback status for the interactive header.
pub fn status_line(state: PlaybackState, selected: Option<&Voice>) -> String {
    let voice = selected.map_or_else(
        || "platform default voice".to_string(),
        |v| format!("{} {}", flag_for(&v.lang), short_display_name(v)),
    );
    match state {
        PlaybackState::Playing => format!(
            "{} with {voice}",
            "▶ Playing".if_supports_color(Stream::Stdout, |t| t.green())
        ),
        PlaybackState::Idle => format!(
            "{} with {voice}",
            "■ Ready".if_supports_color(Stream::Stdout, |t| t.yellow())
        ),
    }
}
