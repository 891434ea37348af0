//! The directory of voices reported by the platform.
//!
//! The directory keeps voices sorted by `(lang, name)` and tracks the
//! selected voice by name. After every [`VoiceDirectory::refresh`] the
//! selection names a voice in the new set, or is unset when the set is empty.

use std::collections::BTreeSet;

use crate::locale::language_prefix;
use crate::types::Voice;

/// Voice count and distinct language count for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectorySummary {
    pub voice_count: usize,
    pub language_count: usize,
}

/// The current voice set and selection.
#[derive(Debug, Clone, Default)]
pub struct VoiceDirectory {
    voices: Vec<Voice>,
    selected: Option<String>,
}

impl VoiceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the voice set with `raw_voices`, sorted by `(lang, name)`.
    ///
    /// If the selection is unset or no longer present, the default voice is
    /// selected: the first voice whose locale starts with `en`, otherwise
    /// the first voice.
    pub fn refresh(&mut self, raw_voices: Vec<Voice>) {
        let mut voices = raw_voices;
        voices.sort_by(|a, b| a.lang.cmp(&b.lang).then_with(|| a.name.cmp(&b.name)));
        self.voices = voices;

        let still_present = self
            .selected
            .as_deref()
            .is_some_and(|name| self.find(name).is_some());

        if !still_present {
            let previous = self.selected.take();
            self.selected = default_voice(&self.voices).map(|v| v.name.clone());
            if previous.is_some() {
                tracing::debug!(
                    previous = previous.as_deref(),
                    selected = self.selected.as_deref(),
                    "Selected voice no longer available, falling back to default"
                );
            }
        }

        tracing::debug!(
            voice_count = self.voices.len(),
            selected = self.selected.as_deref(),
            "Voice directory refreshed"
        );
    }

    /// Select a voice by name.
    ///
    /// The name is not validated. Selecting a name that is not in the
    /// directory is accepted, and [`selected_voice`](Self::selected_voice)
    /// then resolves to `None`.
    pub fn select(&mut self, name: impl Into<String>) {
        self.selected = Some(name.into());
    }

    /// The selected name, as set.
    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected voice, if its name resolves in the current set.
    pub fn selected_voice(&self) -> Option<&Voice> {
        self.selected.as_deref().and_then(|name| self.find(name))
    }

    pub fn find(&self, name: &str) -> Option<&Voice> {
        self.voices.iter().find(|v| v.name == name)
    }

    /// Voices in `(lang, name)` order.
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn summary(&self) -> DirectorySummary {
        let languages: BTreeSet<String> =
            self.voices.iter().map(|v| language_prefix(&v.lang)).collect();
        DirectorySummary {
            voice_count: self.voices.len(),
            language_count: languages.len(),
        }
    }
}

/// The first English voice, otherwise the first voice.
fn default_voice(sorted: &[Voice]) -> Option<&Voice> {
    sorted
        .iter()
        .find(|v| v.lang.starts_with("en"))
        .or_else(|| sorted.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(name: &str, lang: &str) -> Voice {
        Voice::new(name, lang)
    }

    #[test]
    fn test_empty_refresh_has_no_selection() {
        let mut directory = VoiceDirectory::new();
        directory.refresh(Vec::new());
        assert!(directory.is_empty());
        assert!(directory.selected_name().is_none());
        assert!(directory.selected_voice().is_none());
    }

    #[test]
    fn test_refresh_sorts_by_lang_then_name() {
        let mut directory = VoiceDirectory::new();
        directory.refresh(vec![
            voice("Thomas", "fr-FR"),
            voice("Samantha", "en-US"),
            voice("Daniel", "en-GB"),
            voice("Alex", "en-US"),
        ]);
        let names: Vec<_> = directory.voices().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["Daniel", "Alex", "Samantha", "Thomas"]);
    }

    #[test]
    fn test_english_preferred_regardless_of_position() {
        let mut directory = VoiceDirectory::new();
        directory.refresh(vec![voice("A", "fr-FR"), voice("B", "en-US")]);
        assert_eq!(directory.selected_name(), Some("B"));
    }

    #[test]
    fn test_english_beats_earlier_sorted_languages() {
        let mut directory = VoiceDirectory::new();
        directory.refresh(vec![voice("Maged", "ar-SA"), voice("Karen", "en-AU")]);
        assert_eq!(directory.voices()[0].name, "Maged");
        assert_eq!(directory.selected_name(), Some("Karen"));
    }

    #[test]
    fn test_first_voice_when_no_english() {
        let mut directory = VoiceDirectory::new();
        directory.refresh(vec![voice("Thomas", "fr-FR"), voice("Anna", "de-DE")]);
        assert_eq!(directory.selected_name(), Some("Anna"));
    }

    #[test]
    fn test_selection_survives_refresh_when_present() {
        let mut directory = VoiceDirectory::new();
        directory.refresh(vec![voice("Alex", "en-US"), voice("Thomas", "fr-FR")]);
        directory.select("Thomas");
        directory.refresh(vec![
            voice("Thomas", "fr-FR"),
            voice("Alex", "en-US"),
            voice("Anna", "de-DE"),
        ]);
        assert_eq!(directory.selected_name(), Some("Thomas"));
    }

    #[test]
    fn test_selection_falls_back_when_removed() {
        let mut directory = VoiceDirectory::new();
        directory.refresh(vec![voice("Alex", "en-US"), voice("Thomas", "fr-FR")]);
        directory.select("Thomas");
        directory.refresh(vec![voice("Alex", "en-US"), voice("Anna", "de-DE")]);
        assert_eq!(directory.selected_name(), Some("Alex"));

        directory.refresh(Vec::new());
        assert!(directory.selected_name().is_none());
    }

    #[test]
    fn test_select_absent_name_is_accepted_but_unresolved() {
        let mut directory = VoiceDirectory::new();
        directory.refresh(vec![voice("Alex", "en-US")]);
        directory.select("Nobody");
        assert_eq!(directory.selected_name(), Some("Nobody"));
        assert!(directory.selected_voice().is_none());

        // the next refresh restores the invariant
        directory.refresh(vec![voice("Alex", "en-US")]);
        assert_eq!(directory.selected_name(), Some("Alex"));
    }

    #[test]
    fn test_summary_counts_language_prefixes() {
        let mut directory = VoiceDirectory::new();
        directory.refresh(vec![
            voice("Alex", "en-US"),
            voice("Daniel", "en-GB"),
            voice("Thomas", "fr-FR"),
            voice("Amélie", "fr-CA"),
            voice("Anna", "de-DE"),
        ]);
        assert_eq!(
            directory.summary(),
            DirectorySummary {
                voice_count: 5,
                language_count: 3,
            }
        );
    }
}
