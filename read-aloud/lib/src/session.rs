//! The read-aloud session: everything a front end needs to drive.
//!
//! [`ReadAloud`] composes the text buffer, the [`VoiceDirectory`], the
//! [`Carousel`] and the [`PlaybackController`]. A front end forwards user
//! actions to the matching method and feeds platform events to
//! [`ReadAloud::handle_event`], one at a time, then re-renders from the
//! accessors.
//!
//! ## Examples
//!
//! ```
//! use read_aloud::{platform_event_channel, ReadAloud, HostSpeech};
//!
//! let (events, _rx) = platform_event_channel();
//! // A host without speech support: everything still works, nothing is spoken.
//! let mut session = ReadAloud::<HostSpeech>::new(None, events);
//! session.choose_suggestion(0);
//! assert!(session.toggle_playback().is_none());
//! assert!(session.directory().is_empty());
//! ```

use crate::carousel::Carousel;
use crate::directory::VoiceDirectory;
use crate::playback::PlaybackController;
use crate::suggestions::{self, Suggestion};
use crate::traits::{PlatformEvents, SpeechPlatform};
use crate::types::{PlatformEvent, PlaybackState, UtteranceId};

/// Session state for one read-aloud view.
pub struct ReadAloud<P: SpeechPlatform> {
    text: String,
    directory: VoiceDirectory,
    carousel: Carousel,
    playback: PlaybackController<P>,
}

impl<P: SpeechPlatform> ReadAloud<P> {
    /// Build a session around an optional platform capability.
    ///
    /// The platform is subscribed to `events` and whatever voices it already
    /// knows are loaded into the directory.
    pub fn new(mut platform: Option<P>, events: PlatformEvents) -> Self {
        if let Some(platform) = platform.as_mut() {
            platform.subscribe(events);
        }
        let mut session = Self {
            text: String::new(),
            directory: VoiceDirectory::new(),
            carousel: Carousel::default(),
            playback: PlaybackController::new(platform),
        };
        session.reload_voices();
        session
    }

    // ------------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------------

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Whether the play control should be enabled.
    pub fn can_play(&self) -> bool {
        !self.text.trim().is_empty() || self.playback.is_active()
    }

    // ------------------------------------------------------------------------
    // Suggestions
    // ------------------------------------------------------------------------

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn visible_suggestions(&self) -> &'static [Suggestion] {
        self.carousel.visible_slice()
    }

    /// Load suggestion `index` into the text buffer, stopping any playback
    /// first. Returns `false` for an index outside the catalog.
    pub fn choose_suggestion(&mut self, index: usize) -> bool {
        let Some(suggestion) = suggestions::suggestion(index) else {
            return false;
        };
        self.playback.stop();
        self.text = suggestion.content.to_string();
        tracing::debug!(title = suggestion.title, "Loaded suggestion");
        true
    }

    pub fn next_suggestions(&mut self) {
        self.carousel.advance();
    }

    pub fn previous_suggestions(&mut self) {
        self.carousel.retreat();
    }

    /// Apply a viewport width change.
    pub fn resize(&mut self, width: u32) {
        self.carousel.resize(width);
    }

    // ------------------------------------------------------------------------
    // Voices
    // ------------------------------------------------------------------------

    pub fn directory(&self) -> &VoiceDirectory {
        &self.directory
    }

    pub fn select_voice(&mut self, name: impl Into<String>) {
        self.directory.select(name);
    }

    /// Re-read the platform's voices into the directory.
    pub fn reload_voices(&mut self) {
        let voices = self.playback.voices();
        self.directory.refresh(voices);
    }

    /// Preview the voice called `name`. Unknown names are ignored.
    pub fn preview_voice(&mut self, name: &str) -> Option<UtteranceId> {
        let Some(voice) = self.directory.find(name) else {
            tracing::debug!(voice = name, "Cannot preview unknown voice");
            return None;
        };
        self.playback.preview_voice(voice)
    }

    // ------------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------------

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn playback(&self) -> &PlaybackController<P> {
        &self.playback
    }

    /// The play/pause action: stop when active, otherwise speak the text
    /// with the selected voice (or the platform default when the selection
    /// does not resolve).
    pub fn toggle_playback(&mut self) -> Option<UtteranceId> {
        let voice = self.directory.selected_voice();
        self.playback.toggle(&self.text, voice)
    }

    /// Apply one platform event.
    pub fn handle_event(&mut self, event: PlatformEvent) {
        match event {
            PlatformEvent::VoicesChanged => self.reload_voices(),
            PlatformEvent::Utterance { id, signal } => self.playback.handle_signal(id, signal),
        }
    }

    /// Tear down: cancel anything the platform is still rendering.
    pub fn shutdown(&mut self) {
        self.playback.shutdown();
    }
}
