//! Playback controller: the main "is speech playing" state machine.
//!
//! The controller issues utterances to the injected [`SpeechPlatform`] and
//! moves between [`PlaybackState::Idle`] and [`PlaybackState::Playing`] in
//! response to user actions and platform lifecycle events:
//!
//! | Trigger                          | Effect                                     |
//! |----------------------------------|--------------------------------------------|
//! | `start` with non-blank text      | cancel, submit main utterance (still Idle) |
//! | `Started` for the main utterance | Playing                                    |
//! | `Ended`/`Failed` for main        | Idle                                       |
//! | `stop` while active              | cancel, Idle immediately                   |
//! | `preview_voice`                  | cancel, submit preview; state untouched    |
//!
//! The platform renders one utterance at a time, so every request cancels
//! whatever the platform is doing before it is submitted.

use crate::locale::preview_text_for;
use crate::traits::SpeechPlatform;
use crate::types::{PlaybackState, Utterance, UtteranceId, UtteranceSignal, Voice};

/// Owns the platform capability and the main playback state.
///
/// A controller built with `None` models a host without speech support:
/// every request is a silent no-op.
///
/// Dropping the controller cancels anything still in flight.
pub struct PlaybackController<P: SpeechPlatform> {
    platform: Option<P>,
    state: PlaybackState,
    /// The main utterance, from submission until it ends or is stopped.
    main: Option<UtteranceId>,
    /// The preview utterance, from submission until it ends or is cancelled.
    preview: Option<UtteranceId>,
    next_id: u64,
    shut_down: bool,
}

impl<P: SpeechPlatform> PlaybackController<P> {
    pub fn new(platform: Option<P>) -> Self {
        if platform.is_none() {
            tracing::info!("Speech synthesis unavailable, playback disabled");
        }
        Self {
            platform,
            state: PlaybackState::Idle,
            main: None,
            preview: None,
            next_id: 1,
            shut_down: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Playing, or a main utterance has been submitted and not yet finished.
    pub fn is_active(&self) -> bool {
        self.is_playing() || self.main.is_some()
    }

    pub fn is_available(&self) -> bool {
        self.platform.is_some()
    }

    pub fn main_utterance(&self) -> Option<UtteranceId> {
        self.main
    }

    pub fn preview_utterance(&self) -> Option<UtteranceId> {
        self.preview
    }

    pub fn platform(&self) -> Option<&P> {
        self.platform.as_ref()
    }

    pub fn platform_mut(&mut self) -> Option<&mut P> {
        self.platform.as_mut()
    }

    /// Voices reported by the platform, empty when unavailable.
    pub fn voices(&self) -> Vec<Voice> {
        self.platform.as_ref().map(P::voices).unwrap_or_default()
    }

    /// Submit `text` as the main utterance.
    ///
    /// Blank text or a missing platform makes this a no-op returning `None`.
    /// The state only becomes `Playing` once the platform signals start.
    /// `voice: None` leaves the voice to the platform default.
    pub fn start(&mut self, text: &str, voice: Option<&Voice>) -> Option<UtteranceId> {
        if text.trim().is_empty() {
            tracing::debug!("Ignoring play request for blank text");
            return None;
        }
        let id = self.allocate_id();
        let platform = self.platform.as_mut()?;

        platform.cancel();
        platform.speak(Utterance::new(id, text, voice.cloned()));

        self.shut_down = false;
        self.state = PlaybackState::Idle;
        self.main = Some(id);
        self.preview = None;
        tracing::debug!(
            utterance_id = %id,
            voice = voice.map(|v| v.name.as_str()),
            chars = text.chars().count(),
            "Submitted main utterance"
        );
        Some(id)
    }

    /// Stop main playback if it is active.
    ///
    /// The transition to `Idle` is immediate: the platform is not guaranteed
    /// to signal the end of a cancelled utterance.
    pub fn stop(&mut self) {
        if !self.is_active() {
            return;
        }
        if let Some(platform) = self.platform.as_mut() {
            platform.cancel();
        }
        tracing::debug!(utterance_id = ?self.main, "Stopped main playback");
        self.state = PlaybackState::Idle;
        self.main = None;
        self.preview = None;
    }

    /// Stop when active, start otherwise.
    pub fn toggle(&mut self, text: &str, voice: Option<&Voice>) -> Option<UtteranceId> {
        if self.is_active() {
            self.stop();
            None
        } else {
            self.start(text, voice)
        }
    }

    /// Speak the locale's preview sentence with `voice`.
    ///
    /// The platform is cancelled first, which silences main playback too,
    /// but the main playback state is left as it is.
    pub fn preview_voice(&mut self, voice: &Voice) -> Option<UtteranceId> {
        let id = self.allocate_id();
        let platform = self.platform.as_mut()?;

        platform.cancel();
        platform.speak(Utterance::new(
            id,
            preview_text_for(&voice.lang),
            Some(voice.clone()),
        ));

        self.shut_down = false;
        self.preview = Some(id);
        tracing::debug!(utterance_id = %id, voice = %voice.name, "Submitted voice preview");
        Some(id)
    }

    /// Apply a lifecycle signal from the platform.
    ///
    /// Signals for utterances that are neither the current main nor the
    /// current preview request are stale and ignored.
    pub fn handle_signal(&mut self, id: UtteranceId, signal: UtteranceSignal) {
        if self.main == Some(id) {
            match signal {
                UtteranceSignal::Started => {
                    self.state = PlaybackState::Playing;
                    tracing::debug!(utterance_id = %id, "Main playback started");
                }
                UtteranceSignal::Ended => {
                    self.finish_main();
                    tracing::debug!(utterance_id = %id, "Main playback ended");
                }
                UtteranceSignal::Failed(reason) => {
                    self.finish_main();
                    tracing::warn!(utterance_id = %id, reason = %reason, "Main playback failed");
                }
            }
        } else if self.preview == Some(id) {
            match signal {
                UtteranceSignal::Started => {
                    tracing::trace!(utterance_id = %id, "Preview started");
                }
                UtteranceSignal::Ended => {
                    self.preview = None;
                }
                UtteranceSignal::Failed(reason) => {
                    self.preview = None;
                    tracing::warn!(utterance_id = %id, reason = %reason, "Preview failed");
                }
            }
        } else {
            tracing::debug!(utterance_id = %id, signal = ?signal, "Ignoring stale utterance signal");
        }
    }

    /// Cancel anything in flight and return to `Idle`. Idempotent.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        if let Some(platform) = self.platform.as_mut() {
            platform.cancel();
        }
        self.state = PlaybackState::Idle;
        self.main = None;
        self.preview = None;
        tracing::debug!("Playback controller shut down");
    }

    fn finish_main(&mut self) {
        self.state = PlaybackState::Idle;
        self.main = None;
    }

    fn allocate_id(&mut self) -> UtteranceId {
        let id = UtteranceId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl<P: SpeechPlatform> Drop for PlaybackController<P> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
