//! Core types for the read-aloud session.
//!
//! This module defines the records exchanged between the session and the
//! platform speech capability:
//! - [`Voice`] as reported by the platform
//! - [`Utterance`] requests and their [`UtteranceId`]s
//! - Lifecycle signals ([`UtteranceSignal`], [`PlatformEvent`])
//! - The observable [`PlaybackState`]

use std::fmt;

use serde::Serialize;

// ============================================================================
// Voice
// ============================================================================

/// A voice reported by the platform speech capability.
///
/// Voices are observed, never created, by the session. The platform may
/// replace its whole voice set at any time and signal it with
/// [`PlatformEvent::VoicesChanged`].
///
/// ## Examples
///
/// ```
/// use read_aloud::Voice;
///
/// let voice = Voice::new("Samantha", "en-US");
/// assert_eq!(voice.lang, "en-US");
/// assert_eq!(voice.engine_id(), "Samantha");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Voice {
    /// The display name of the voice. Unique within a voice set.
    pub name: String,
    /// BCP-47 style locale tag (e.g. `en-GB`).
    pub lang: String,
    /// Engine specific identifier, when it differs from the display name.
    ///
    /// eSpeak, for instance, selects voices by language code rather than
    /// by the name it prints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl Voice {
    /// Create a new voice with the given name and locale.
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
            identifier: None,
        }
    }

    /// Set the engine specific identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// The value an engine should be handed to select this voice.
    pub fn engine_id(&self) -> &str {
        self.identifier.as_deref().unwrap_or(&self.name)
    }
}

// ============================================================================
// Playback State
// ============================================================================

/// Whether main playback is currently audible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    /// Nothing is being spoken (or a request is still queued in the engine).
    #[default]
    Idle,
    /// The platform has signalled start of speech for the main utterance.
    Playing,
}

// ============================================================================
// Utterances
// ============================================================================

/// Identifies one utterance request for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtteranceId(pub u64);

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Neutral value used for rate, pitch and volume.
pub const NEUTRAL: f32 = 1.0;

/// A single request to render one piece of text as speech.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    /// `None` leaves the choice to the platform's default voice.
    pub voice: Option<Voice>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    /// Create an utterance with neutral rate, pitch and volume.
    pub fn new(id: UtteranceId, text: impl Into<String>, voice: Option<Voice>) -> Self {
        Self {
            id,
            text: text.into(),
            voice,
            rate: NEUTRAL,
            pitch: NEUTRAL,
            volume: NEUTRAL,
        }
    }
}

// ============================================================================
// Platform Events
// ============================================================================

/// Lifecycle signal for a single utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtteranceSignal {
    /// Speech has become audible.
    Started,
    /// Speech finished normally.
    Ended,
    /// The engine gave up on the utterance.
    Failed(String),
}

/// An event raised by the platform speech capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The set of available voices changed and should be re-read.
    VoicesChanged,
    /// A lifecycle signal for one utterance.
    Utterance {
        id: UtteranceId,
        signal: UtteranceSignal,
    },
}

impl PlatformEvent {
    /// Shorthand for an utterance lifecycle event.
    pub fn utterance(id: UtteranceId, signal: UtteranceSignal) -> Self {
        PlatformEvent::Utterance { id, signal }
    }
}

// ============================================================================
// Tests
// ============================================================================
