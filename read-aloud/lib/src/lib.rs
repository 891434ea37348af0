//! Read Aloud
//!
//! A text-to-speech session: type or pick some text, choose a voice, and
//! have the host's speech engine read it out.
//!
//! ## Features
//!
//! - **Voice directory**: the platform's voices sorted by language, with a
//!   default selection that survives voice set changes
//! - **Playback state machine**: play/stop toggling and voice previews that
//!   never overlap two requests
//! - **Suggestions**: a fixed catalog of sample texts behind a responsive
//!   carousel
//! - **Locale metadata**: flags, descriptions and preview sentences per
//!   language
//! - **Host engines**: eSpeak/eSpeak-NG and macOS `say`, driven through
//!   tokio child processes
//!
//! ## Quick Start
//!
//! ```no_run
//! use read_aloud::{
//!     detect_engine, platform_event_channel, Config, HostSpeech, PlatformEvent, ReadAloud,
//!     UtteranceSignal,
//! };
//!
//! # async fn run() -> Result<(), read_aloud::ReadAloudError> {
//! let config = Config::from_env()?;
//! let (events, mut rx) = platform_event_channel();
//! let platform = detect_engine(config.engine).map(HostSpeech::new);
//! let mut session = ReadAloud::new(platform, events);
//!
//! session.set_text("Hello, world!");
//! let Some(id) = session.toggle_playback() else {
//!     return Ok(()); // no speech engine on this host
//! };
//! while let Some(event) = rx.recv().await {
//!     let finished = matches!(
//!         &event,
//!         PlatformEvent::Utterance {
//!             id: done,
//!             signal: UtteranceSignal::Ended | UtteranceSignal::Failed(_),
//!         } if *done == id
//!     );
//!     session.handle_event(event);
//!     if finished {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`types`] - Voices, utterances and platform events
//! - [`traits`] - The `SpeechPlatform` capability
//! - [`playback`] - The playback state machine
//! - [`directory`] - The sorted voice list and selection
//! - [`carousel`] - The suggestion window
//! - [`locale`] - Flags, descriptions and preview texts
//! - [`session`] - `ReadAloud`, the composed session
//! - [`providers`] - Host engine adapters
//! - [`detection`] - Engine detection
//! - [`config`] - Environment configuration
//! - [`errors`] - Error types

pub mod carousel;
pub mod config;
pub mod detection;
pub mod directory;
pub mod errors;
pub mod locale;
pub mod playback;
pub mod providers;
pub mod session;
pub mod suggestions;
pub mod traits;
pub mod types;

// Re-export main types at crate root for convenience
pub use carousel::Carousel;
pub use config::{Config, EngineChoice};
pub use detection::detect_engine;
pub use directory::{DirectorySummary, VoiceDirectory};
pub use errors::ReadAloudError;
pub use playback::PlaybackController;
pub use providers::host::{HostEngine, HostSpeech};
pub use session::ReadAloud;
pub use suggestions::Suggestion;
pub use traits::{platform_event_channel, PlatformEventReceiver, PlatformEvents, SpeechPlatform};
pub use types::{PlatformEvent, PlaybackState, Utterance, UtteranceId, UtteranceSignal, Voice};
