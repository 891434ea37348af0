//! The platform speech capability seen from the session.

use tokio::sync::mpsc;

use crate::types::{PlatformEvent, Utterance, Voice};

/// Sending half of the channel a platform reports its events on.
pub type PlatformEvents = mpsc::UnboundedSender<PlatformEvent>;

/// Receiving half of the platform event channel.
pub type PlatformEventReceiver = mpsc::UnboundedReceiver<PlatformEvent>;

/// Create a platform event channel.
pub fn platform_event_channel() -> (PlatformEvents, PlatformEventReceiver) {
    mpsc::unbounded_channel()
}

/// A speech synthesis capability provided by the host.
///
/// The capability renders one utterance at a time. Lifecycle signals and
/// voice set changes are reported asynchronously as [`PlatformEvent`]s on
/// the channel handed to [`subscribe`](SpeechPlatform::subscribe); callers
/// feed those events back into the session one at a time.
///
/// ## Examples
///
/// ```
/// use read_aloud::{PlatformEvents, SpeechPlatform, Utterance, Voice};
///
/// struct Silent;
///
/// impl SpeechPlatform for Silent {
///     fn voices(&self) -> Vec<Voice> {
///         Vec::new()
///     }
///     fn speak(&mut self, _utterance: Utterance) {}
///     fn cancel(&mut self) {}
///     fn subscribe(&mut self, _events: PlatformEvents) {}
/// }
/// ```
pub trait SpeechPlatform {
    /// The voices currently known to the platform. May be empty while the
    /// platform is still enumerating.
    fn voices(&self) -> Vec<Voice>;

    /// Submit an utterance. Replaces whatever the platform is rendering.
    fn speak(&mut self, utterance: Utterance);

    /// Cancel all pending and active utterances. Fire-and-forget: no signal
    /// is guaranteed for the cancelled utterances.
    fn cancel(&mut self);

    /// Register the channel for lifecycle signals and voice set changes.
    /// A later call replaces the earlier subscription.
    fn subscribe(&mut self, events: PlatformEvents);
}

/// A platform that records every call, for tests.
///
/// The call log and voice list are shared handles so tests can keep
/// inspecting them after the platform has moved into a controller.
#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Speak(Utterance),
        Cancel,
    }

    #[derive(Debug, Clone, Default)]
    pub(crate) struct CallLog(Rc<RefCell<Vec<Call>>>);

    impl CallLog {
        pub fn calls(&self) -> Vec<Call> {
            self.0.borrow().clone()
        }

        pub fn spoken(&self) -> Vec<Utterance> {
            self.0
                .borrow()
                .iter()
                .filter_map(|call| match call {
                    Call::Speak(u) => Some(u.clone()),
                    Call::Cancel => None,
                })
                .collect()
        }

        pub fn last_spoken(&self) -> Option<Utterance> {
            self.spoken().pop()
        }

        pub fn cancel_count(&self) -> usize {
            self.0.borrow().iter().filter(|c| **c == Call::Cancel).count()
        }

        pub fn clear(&self) {
            self.0.borrow_mut().clear();
        }
    }

    #[derive(Debug, Default)]
    pub(crate) struct RecordingPlatform {
        pub voices: Rc<RefCell<Vec<Voice>>>,
        pub log: CallLog,
        pub subscriptions: Rc<RefCell<usize>>,
    }

    impl RecordingPlatform {
        pub fn with_voices(voices: Vec<Voice>) -> Self {
            Self {
                voices: Rc::new(RefCell::new(voices)),
                ..Self::default()
            }
        }
    }

    impl SpeechPlatform for RecordingPlatform {
        fn voices(&self) -> Vec<Voice> {
            self.voices.borrow().clone()
        }

        fn speak(&mut self, utterance: Utterance) {
            self.log.0.borrow_mut().push(Call::Speak(utterance));
        }

        fn cancel(&mut self) {
            self.log.0.borrow_mut().push(Call::Cancel);
        }

        fn subscribe(&mut self, _events: PlatformEvents) {
            *self.subscriptions.borrow_mut() += 1;
        }
    }
}
