//! Host speech engines driven through their command line tools.
//!
//! [`HostSpeech`] implements [`SpeechPlatform`] on top of one
//! [`HostEngine`]. Each utterance runs as a child process inside its own
//! tokio task; cancelling aborts the task, which kills the child.

mod espeak;
mod say;

use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::ReadAloudError;
use crate::traits::{PlatformEvents, SpeechPlatform};
use crate::types::{PlatformEvent, Utterance, UtteranceSignal, Voice};

/// A speech engine installed on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEngine {
    /// eSpeak or eSpeak-NG; `binary` is the executable to run.
    ESpeak { binary: String },
    /// The macOS `say` command.
    Say,
}

impl HostEngine {
    /// The executable this engine runs.
    pub fn binary(&self) -> &str {
        match self {
            Self::ESpeak { binary } => binary,
            Self::Say => "say",
        }
    }

    /// Short engine name for logs and listings.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ESpeak { .. } => "espeak",
            Self::Say => "say",
        }
    }

    /// Whether the engine's executable can be found on `PATH`.
    pub fn is_ready(&self) -> bool {
        which::which(self.binary()).is_ok()
    }

    fn speak_command(&self, utterance: &Utterance) -> Command {
        let args = match self {
            Self::ESpeak { .. } => espeak::speak_args(utterance),
            Self::Say => say::speak_args(utterance),
        };
        let mut cmd = Command::new(self.binary());
        cmd.args(args);
        cmd
    }

    fn list_voices_command(&self) -> Command {
        let mut cmd = Command::new(self.binary());
        match self {
            Self::ESpeak { .. } => cmd.arg("--voices"),
            Self::Say => cmd.args(["-v", "?"]),
        };
        cmd
    }

    fn parse_voices(&self, output: &str) -> Vec<Voice> {
        match self {
            Self::ESpeak { .. } => espeak::parse_voices(output),
            Self::Say => say::parse_voices(output),
        }
    }

    /// List the voices the engine reports.
    pub async fn list_voices(&self) -> Result<Vec<Voice>, ReadAloudError> {
        let output = self
            .list_voices_command()
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ReadAloudError::VoiceEnumerationFailed {
                engine: self.binary().to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ReadAloudError::VoiceEnumerationFailed {
                engine: self.binary().to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let voices = self.parse_voices(&String::from_utf8_lossy(&output.stdout));
        debug!(engine = self.name(), count = voices.len(), "Enumerated voices");
        Ok(voices)
    }

    /// Speak `utterance` to completion.
    ///
    /// `on_started` runs once the engine has the whole text.
    async fn render(
        &self,
        utterance: &Utterance,
        on_started: impl FnOnce(),
    ) -> Result<(), ReadAloudError> {
        let mut cmd = self.speak_command(utterance);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| ReadAloudError::ProcessSpawnFailed {
            engine: self.binary().to_string(),
            source,
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ReadAloudError::StdinPipeError {
                engine: self.binary().to_string(),
            })?;

        stdin
            .write_all(utterance.text.as_bytes())
            .await
            .map_err(|source| ReadAloudError::StdinWriteError {
                engine: self.binary().to_string(),
                source,
            })?;

        // EOF tells the engine the text is complete
        drop(stdin);
        on_started();

        let output = child.wait_with_output().await?;

        if output.status.success() {
            Ok(())
        } else {
            Err(ReadAloudError::ProcessFailed {
                engine: self.binary().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// [`SpeechPlatform`] backed by a [`HostEngine`].
///
/// `speak` and `subscribe` spawn onto the current tokio runtime. Without a
/// runtime, utterances fail immediately and no voices are enumerated.
#[derive(Debug)]
pub struct HostSpeech {
    engine: HostEngine,
    voices: Arc<Mutex<Vec<Voice>>>,
    events: Option<PlatformEvents>,
    current: Option<JoinHandle<()>>,
    enumeration: Option<JoinHandle<()>>,
}

impl HostSpeech {
    pub fn new(engine: HostEngine) -> Self {
        Self {
            engine,
            voices: Arc::new(Mutex::new(Vec::new())),
            events: None,
            current: None,
            enumeration: None,
        }
    }

    pub fn engine(&self) -> &HostEngine {
        &self.engine
    }

    fn emit(events: Option<&PlatformEvents>, event: PlatformEvent) {
        if let Some(events) = events {
            // a closed receiver means the session is gone
            let _ = events.send(event);
        }
    }

    fn abort_current(&mut self) {
        if let Some(task) = self.current.take() {
            task.abort();
        }
    }
}

impl SpeechPlatform for HostSpeech {
    fn voices(&self) -> Vec<Voice> {
        self.voices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn speak(&mut self, utterance: Utterance) {
        self.abort_current();

        let id = utterance.id;
        let Ok(runtime) = Handle::try_current() else {
            warn!(utterance = %id, "No async runtime available to speak on");
            Self::emit(
                self.events.as_ref(),
                PlatformEvent::utterance(id, UtteranceSignal::Failed("no async runtime".into())),
            );
            return;
        };

        let engine = self.engine.clone();
        let events = self.events.clone();
        debug!(engine = engine.name(), utterance = %id, chars = utterance.text.len(), "Speaking");

        self.current = Some(runtime.spawn(async move {
            let started = events.clone();
            let result = engine
                .render(&utterance, || {
                    Self::emit(
                        started.as_ref(),
                        PlatformEvent::utterance(id, UtteranceSignal::Started),
                    )
                })
                .await;

            let signal = match result {
                Ok(()) => UtteranceSignal::Ended,
                Err(e) => {
                    warn!(engine = engine.name(), utterance = %id, error = %e, "Utterance failed");
                    UtteranceSignal::Failed(e.to_string())
                }
            };
            Self::emit(events.as_ref(), PlatformEvent::utterance(id, signal));
        }));
    }

    fn cancel(&mut self) {
        if self.current.is_some() {
            debug!(engine = self.engine.name(), "Cancelling speech");
        }
        self.abort_current();
    }

    fn subscribe(&mut self, events: PlatformEvents) {
        self.events = Some(events.clone());

        let Ok(runtime) = Handle::try_current() else {
            warn!(engine = self.engine.name(), "No async runtime available to enumerate voices");
            return;
        };

        if let Some(task) = self.enumeration.take() {
            task.abort();
        }

        let engine = self.engine.clone();
        let voices = Arc::clone(&self.voices);
        self.enumeration = Some(runtime.spawn(async move {
            match engine.list_voices().await {
                Ok(found) => {
                    info!(engine = engine.name(), count = found.len(), "Voices loaded");
                    *voices.lock().unwrap_or_else(PoisonError::into_inner) = found;
                }
                Err(e) => warn!(engine = engine.name(), error = %e, "Could not list voices"),
            }
            // announced either way so listeners stop waiting
            let _ = events.send(PlatformEvent::VoicesChanged);
        }));
    }
}

impl Drop for HostSpeech {
    fn drop(&mut self) {
        self.abort_current();
        if let Some(task) = self.enumeration.take() {
            task.abort();
        }
    }
}
