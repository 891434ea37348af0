/// Errors raised while talking to a host speech engine or reading configuration.
///
/// None of these reach the session's callers: the host adapters turn them into
/// [`UtteranceSignal::Failed`](crate::UtteranceSignal::Failed) signals or log
/// lines, and configuration errors only surface at start-up.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ReadAloudError {
    /// The engine process could not be started.
    #[error("Failed to spawn '{engine}'")]
    ProcessSpawnFailed {
        engine: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine's stdin was not available.
    #[error("No stdin pipe for '{engine}'")]
    StdinPipeError { engine: String },

    /// Writing the text to the engine's stdin failed.
    #[error("Failed to write text to '{engine}'")]
    StdinWriteError {
        engine: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine exited with a non-zero status.
    #[error("'{engine}' failed: {stderr}")]
    ProcessFailed { engine: String, stderr: String },

    /// Listing the engine's voices failed.
    #[error("Voice enumeration failed for '{engine}': {message}")]
    VoiceEnumerationFailed { engine: String, message: String },

    /// An engine name that is not one of `espeak`, `say` or `none`.
    #[error("Unknown speech engine '{0}' (expected espeak, say or none)")]
    UnknownEngine(String),

    /// A viewport width that is not a non-negative integer.
    #[error("Invalid viewport width '{0}'")]
    InvalidWidth(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
