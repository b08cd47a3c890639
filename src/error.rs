//! Error types for clip selection, submission and playback.

use thiserror::Error;

/// Shown for any transport or protocol failure; details go to the log only.
pub const GENERIC_FAILURE: &str = "An error occurred while processing your request.";

/// Failures of a user-initiated operation (loading a file, submitting a clip).
/// None of them are fatal: the UI returns to idle and waits for the next action.
#[derive(Error, Debug)]
pub enum ClipError {
    #[error("no file selected")]
    NoFileSelected,

    #[error("not an audio file: {mime_type}")]
    NotAudio { mime_type: String },

    #[error("failed to read {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// Network failure before any HTTP status was received.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("classifier returned HTTP {0}")]
    Status(u16),

    /// Response body was not `{error}` or `{output}`.
    #[error("malformed classifier response: {0}")]
    Protocol(String),

    /// The service answered with an `error` field.
    #[error("classifier error: {0}")]
    Service(String),

    #[error("a submission for {file} is already in flight")]
    AlreadyInFlight { file: String },
}

impl ClipError {
    /// Text for the message line of the UI.
    pub fn user_message(&self) -> String {
        match self {
            ClipError::NoFileSelected => "Please select a music file.".to_string(),
            ClipError::NotAudio { .. } => {
                "Invalid file type. Please upload an audio file.".to_string()
            }
            ClipError::Read { file, .. } => format!("Could not read {file}. Please try again."),
            ClipError::Transport(_) | ClipError::Status(_) | ClipError::Protocol(_) => {
                GENERIC_FAILURE.to_string()
            }
            ClipError::Service(msg) => format!("Error: {msg}"),
            ClipError::AlreadyInFlight { file } => {
                format!("{file} is already being classified. Please wait.")
            }
        }
    }
}

/// Media engine faults.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to initialise GStreamer: {0}")]
    Init(String),

    #[error("failed to build playback pipeline: {0}")]
    Pipeline(String),

    #[error("failed to change pipeline state: {0}")]
    StateChange(String),

    #[error("seek to {time}s failed: {reason}")]
    Seek { time: f64, reason: String },

    #[error("stream error: {0}")]
    Stream(String),
}

/// Startup configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value: {0}")]
    Invalid(String),
}
