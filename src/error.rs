use std::path::PathBuf;

use thiserror::Error;

/// Runtime failures of the audio bridge.
///
/// None of these are fatal: callers either inspect them or hand them to
/// [`crate::audio::best_effort`], which logs and drops them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AudioError {
    #[error("audio player frame `{0}` not found")]
    FrameNotFound(String),
    #[error("audio player frame is not available")]
    FrameUnavailable,
    #[error("playback of `{name}` was rejected: {reason}")]
    PlaybackRejected { name: String, reason: String },
    #[error("sound `{0}` not found")]
    UnknownSound(String),
    #[error("audio has not been initialized")]
    NotInitialized,
    #[error("invalid volume: {0}")]
    InvalidVolume(String),
    #[error("cross-frame message could not be delivered: {0}")]
    Transport(String),
    #[error("failed to encode message: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for AudioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

/// Build-time asset preparation failures. These halt the tool.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("required asset not found: {}", .0.display())]
    MissingSource(PathBuf),
    #[error("no camera utils script found in {}", .0.display())]
    NoCameraUtils(PathBuf),
    #[error("failed to copy {} to {}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("i/o error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
