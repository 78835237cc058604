//! Fortune Hands: audio bridge, navigation relay and match bookkeeping for the
//! browser front-end.
//!
//! Everything that touches the browser lives in [`platform`]; the rest is plain
//! Rust so it can be exercised on the host.

pub mod assets;
pub mod audio;
pub mod config;
pub mod error;
pub mod game;
pub mod navigation;
pub mod platform;

pub use config::{AudioConfig, AudioMode};
pub use error::{AssetError, AudioError};
