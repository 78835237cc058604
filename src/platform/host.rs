// Host build: no DOM, no frames, no sound.
use std::cell::Cell;

use crate::audio::{AudioContext, LocalAudioManager, NavMessage, SoundHandle};
use crate::config::AudioConfig;
use crate::error::AudioError;

/// Sound handle that only tracks its own state.
#[derive(Debug)]
pub struct SilentSound {
    volume: Cell<f64>,
    looping: Cell<bool>,
    paused: Cell<bool>,
}

impl Default for SilentSound {
    fn default() -> Self {
        Self {
            volume: Cell::new(1.0),
            looping: Cell::new(false),
            paused: Cell::new(true),
        }
    }
}

impl SoundHandle for SilentSound {
    fn set_volume(&self, volume: f64) {
        self.volume.set(volume);
    }

    fn set_looping(&self, looping: bool) {
        self.looping.set(looping);
    }

    fn rewind(&self) {}

    fn pause(&self) {
        self.paused.set(true);
    }

    fn paused(&self) -> bool {
        self.paused.get()
    }

    fn volume(&self) -> f64 {
        self.volume.get()
    }

    fn play(&self) -> Result<(), AudioError> {
        self.paused.set(false);
        Ok(())
    }
}

pub fn load_config() -> AudioConfig {
    AudioConfig::default()
}

pub fn is_embedded() -> bool {
    false
}

pub fn build_audio_context(config: &AudioConfig) -> AudioContext {
    AudioContext::new(LocalAudioManager::new(config.clone(), |_| {
        SilentSound::default()
    }))
}

pub fn install_interaction_gate(_context: AudioContext) {}

pub fn post_to_parent(_message: &NavMessage) -> Result<(), AudioError> {
    Err(AudioError::FrameUnavailable)
}

pub fn on_nav_request<F>(_handler: F)
where
    F: FnMut(String) + 'static,
{
}

pub fn start_player_endpoint(_config: &AudioConfig) {}

pub async fn sleep_ms(_ms: u32) {}
