use std::collections::VecDeque;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::protocol::{AudioCommand, PlayerEventKind, PlayerMessage};
use super::sound::{SoundBank, SoundHandle};
use super::{AudioAuthority, Dispatch};
use crate::error::AudioError;

/// Outbound half of the link to the player frame.
pub trait CommandSink {
    fn post(&self, command: &AudioCommand) -> Result<(), AudioError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ControllerState {
    Uninitialized,
    AwaitingFrame,
    AwaitingReady,
    /// Terminal for the life of the page.
    Ready,
}

/// Drives a hidden player frame. Commands issued before the frame reports
/// `AUDIO_PLAYER_READY` wait in a FIFO queue and are sent in order once it does.
///
/// There is no readiness timeout: a frame that never reports ready keeps its
/// commands queued.
pub struct AudioController<S, H> {
    state: ControllerState,
    frame_id: String,
    frame: Option<S>,
    frame_missing: bool,
    pending: VecDeque<AudioCommand>,
    sounds: SoundBank<H>,
    last_event: Option<PlayerMessage>,
}

impl<S: CommandSink, H: SoundHandle> AudioController<S, H> {
    pub fn new(frame_id: impl Into<String>, sounds: SoundBank<H>) -> Self {
        Self {
            state: ControllerState::Uninitialized,
            frame_id: frame_id.into(),
            frame: None,
            frame_missing: false,
            pending: VecDeque::new(),
            sounds,
            last_event: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == ControllerState::Ready
    }

    pub fn pending(&self) -> impl Iterator<Item = &AudioCommand> {
        self.pending.iter()
    }

    /// Most recent informational event from the player.
    pub fn last_event(&self) -> Option<&PlayerMessage> {
        self.last_event.as_ref()
    }

    /// Binds the located frame. A missing frame leaves the controller unusable.
    pub fn attach_frame(&mut self, frame: Option<S>) -> Result<(), AudioError> {
        if self.state != ControllerState::Uninitialized {
            return Ok(());
        }
        let Some(frame) = frame else {
            error!(frame_id = %self.frame_id, "audio player iframe not found");
            self.frame_missing = true;
            return Err(AudioError::FrameNotFound(self.frame_id.clone()));
        };
        self.frame = Some(frame);
        self.state = ControllerState::AwaitingFrame;
        Ok(())
    }

    /// Marks the message listener as installed.
    pub fn listen(&mut self) {
        if self.state == ControllerState::AwaitingFrame {
            self.state = ControllerState::AwaitingReady;
            info!("audio controller initialized");
        }
    }

    /// `attach_frame` followed by `listen`.
    pub fn init(&mut self, frame: Option<S>) -> Result<(), AudioError> {
        self.attach_frame(frame)?;
        self.listen();
        Ok(())
    }

    pub fn submit(&mut self, command: AudioCommand) -> Result<Dispatch, AudioError> {
        if self.frame_missing {
            error!(command = ?command.kind(), "audio frame not available");
            return Err(AudioError::FrameUnavailable);
        }
        if self.state != ControllerState::Ready {
            debug!(command = ?command.kind(), "queueing command");
            self.pending.push_back(command);
            return Ok(Dispatch::Queued);
        }
        self.send(&command)?;
        Ok(Dispatch::Delivered)
    }

    fn send(&self, command: &AudioCommand) -> Result<(), AudioError> {
        let frame = self.frame.as_ref().ok_or(AudioError::FrameUnavailable)?;
        debug!(command = ?command.kind(), "sending command to audio player");
        frame.post(command)
    }

    pub fn play_bgm(&mut self) -> Result<Dispatch, AudioError> {
        self.submit(AudioCommand::play_bgm())
    }

    pub fn stop_bgm(&mut self) -> Result<Dispatch, AudioError> {
        self.submit(AudioCommand::stop_bgm())
    }

    pub fn set_volume(&mut self, volume: f64) -> Result<Dispatch, AudioError> {
        self.submit(AudioCommand::set_volume(volume))
    }

    pub fn get_status(&mut self) -> Result<Dispatch, AudioError> {
        self.submit(AudioCommand::get_status())
    }

    pub fn play_sound(&self, name: &str) -> Result<(), AudioError> {
        self.sounds.play(name)
    }

    /// Autoplay unlock path.
    pub fn enable(&mut self) -> Result<Dispatch, AudioError> {
        info!("enabling audio");
        self.play_bgm()
    }

    /// Handles any value received on the window's message channel. Messages
    /// not tagged as coming from the player are ignored.
    pub fn handle_raw(&mut self, raw: &Value) -> Option<PlayerEventKind> {
        let message = PlayerMessage::from_value(raw)?;
        self.handle_message(message)
    }

    pub fn handle_message(&mut self, message: PlayerMessage) -> Option<PlayerEventKind> {
        if self.state < ControllerState::AwaitingReady {
            return None;
        }

        let kind = message.kind;
        match kind {
            PlayerEventKind::AudioPlayerReady => {
                self.state = ControllerState::Ready;
                info!("audio player ready");
                self.drain_pending();
                return Some(kind);
            }
            PlayerEventKind::BgmPlaying => info!("bgm is now playing"),
            PlayerEventKind::BgmStopped => info!("bgm stopped"),
            PlayerEventKind::BgmError => error!(data = %message.data, "bgm error"),
            PlayerEventKind::Status => info!(data = %message.data, "bgm status"),
            PlayerEventKind::Unknown => return None,
        }
        self.last_event = Some(message);
        Some(kind)
    }

    fn drain_pending(&mut self) {
        debug!(count = self.pending.len(), "processing pending commands");
        while let Some(command) = self.pending.pop_front() {
            if let Err(err) = self.send(&command) {
                warn!(command = ?command.kind(), error = %err, "failed to deliver queued command");
            }
        }
    }
}

impl<S: CommandSink, H: SoundHandle> AudioAuthority for AudioController<S, H> {
    /// Frame lookup happens in the platform glue; nothing left to do here.
    fn init(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_bgm(&mut self) -> Result<(), AudioError> {
        AudioController::play_bgm(self).map(|_| ())
    }

    fn stop_bgm(&mut self) -> Result<(), AudioError> {
        AudioController::stop_bgm(self).map(|_| ())
    }

    fn play(&mut self, name: &str) -> Result<(), AudioError> {
        self.play_sound(name)
    }

    fn enable_audio(&mut self) -> Result<(), AudioError> {
        self.enable().map(|_| ())
    }
}
