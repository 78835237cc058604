//! Audio bridge: the authorities that own playback for a page and the
//! message plumbing between frames.
//!
//! A page talks to exactly one [`AudioAuthority`], handed to it as an
//! [`AudioContext`]. Which implementation sits behind it depends on where the
//! page lives:
//!
//! - top-level page with its own elements: [`LocalAudioManager`]
//! - top-level page driving a hidden player frame: [`AudioController`]
//! - embedded page: [`AudioRelay`], forwarding to the parent

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::error::AudioError;

mod controller;
mod gate;
mod manager;
mod player;
mod protocol;
mod relay;
mod sound;

pub use controller::{AudioController, CommandSink, ControllerState};
pub use gate::{InteractionGate, InteractionKind};
pub use manager::LocalAudioManager;
pub use player::PlayerEndpoint;
pub use protocol::{
    AudioCommand, CommandKind, NavMessage, PlayerEventKind, PlayerMessage, RelayCall,
    RelayEnvelope, RelayMessage, PLAYER_SOURCE, RELAY_SOURCE,
};
pub use relay::{AudioRelay, ParentFrame, RelayHost};
pub use sound::{SoundBank, SoundHandle, SoundName};

/// The operations every audio authority offers to page code.
pub trait AudioAuthority {
    fn init(&mut self) -> Result<(), AudioError>;
    fn play_bgm(&mut self) -> Result<(), AudioError>;
    fn stop_bgm(&mut self) -> Result<(), AudioError>;
    fn play(&mut self, name: &str) -> Result<(), AudioError>;
    /// Unlocks audio from inside a user gesture.
    fn enable_audio(&mut self) -> Result<(), AudioError>;

    /// Runs a relayed call against this authority.
    fn apply(&mut self, call: &RelayCall) -> Result<(), AudioError> {
        match call {
            RelayCall::Init => self.init(),
            RelayCall::PlayBgm => self.play_bgm(),
            RelayCall::StopBgm => self.stop_bgm(),
            RelayCall::Play { name } => self.play(name),
            RelayCall::EnableAudio => self.enable_audio(),
        }
    }
}

/// Where a submitted operation ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Delivered,
    Queued,
}

/// Shared handle to the page's audio authority, injected through the UI
/// context instead of being looked up on `window`.
#[derive(Clone)]
pub struct AudioContext(Rc<RefCell<dyn AudioAuthority>>);

impl AudioContext {
    pub fn new<A: AudioAuthority + 'static>(authority: A) -> Self {
        Self(Rc::new(RefCell::new(authority)))
    }

    pub fn from_shared(shared: Rc<RefCell<dyn AudioAuthority>>) -> Self {
        Self(shared)
    }

    pub fn play_bgm(&self) -> Result<(), AudioError> {
        self.0.borrow_mut().play_bgm()
    }

    pub fn stop_bgm(&self) -> Result<(), AudioError> {
        self.0.borrow_mut().stop_bgm()
    }

    pub fn play(&self, name: &str) -> Result<(), AudioError> {
        self.0.borrow_mut().play(name)
    }

    pub fn play_sound(&self, name: SoundName) -> Result<(), AudioError> {
        self.play(name.as_str())
    }

    pub fn enable_audio(&self) -> Result<(), AudioError> {
        self.0.borrow_mut().enable_audio()
    }
}

impl AudioAuthority for AudioContext {
    fn init(&mut self) -> Result<(), AudioError> {
        self.0.borrow_mut().init()
    }

    fn play_bgm(&mut self) -> Result<(), AudioError> {
        AudioContext::play_bgm(self)
    }

    fn stop_bgm(&mut self) -> Result<(), AudioError> {
        AudioContext::stop_bgm(self)
    }

    fn play(&mut self, name: &str) -> Result<(), AudioError> {
        AudioContext::play(self, name)
    }

    fn enable_audio(&mut self) -> Result<(), AudioError> {
        AudioContext::enable_audio(self)
    }
}

impl PartialEq for AudioContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Logs and drops a failure the caller has no use for.
pub fn best_effort<T>(result: Result<T, AudioError>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(operation = what, error = %err, "audio operation failed");
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{CallLog, RecordingAuthority};
    use super::*;

    #[test]
    fn apply_maps_relay_calls_onto_operations() {
        let log = CallLog::default();
        let mut authority = RecordingAuthority::new(log.clone());
        authority.apply(&RelayCall::EnableAudio).unwrap();
        authority
            .apply(&RelayCall::Play {
                name: "win".to_string(),
            })
            .unwrap();
        assert_eq!(
            *log.borrow(),
            vec!["EnableAudio", "Play { name: \"win\" }"]
        );
    }

    #[test]
    fn context_clones_share_one_authority() {
        let log = CallLog::default();
        let context = AudioContext::new(RecordingAuthority::new(log.clone()));
        let other = context.clone();
        assert!(context == other);
        other.play_sound(SoundName::Countdown).unwrap();
        context.stop_bgm().unwrap();
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn best_effort_discards_errors() {
        assert_eq!(best_effort(Ok::<_, AudioError>(3), "value"), Some(3));
        assert_eq!(
            best_effort::<()>(Err(AudioError::NotInitialized), "bgm"),
            None
        );
    }
}
