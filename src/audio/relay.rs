use std::collections::VecDeque;

use tracing::{debug, info, warn};

use super::protocol::{RelayCall, RelayMessage};
use super::{AudioAuthority, Dispatch};
use crate::error::AudioError;

/// What an embedded page can see of its parent frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentFrame {
    pub exists: bool,
    pub is_self: bool,
    /// The parent answered the capability query.
    pub announced: bool,
}

impl ParentFrame {
    pub fn top_level() -> Self {
        Self {
            exists: false,
            is_self: true,
            announced: false,
        }
    }

    /// Builds the view from a parent lookup that only yields parents distinct
    /// from the current frame.
    pub fn from_lookup<T>(parent: Option<&T>, announced: bool) -> Self {
        match parent {
            Some(_) => Self {
                exists: true,
                is_self: false,
                announced,
            },
            None => Self {
                announced,
                ..Self::top_level()
            },
        }
    }

    /// A distinct parent that may host an authority. Worth querying.
    pub fn is_candidate(&self) -> bool {
        self.exists && !self.is_self
    }

    pub fn can_bind(&self) -> bool {
        self.is_candidate() && self.announced
    }
}

/// Stand-in for the parent frame's audio authority.
///
/// Until the parent has announced itself every call is queued; on binding the
/// queue is flushed in order. Failures while flushing are logged and skipped
/// so one bad call cannot hold back the rest.
#[derive(Default)]
pub struct AudioRelay {
    target: Option<Box<dyn AudioAuthority>>,
    queued: VecDeque<RelayCall>,
}

impl AudioRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_bound(&self) -> bool {
        self.target.is_some()
    }

    pub fn queued(&self) -> usize {
        self.queued.len()
    }

    /// Binds to `target` if `parent` qualifies. Returns whether the relay is
    /// bound afterwards. An existing binding is kept.
    pub fn try_bind<F>(&mut self, parent: ParentFrame, target: F) -> bool
    where
        F: FnOnce() -> Box<dyn AudioAuthority>,
    {
        if self.is_bound() {
            return true;
        }
        if !parent.can_bind() {
            debug!(?parent, "parent audio authority not available yet");
            return false;
        }
        self.bind(target());
        true
    }

    fn bind(&mut self, target: Box<dyn AudioAuthority>) {
        self.target = Some(target);
        info!(queued = self.queued.len(), "bound to parent audio authority");
        self.flush();
    }

    fn flush(&mut self) {
        let Some(target) = self.target.as_mut() else {
            return;
        };
        while let Some(call) = self.queued.pop_front() {
            if let Err(err) = target.apply(&call) {
                warn!(?call, error = %err, "queued audio call failed");
            }
        }
    }

    pub fn call(&mut self, call: RelayCall) -> Result<Dispatch, AudioError> {
        match self.target.as_mut() {
            Some(target) => target.apply(&call).map(|_| Dispatch::Delivered),
            None => {
                self.queued.push_back(call);
                Ok(Dispatch::Queued)
            }
        }
    }

    /// Every click in an embedded page also plays the click effect, but only
    /// once bound.
    pub fn on_local_click(&mut self) -> Option<Result<(), AudioError>> {
        let target = self.target.as_mut()?;
        Some(target.play("click"))
    }
}

impl AudioAuthority for AudioRelay {
    fn init(&mut self) -> Result<(), AudioError> {
        self.call(RelayCall::Init).map(|_| ())
    }

    fn play_bgm(&mut self) -> Result<(), AudioError> {
        self.call(RelayCall::PlayBgm).map(|_| ())
    }

    fn stop_bgm(&mut self) -> Result<(), AudioError> {
        self.call(RelayCall::StopBgm).map(|_| ())
    }

    fn play(&mut self, name: &str) -> Result<(), AudioError> {
        self.call(RelayCall::Play {
            name: name.to_string(),
        })
        .map(|_| ())
    }

    fn enable_audio(&mut self) -> Result<(), AudioError> {
        self.call(RelayCall::EnableAudio).map(|_| ())
    }
}

/// Parent side of the relay: answers capability queries and runs relayed
/// calls on the page's own authority.
pub struct RelayHost<A> {
    authority: A,
}

impl<A: AudioAuthority> RelayHost<A> {
    pub fn new(authority: A) -> Self {
        Self { authority }
    }

    /// Returns the reply to post back to the child, if any. Errors from
    /// relayed calls stay on this side.
    pub fn handle(&mut self, message: RelayMessage) -> Option<RelayMessage> {
        match message {
            RelayMessage::AudioAuthorityQuery => Some(RelayMessage::AudioAuthorityAnnounce),
            RelayMessage::RelayCall { call } => {
                if let Err(err) = self.authority.apply(&call) {
                    debug!(?call, error = %err, "relayed audio call failed");
                }
                None
            }
            RelayMessage::AudioAuthorityAnnounce => None,
        }
    }
}
