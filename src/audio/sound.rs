use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AudioConfig;
use crate::error::AudioError;

/// Playback backend for a single audio asset.
///
/// The browser implementation wraps an `HtmlAudioElement`; tests use
/// recording mocks.
pub trait SoundHandle {
    fn set_volume(&self, volume: f64);
    fn set_looping(&self, looping: bool);
    /// Moves the play position back to the start.
    fn rewind(&self);
    fn pause(&self);
    fn paused(&self) -> bool;
    fn volume(&self) -> f64;
    /// Starts playback. Autoplay rejections surface as
    /// [`AudioError::PlaybackRejected`].
    fn play(&self) -> Result<(), AudioError>;
}

/// The fixed set of sound effects the game ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundName {
    Click,
    Countdown,
    Draw,
    Lose,
    Win,
    PaperScroll,
    SoClose,
    YouWin,
    HandDetected,
}

impl SoundName {
    pub const ALL: [SoundName; 9] = [
        SoundName::Click,
        SoundName::Countdown,
        SoundName::Draw,
        SoundName::Lose,
        SoundName::Win,
        SoundName::PaperScroll,
        SoundName::SoClose,
        SoundName::YouWin,
        SoundName::HandDetected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SoundName::Click => "click",
            SoundName::Countdown => "countdown",
            SoundName::Draw => "draw",
            SoundName::Lose => "lose",
            SoundName::Win => "win",
            SoundName::PaperScroll => "paperScroll",
            SoundName::SoClose => "soClose",
            SoundName::YouWin => "youWin",
            SoundName::HandDetected => "handDetected",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            SoundName::Click => "click.wav",
            SoundName::Countdown => "countdown.wav",
            SoundName::Draw => "draw-round.wav",
            SoundName::Lose => "lost-round.wav",
            SoundName::Win => "win-round.wav",
            SoundName::PaperScroll => "paper-scroll.wav",
            SoundName::SoClose => "so-close.wav",
            SoundName::YouWin => "you-win.wav",
            SoundName::HandDetected => "hand-detected.wav",
        }
    }
}

impl fmt::Display for SoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundName {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| AudioError::UnknownSound(s.to_string()))
    }
}

/// Named sound effect handles.
pub struct SoundBank<H> {
    handles: HashMap<SoundName, H>,
}

impl<H> Default for SoundBank<H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }
}

impl<H: SoundHandle> SoundBank<H> {
    /// Creates one handle per [`SoundName`] using `load`, which receives the
    /// asset path. Every handle gets the configured effect volume.
    pub fn load<F>(config: &AudioConfig, mut load: F) -> Self
    where
        F: FnMut(&str) -> H,
    {
        let handles = SoundName::ALL
            .into_iter()
            .map(|name| {
                let handle = load(&config.sound_path(name.file_name()));
                handle.set_volume(config.effect_volume);
                (name, handle)
            })
            .collect();
        Self { handles }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn get(&self, name: SoundName) -> Option<&H> {
        self.handles.get(&name)
    }

    /// Plays an effect from the start.
    ///
    /// Unknown names only warn. Rejected playback is logged and returned;
    /// nothing here panics.
    pub fn play(&self, name: &str) -> Result<(), AudioError> {
        let handle = match name.parse::<SoundName>() {
            Ok(parsed) => self.handles.get(&parsed),
            Err(_) => None,
        };
        let Some(handle) = handle else {
            warn!(sound = name, "sound not found");
            return Err(AudioError::UnknownSound(name.to_string()));
        };

        handle.rewind();
        handle.play().inspect_err(|err| {
            debug!(sound = name, error = %err, "could not play sound");
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{CallLog, MockSound};
    use super::*;

    fn bank(log: &CallLog) -> SoundBank<MockSound> {
        SoundBank::load(&AudioConfig::default(), |path| {
            MockSound::new(path, log.clone())
        })
    }

    #[test]
    fn names_round_trip_through_strings() {
        for name in SoundName::ALL {
            assert_eq!(name.as_str().parse::<SoundName>(), Ok(name));
        }
        assert_eq!(
            "thunder".parse::<SoundName>(),
            Err(AudioError::UnknownSound("thunder".to_string()))
        );
    }

    #[test]
    fn load_creates_every_effect_at_effect_volume() {
        let log = CallLog::default();
        let bank = bank(&log);
        assert_eq!(bank.len(), 9);
        let draw = bank.get(SoundName::Draw).expect("draw handle");
        assert_eq!(draw.path, "/static/assets/sound/draw-round.wav");
        assert_eq!(draw.volume(), 0.5);
    }

    #[test]
    fn play_rewinds_before_playing() {
        let log = CallLog::default();
        let bank = bank(&log);
        bank.play("click").expect("click plays");
        bank.play("click").expect("click plays again");
        assert_eq!(
            *log.borrow(),
            vec![
                "rewind /static/assets/sound/click.wav",
                "play /static/assets/sound/click.wav",
                "rewind /static/assets/sound/click.wav",
                "play /static/assets/sound/click.wav",
            ]
        );
    }

    #[test]
    fn unknown_sound_touches_nothing() {
        let log = CallLog::default();
        let bank = bank(&log);
        let result = bank.play("fanfare");
        assert_eq!(result, Err(AudioError::UnknownSound("fanfare".to_string())));
        assert!(log.borrow().is_empty());
        assert!(bank.handles.values().all(|h| h.paused()));
    }

    #[test]
    fn rejected_playback_is_returned_not_raised() {
        let log = CallLog::default();
        let bank = bank(&log);
        bank.get(SoundName::Win).unwrap().reject.set(true);
        let result = bank.play("win");
        assert!(matches!(result, Err(AudioError::PlaybackRejected { .. })));
    }
}
