use serde_json::json;
use tracing::{debug, warn};

use super::protocol::{AudioCommand, CommandKind, PlayerEventKind, PlayerMessage};
use super::sound::SoundHandle;
use crate::error::AudioError;

/// The page inside the hidden audio frame. Owns the background track and
/// answers every command with an event for the host.
pub struct PlayerEndpoint<H> {
    bgm: H,
}

impl<H: SoundHandle> PlayerEndpoint<H> {
    pub fn new(bgm: H, volume: f64) -> Self {
        bgm.set_looping(true);
        bgm.set_volume(volume.clamp(0.0, 1.0));
        Self { bgm }
    }

    /// First message the frame posts to its parent.
    pub fn ready(&self) -> PlayerMessage {
        PlayerMessage::ready()
    }

    pub fn handle(&mut self, command: &AudioCommand) -> PlayerMessage {
        debug!(command = ?command.kind(), "audio player received command");
        match command.kind() {
            CommandKind::PlayBgm => match self.bgm.play() {
                Ok(()) => PlayerMessage::new(PlayerEventKind::BgmPlaying, json!(null)),
                Err(err) => {
                    warn!(error = %err, "bgm playback failed");
                    PlayerMessage::new(PlayerEventKind::BgmError, json!(err.to_string()))
                }
            },
            CommandKind::StopBgm => {
                self.bgm.pause();
                self.bgm.rewind();
                PlayerMessage::new(PlayerEventKind::BgmStopped, json!(null))
            }
            CommandKind::SetVolume => match command.value() {
                Some(volume) if volume.is_finite() => {
                    self.bgm.set_volume(volume.clamp(0.0, 1.0));
                    self.status()
                }
                other => {
                    let value = other.map_or_else(|| "missing".to_string(), |v| v.to_string());
                    let err = AudioError::InvalidVolume(value);
                    warn!(error = %err, "rejected volume change");
                    PlayerMessage::new(PlayerEventKind::BgmError, json!(err.to_string()))
                }
            },
            CommandKind::GetStatus => self.status(),
        }
    }

    fn status(&self) -> PlayerMessage {
        PlayerMessage::new(
            PlayerEventKind::Status,
            json!({
                "playing": !self.bgm.paused(),
                "volume": self.bgm.volume(),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::Value;

    use super::*;
    use crate::audio::testing::{CallLog, MockSound};
    use crate::audio::{AudioController, CommandSink, SoundBank};
    use crate::config::AudioConfig;

    fn endpoint() -> PlayerEndpoint<MockSound> {
        PlayerEndpoint::new(MockSound::new("bgm.mp3", CallLog::default()), 0.3)
    }

    #[test]
    fn announces_ready() {
        assert_eq!(endpoint().ready().kind, PlayerEventKind::AudioPlayerReady);
    }

    #[test]
    fn commands_produce_matching_events() {
        let mut player = endpoint();
        assert_eq!(
            player.handle(&AudioCommand::play_bgm()).kind,
            PlayerEventKind::BgmPlaying
        );
        let status = player.handle(&AudioCommand::set_volume(1.7));
        assert_eq!(status.kind, PlayerEventKind::Status);
        assert_eq!(status.data, json!({ "playing": true, "volume": 1.0 }));
        assert_eq!(
            player.handle(&AudioCommand::stop_bgm()).kind,
            PlayerEventKind::BgmStopped
        );
        assert_eq!(
            player.handle(&AudioCommand::get_status()).data,
            json!({ "playing": false, "volume": 1.0 })
        );
    }

    #[test]
    fn bad_volume_reports_error() {
        let mut player = endpoint();
        let reply = player.handle(&AudioCommand::set_volume(f64::NAN));
        assert_eq!(reply.kind, PlayerEventKind::BgmError);
        assert_eq!(reply.data, json!("invalid volume: NaN"));

        let missing: AudioCommand =
            serde_json::from_value(json!({ "type": "SET_VOLUME", "value": null })).unwrap();
        let reply = player.handle(&missing);
        assert_eq!(reply.kind, PlayerEventKind::BgmError);
        assert_eq!(reply.data, json!("invalid volume: missing"));
    }

    #[test]
    fn rejected_playback_reports_error() {
        let player_bgm = MockSound::new("bgm.mp3", CallLog::default());
        player_bgm.reject.set(true);
        let mut player = PlayerEndpoint::new(player_bgm, 0.3);
        let reply = player.handle(&AudioCommand::play_bgm());
        assert_eq!(reply.kind, PlayerEventKind::BgmError);
    }

    /// Delivers straight into a player endpoint and collects its replies.
    struct DirectFrame {
        player: Rc<RefCell<PlayerEndpoint<MockSound>>>,
        replies: Rc<RefCell<Vec<Value>>>,
    }

    impl CommandSink for DirectFrame {
        fn post(&self, command: &AudioCommand) -> Result<(), AudioError> {
            let reply = self.player.borrow_mut().handle(command);
            self.replies.borrow_mut().push(serde_json::to_value(reply)?);
            Ok(())
        }
    }

    #[test]
    fn controller_and_player_round_trip() {
        let player = Rc::new(RefCell::new(endpoint()));
        let replies = Rc::new(RefCell::new(Vec::new()));
        let log = CallLog::default();
        let sounds = SoundBank::load(&AudioConfig::default(), |path| {
            MockSound::new(path, log.clone())
        });
        let mut controller = AudioController::new("audio-player-frame", sounds);
        controller
            .init(Some(DirectFrame {
                player: player.clone(),
                replies: replies.clone(),
            }))
            .unwrap();

        controller.set_volume(0.2).unwrap();
        controller.play_bgm().unwrap();
        controller.get_status().unwrap();
        assert!(replies.borrow().is_empty());

        let ready = serde_json::to_value(player.borrow().ready()).unwrap();
        controller.handle_raw(&ready);

        let kinds: Vec<PlayerEventKind> = replies
            .borrow()
            .iter()
            .filter_map(PlayerMessage::from_value)
            .map(|message| message.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                PlayerEventKind::Status,
                PlayerEventKind::BgmPlaying,
                PlayerEventKind::Status
            ]
        );
        for reply in replies.borrow().iter() {
            assert!(
                controller.handle_raw(reply).is_some(),
                "player replies are accepted by the controller"
            );
        }
        assert_eq!(
            controller.last_event().map(|event| event.data.clone()),
            Some(json!({ "playing": true, "volume": 0.2 }))
        );
    }
}
