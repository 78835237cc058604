//! Cross-frame message shapes.
//!
//! Outbound commands: `{ "type": "PLAY_BGM", "value": null }`.
//! Player events: `{ "source": "audio-player", "type": "STATUS", "data": ... }`.
//! Relay handshake: `{ "source": "audio-relay", "type": "RELAY_CALL", "call": ... }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PLAYER_SOURCE: &str = "audio-player";
pub const RELAY_SOURCE: &str = "audio-relay";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandKind {
    PlayBgm,
    StopBgm,
    SetVolume,
    GetStatus,
}

/// A command for the player frame. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioCommand {
    #[serde(rename = "type")]
    kind: CommandKind,
    value: Option<f64>,
}

impl AudioCommand {
    pub fn play_bgm() -> Self {
        Self {
            kind: CommandKind::PlayBgm,
            value: None,
        }
    }

    pub fn stop_bgm() -> Self {
        Self {
            kind: CommandKind::StopBgm,
            value: None,
        }
    }

    pub fn set_volume(volume: f64) -> Self {
        Self {
            kind: CommandKind::SetVolume,
            value: Some(volume),
        }
    }

    pub fn get_status() -> Self {
        Self {
            kind: CommandKind::GetStatus,
            value: None,
        }
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerEventKind {
    AudioPlayerReady,
    BgmPlaying,
    BgmStopped,
    BgmError,
    Status,
    #[serde(other)]
    Unknown,
}

/// Message posted by the player frame to its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMessage {
    pub source: String,
    #[serde(rename = "type")]
    pub kind: PlayerEventKind,
    #[serde(default)]
    pub data: Value,
}

impl PlayerMessage {
    pub fn new(kind: PlayerEventKind, data: Value) -> Self {
        Self {
            source: PLAYER_SOURCE.to_string(),
            kind,
            data,
        }
    }

    pub fn ready() -> Self {
        Self::new(PlayerEventKind::AudioPlayerReady, Value::Null)
    }

    /// Decodes a raw message, keeping only those tagged as coming from the
    /// player. Anything else on the window's message channel is ignored.
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.get("source").and_then(Value::as_str) != Some(PLAYER_SOURCE) {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

/// A call forwarded from an embedded frame to its parent's audio authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum RelayCall {
    #[serde(rename = "init")]
    Init,
    #[serde(rename = "playBGM")]
    PlayBgm,
    #[serde(rename = "stopBGM")]
    StopBgm,
    #[serde(rename = "play")]
    Play { name: String },
    #[serde(rename = "enableAudio")]
    EnableAudio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelayMessage {
    /// Child asks whether the parent hosts an audio authority.
    AudioAuthorityQuery,
    /// Parent states that it does.
    AudioAuthorityAnnounce,
    RelayCall { call: RelayCall },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayEnvelope {
    pub source: String,
    #[serde(flatten)]
    pub message: RelayMessage,
}

impl RelayEnvelope {
    pub fn new(message: RelayMessage) -> Self {
        Self {
            source: RELAY_SOURCE.to_string(),
            message,
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        if value.get("source").and_then(Value::as_str) != Some(RELAY_SOURCE) {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

/// Navigation request relayed from an embedded page to its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavMessage {
    #[serde(rename = "type")]
    kind: NavTag,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum NavTag {
    Nav,
}

impl NavMessage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            kind: NavTag::Nav,
            url: url.into(),
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn commands_serialize_with_null_value() {
        assert_eq!(
            serde_json::to_value(AudioCommand::get_status()).unwrap(),
            json!({ "type": "GET_STATUS", "value": null })
        );
        assert_eq!(
            serde_json::to_value(AudioCommand::set_volume(0.2)).unwrap(),
            json!({ "type": "SET_VOLUME", "value": 0.2 })
        );
    }

    #[test]
    fn player_messages_are_filtered_by_source() {
        let ready = json!({ "source": "audio-player", "type": "AUDIO_PLAYER_READY" });
        let message = PlayerMessage::from_value(&ready).expect("player message");
        assert_eq!(message.kind, PlayerEventKind::AudioPlayerReady);
        assert_eq!(message.data, Value::Null);

        let foreign = json!({ "source": "devtools", "type": "AUDIO_PLAYER_READY" });
        assert!(PlayerMessage::from_value(&foreign).is_none());
        assert!(PlayerMessage::from_value(&json!("hello")).is_none());
    }

    #[test]
    fn unknown_player_event_types_still_decode() {
        let raw = json!({ "source": "audio-player", "type": "VOLUME_CHANGED", "data": 1 });
        let message = PlayerMessage::from_value(&raw).expect("player message");
        assert_eq!(message.kind, PlayerEventKind::Unknown);
    }

    #[test]
    fn relay_envelope_shape() {
        let envelope = RelayEnvelope::new(RelayMessage::RelayCall {
            call: RelayCall::Play {
                name: "click".to_string(),
            },
        });
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "source": "audio-relay",
                "type": "RELAY_CALL",
                "call": { "method": "play", "name": "click" }
            })
        );
        assert_eq!(RelayEnvelope::from_value(&value), Some(envelope));

        let query = json!({ "source": "audio-relay", "type": "AUDIO_AUTHORITY_QUERY" });
        assert_eq!(
            RelayEnvelope::from_value(&query).map(|e| e.message),
            Some(RelayMessage::AudioAuthorityQuery)
        );
    }

    #[test]
    fn nav_message_shape() {
        let value = serde_json::to_value(NavMessage::new("/loading")).unwrap();
        assert_eq!(value, json!({ "type": "nav", "url": "/loading" }));
        assert!(NavMessage::from_value(&json!({ "type": "other", "url": "/" })).is_none());
    }
}
