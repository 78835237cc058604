use serde::{Deserialize, Serialize};

/// Id of the element whose text content may hold a JSON [`AudioConfig`].
pub const CONFIG_ELEMENT_ID: &str = "fortune-hands-config";

/// Which audio authority a page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AudioMode {
    /// The page owns its own audio elements.
    #[default]
    Local,
    /// Background music runs in a hidden player frame driven over messages.
    PlayerFrame,
    /// Calls are forwarded to the parent frame's authority.
    Relay,
}

/// Audio settings. Every field has a default, so a partial JSON document is
/// enough to override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_sound_dir")]
    pub sound_dir: String,
    #[serde(default = "default_bgm_file")]
    pub bgm_file: String,
    #[serde(default = "default_bgm_volume")]
    pub bgm_volume: f64,
    #[serde(default = "default_effect_volume")]
    pub effect_volume: f64,
    #[serde(default = "default_player_frame_id")]
    pub player_frame_id: String,
    /// Page loaded into the player frame once the controller listens.
    #[serde(default = "default_player_url")]
    pub player_url: String,
    /// Delay before the controller looks up the player frame.
    #[serde(default = "default_frame_attach_delay_ms")]
    pub frame_attach_delay_ms: u32,
    #[serde(default)]
    pub mode: AudioMode,
}

fn default_sound_dir() -> String {
    "/static/assets/sound".to_string()
}

fn default_bgm_file() -> String {
    "bgm-fortune-hands.mp3".to_string()
}

fn default_bgm_volume() -> f64 {
    0.3
}

fn default_effect_volume() -> f64 {
    0.5
}

fn default_player_frame_id() -> String {
    "audio-player-frame".to_string()
}

fn default_player_url() -> String {
    "/audio-player".to_string()
}

fn default_frame_attach_delay_ms() -> u32 {
    500
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sound_dir: default_sound_dir(),
            bgm_file: default_bgm_file(),
            bgm_volume: default_bgm_volume(),
            effect_volume: default_effect_volume(),
            player_frame_id: default_player_frame_id(),
            player_url: default_player_url(),
            frame_attach_delay_ms: default_frame_attach_delay_ms(),
            mode: AudioMode::default(),
        }
    }
}

impl AudioConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Absolute path of a file in the sound directory.
    pub fn sound_path(&self, file: &str) -> String {
        format!("{}/{}", self.sound_dir.trim_end_matches('/'), file)
    }

    pub fn bgm_path(&self) -> String {
        self.sound_path(&self.bgm_file)
    }

    /// Embedded pages always relay to their parent, whatever was configured.
    pub fn effective_mode(&self, embedded: bool) -> AudioMode {
        if embedded {
            AudioMode::Relay
        } else {
            self.mode
        }
    }
}
