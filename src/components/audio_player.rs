use dioxus::prelude::*;
use fortune_hands::platform;

/// Page loaded into the hidden player frame. It renders nothing; it only
/// answers the parent's audio commands.
#[component]
pub fn AudioPlayer() -> Element {
    use_hook(|| platform::start_player_endpoint(&platform::load_config()));
    rsx! {}
}
