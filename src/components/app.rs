use crate::components::{AudioPlayer, Game, Loading, Lose, RoundIntro, TapStart, Win};
use dioxus::core::{Runtime, RuntimeGuard};
use dioxus::prelude::*;
use dioxus::router::Navigator;
use fortune_hands::audio::{best_effort, AudioContext};
use fortune_hands::game::MatchState;
use fortune_hands::navigation::{self, NavAction};
use fortune_hands::{platform, AudioMode};

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AudioShell)]
        #[route("/")]
        TapStart {},
        #[route("/loading")]
        Loading {},
        #[route("/round")]
        RoundIntro {},
        #[route("/game")]
        Game {},
        #[route("/win")]
        Win {},
        #[route("/lose")]
        Lose {},
    #[end_layout]
    #[route("/audio-player")]
    AudioPlayer {},
}

/// Navigates this page, or asks the embedding page to when we are framed.
pub fn go_to(navigator: Navigator, url: &str) {
    match navigation::resolve(url, platform::is_embedded()) {
        NavAction::RelayToParent(message) => {
            best_effort(platform::post_to_parent(&message), "relay navigation");
        }
        NavAction::Direct(url) => {
            navigator.push(url.as_str());
        }
    }
}

/// Layout for every game page: owns the page's audio authority and the
/// running match.
#[component]
pub fn AudioShell() -> Element {
    let config = use_hook(platform::load_config);
    let audio = use_hook({
        let config = config.clone();
        move || platform::build_audio_context(&config)
    });
    let match_state = use_signal(MatchState::new);
    let navigator = use_navigator();

    use_context_provider(|| audio.clone());
    use_context_provider(|| match_state);

    // Listeners live for the whole page, so install them exactly once.
    use_hook({
        let audio = audio.clone();
        move || {
            platform::install_interaction_gate(audio);
            let runtime = Runtime::current();
            platform::on_nav_request(move |url| {
                let _guard = RuntimeGuard::new(runtime.clone());
                navigator.push(url.as_str());
            });
        }
    });

    let with_player_frame =
        config.effective_mode(platform::is_embedded()) == AudioMode::PlayerFrame;
    let frame_id = config.player_frame_id.clone();

    rsx! {
        if with_player_frame {
            iframe {
                id: "{frame_id}",
                title: "audio player",
                allow: "autoplay",
                style: "display: none;",
            }
        }
        main { class: "fortune-hands", Outlet::<Route> {} }
    }
}

/// Shared audio authority of the current page.
pub fn use_audio() -> AudioContext {
    use_context::<AudioContext>()
}
