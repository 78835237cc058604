use crate::components::{go_to, use_audio};
use dioxus::prelude::*;
use dioxus::router::Navigator;
use fortune_hands::audio::{best_effort, AudioContext, SoundName};
use fortune_hands::game::MatchState;
use fortune_hands::navigation::{tap_start, TapTarget};

fn handle_tap(
    target: TapTarget,
    audio: &AudioContext,
    navigator: Navigator,
    match_state: &mut Signal<MatchState>,
) {
    let outcome = tap_start(target);
    if outcome.play_click {
        best_effort(audio.play_sound(SoundName::Click), "tap click");
    }
    match_state.set(MatchState::new());
    go_to(navigator, outcome.navigate_to);
}

#[component]
pub fn TapStart() -> Element {
    let audio = use_audio();
    let navigator = use_navigator();
    let match_state = use_context::<Signal<MatchState>>();

    let on_container = {
        let audio = audio.clone();
        let mut match_state = match_state;
        move |_: MouseEvent| handle_tap(TapTarget::Container, &audio, navigator, &mut match_state)
    };
    let on_button = {
        let audio = audio.clone();
        let mut match_state = match_state;
        move |evt: MouseEvent| {
            evt.stop_propagation();
            handle_tap(TapTarget::Button, &audio, navigator, &mut match_state);
        }
    };

    rsx! {
        div { class: "tap-start", onclick: on_container,
            h1 { class: "title", "Fortune Hands" }
            p { class: "subtitle", "Rock, paper, scissors. First to three." }
            button { id: "tapStart", class: "tap-start-button", onclick: on_button, "Tap to start" }
        }
    }
}
