//! Loading screen, round intro, the round itself and the two match endings.

use crate::components::{go_to, use_audio};
use dioxus::prelude::*;
use fortune_hands::audio::{best_effort, SoundName};
use fortune_hands::game::{FinalResult, Gesture, MatchProgress, MatchState, RoundResult};
use fortune_hands::platform;
use tracing::info;

const LOADING_MS: u32 = 1_500;
const COUNTDOWN_MS: u32 = 3_000;
const RESULT_MS: u32 = 2_000;

#[component]
pub fn Loading() -> Element {
    let audio = use_audio();
    let navigator = use_navigator();

    use_effect(move || {
        best_effort(audio.play_sound(SoundName::PaperScroll), "loading sound");
        spawn(async move {
            platform::sleep_ms(LOADING_MS).await;
            go_to(navigator, "/round");
        });
    });

    rsx! {
        div { class: "loading",
            p { "Shuffling the fortunes..." }
        }
    }
}

#[component]
pub fn RoundIntro() -> Element {
    let audio = use_audio();
    let navigator = use_navigator();
    let match_state = use_context::<Signal<MatchState>>();

    use_effect(move || {
        best_effort(audio.play_sound(SoundName::Countdown), "countdown");
        spawn(async move {
            platform::sleep_ms(COUNTDOWN_MS).await;
            go_to(navigator, "/game");
        });
    });

    let state = match_state();
    rsx! {
        div { class: "round-intro",
            h2 { "Round {state.current_round()}" }
            Scoreboard { wins: state.wins(), losses: state.losses() }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PlayedRound {
    player: Gesture,
    computer: Gesture,
    result: RoundResult,
}

impl PlayedRound {
    fn headline(&self) -> &'static str {
        match self.result {
            RoundResult::Win => "You win this round",
            RoundResult::Lose => "You lose this round",
            RoundResult::Draw => "Draw, go again",
        }
    }
}

fn next_path(progress: MatchProgress) -> &'static str {
    match progress {
        MatchProgress::GameOver(FinalResult::Win) => "/win",
        MatchProgress::GameOver(FinalResult::Lose) => "/lose",
        MatchProgress::Continue { .. } => "/round",
    }
}

/// One round. Hand detection feeds the same gesture callback as the buttons.
#[component]
pub fn Game() -> Element {
    let audio = use_audio();
    let navigator = use_navigator();
    let mut match_state = use_context::<Signal<MatchState>>();
    let mut played = use_signal(|| None::<PlayedRound>);

    let on_gesture = use_callback(move |player: Gesture| {
        if played().is_some() {
            return;
        }
        best_effort(audio.play_sound(SoundName::HandDetected), "hand detected");

        let computer = Gesture::random(&mut rand::thread_rng());
        let result = player.against(computer);
        best_effort(audio.play_sound(result.sound()), "round result");
        let progress = match_state.write().record(result);
        info!(
            player = player.label(),
            computer = computer.label(),
            ?result,
            "round played"
        );
        played.set(Some(PlayedRound {
            player,
            computer,
            result,
        }));

        spawn(async move {
            platform::sleep_ms(RESULT_MS).await;
            go_to(navigator, next_path(progress));
        });
    });

    let state = match_state();
    rsx! {
        div { class: "game",
            h2 { "Round {state.current_round()}" }
            Scoreboard { wins: state.wins(), losses: state.losses() }
            {
                match played() {
                    Some(round) => rsx! {
                        div { class: "round-result",
                            p { "You: {round.player.label()}" }
                            p { "Fortune: {round.computer.label()}" }
                            h3 { "{round.headline()}" }
                        }
                    },
                    None => rsx! {
                        div { class: "gestures",
                            for gesture in Gesture::ALL {
                                button {
                                    key: "{gesture.label()}",
                                    class: "gesture",
                                    onclick: move |_| on_gesture.call(gesture),
                                    "{gesture.label()}"
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn Scoreboard(wins: u32, losses: u32) -> Element {
    rsx! {
        div { class: "scoreboard",
            span { class: "wins", "Wins {wins}" }
            span { class: "losses", "Losses {losses}" }
        }
    }
}

#[component]
pub fn Win() -> Element {
    rsx! { Finale { result: FinalResult::Win } }
}

#[component]
pub fn Lose() -> Element {
    rsx! { Finale { result: FinalResult::Lose } }
}

#[component]
fn Finale(result: FinalResult) -> Element {
    let audio = use_audio();
    let navigator = use_navigator();
    let mut match_state = use_context::<Signal<MatchState>>();

    use_effect(move || {
        best_effort(audio.play_sound(result.sound()), "match result");
    });

    let headline = match result {
        FinalResult::Win => "The fortune smiles on you",
        FinalResult::Lose => "So close. The fortune wins this time",
    };

    rsx! {
        div { class: "finale",
            h2 { "{headline}" }
            button {
                class: "play-again",
                onclick: move |_| {
                    match_state.set(MatchState::new());
                    go_to(navigator, "/");
                },
                "Play again"
            }
        }
    }
}
