//! Page navigation that works the same from a top-level page or from inside
//! an embedding frame.

use crate::audio::NavMessage;

pub const LOADING_PATH: &str = "/loading";

/// How a navigation request gets carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    /// Ask the parent frame to navigate.
    RelayToParent(NavMessage),
    /// Navigate this page.
    Direct(String),
}

pub fn resolve(url: &str, embedded: bool) -> NavAction {
    if embedded {
        NavAction::RelayToParent(NavMessage::new(url))
    } else {
        NavAction::Direct(url.to_string())
    }
}

/// Where a click on the tap-to-start screen landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapTarget {
    /// The start button or anything inside it.
    Button,
    /// Elsewhere inside the tap-start container. Clicks outside it have no
    /// handler at all.
    Container,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapOutcome {
    pub navigate_to: &'static str,
    pub play_click: bool,
}

/// The whole tap-start container acts as the start button; only the button
/// itself plays the click effect.
pub fn tap_start(target: TapTarget) -> TapOutcome {
    match target {
        TapTarget::Button => TapOutcome {
            navigate_to: LOADING_PATH,
            play_click: true,
        },
        TapTarget::Container => TapOutcome {
            navigate_to: LOADING_PATH,
            play_click: false,
        },
    }
}
