//! The components module contains the router and every page of the game.

mod app;
mod audio_player;
mod pages;
mod tap_start;

pub use app::*;
pub use audio_player::*;
pub use pages::*;
pub use tap_start::*;
