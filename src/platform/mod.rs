//! Browser bindings. The wasm build talks to the DOM through `web-sys`; the
//! host build (tests, tooling) gets silent stand-ins with the same surface.

#[cfg(not(target_arch = "wasm32"))]
mod host;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use host::*;
#[cfg(target_arch = "wasm32")]
pub use web::*;
