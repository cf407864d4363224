//! Platform abstraction layer
//!
//! The simulation is platform-agnostic; this module hosts the bindings a
//! browser renderer uses to drive a [`Session`](crate::session::Session).

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebGame;
