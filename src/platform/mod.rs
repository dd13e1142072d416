//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (`requestAnimationFrame` on web, fixed steps natively)
//! - Input decoding (key codes and touches into intents)

pub mod headless;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{HeadlessSession, autopilot_intent};
pub use input::{intent_for_key, intent_for_touch};
