//! Blockfall (workspace facade crate).
//!
//! Re-exports the rules engine as `blockfall::{core, types}` and adds the
//! greedy [`autoplay`] planner used by the headless runner. Rendering, audio
//! and input polling are left to the embedding application.

pub mod autoplay;

pub use blockfall_core as core;
pub use blockfall_types as types;
