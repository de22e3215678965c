//! Tick-driven grid snake simulation.
//!
//! The simulation core (`grid`, `snake`, `classify`, `fruit`, `growth`,
//! `game`) is synchronous and side-effect free. Each [`game::GameState::tick`]
//! returns events, and [`game::GameState::snapshot`] builds an immutable
//! rendering state. Audio and persistence are reached only through the
//! [`audio::AudioSink`] and [`prefs::PreferenceStore`] traits.

pub mod audio;
pub mod classify;
pub mod config;
pub mod error;
pub mod fruit;
pub mod game;
pub mod grid;
pub mod growth;
pub mod input;
pub mod prefs;
pub mod renderer;
pub mod snake;
pub mod ui;
