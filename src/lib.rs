//! Cosmic Arcade - the minigames behind a web-radio landing page
//!
//! Four self-contained, deterministic, tick-driven simulations. Each one
//! exposes the same contract to the host (`init` / `apply_input` / `tick` /
//! `reset`, see [`session`]); the presentation layer renders snapshots and
//! forwards input events, nothing more.
//!
//! Core modules:
//! - `geom`: shared grid and rectangle collision primitives
//! - `input`: buffered command queue, drained at the start of each tick
//! - `session`: the engine contract and host binding
//! - `snake`: grid growth game
//! - `bomber`: bomb arena duel against a scripted opponent
//! - `invaders`: enemy-formation shooter
//! - `riff`: four-lane rhythm stage

pub mod bomber;
pub mod geom;
pub mod input;
pub mod invaders;
pub mod riff;
pub mod session;
pub mod snake;

pub use input::InputQueue;
pub use session::{DEFAULT_PLAYER_NAME, Engine, Session};
