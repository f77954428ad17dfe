//! Procedural level core for a minefield crossing game.
//!
//! A level is a rectangular board with an entry door at the bottom and an exit door at the top.
//! [`MinefieldGenerator`] samples hidden mines away from the doors and retries until the exit is
//! reachable, [`GameState`] records one attempt as immutable snapshots, and [`Session`] drives
//! the playing, replay, waiting and game-over modes one tick at a time.

#![no_std]

extern crate alloc;

pub use config::*;
pub use error::*;
pub use generator::*;
pub use minefield::*;
pub use pathfinding::*;
pub use progression::*;
pub use replay::*;
pub use session::*;
pub use state::*;
pub use types::*;

mod config;
mod error;
mod generator;
mod minefield;
mod pathfinding;
mod progression;
mod replay;
mod scoring;
mod session;
mod state;
mod types;
