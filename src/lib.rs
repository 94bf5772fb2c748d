//! Two-player snake on a walled character grid.
//!
//! The simulation (`game`, `grid`, `snake`) does no I/O: the binary feeds it
//! one `Intent` per player each tick and draws the board it hands back
//! through `view`.

pub mod config;
pub mod controls;
pub mod game;
pub mod grid;
pub mod snake;
pub mod view;
