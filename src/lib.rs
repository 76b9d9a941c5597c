//! Falling-block puzzle game.
//!
//! `game` holds the renderer-agnostic simulation, `input` turns key states
//! into commands, `ui` draws the board into a terminal frame.

pub mod config;
pub mod constants;
pub mod game;
pub mod input;
pub mod ui;
