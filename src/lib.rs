//! # FiveTwelve
//!
//! A small single-player sliding-tile puzzle — a 2048 variant — built with a
//! model-view-controller split. The model lives in [`game`] and pushes change
//! notifications outward through registered listeners; the terminal view in
//! [`ui`] subscribes to those notifications and drives the board through its
//! command surface. The model never depends on the view.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board grid, tiles, slide/merge moves, events
//! - [`ui`] — Terminal UI: board rendering and the interactive game loop
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
