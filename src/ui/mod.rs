//! Terminal UI: renders the board grid and drives the interactive game loop
//! from keyboard input. Strictly a listener of the game model — it subscribes
//! to board and tile events and calls the board's command surface, nothing
//! more.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
