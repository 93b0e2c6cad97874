//! Core FiveTwelve game logic: the board grid, numbered tiles, slide/merge
//! moves, and the event channel that tells a view what changed.

mod board;
mod event;
mod tile;
mod vector;

pub use board::Board;
pub use event::{GameEvent, GameListener, ListenerHandle, TileSnapshot};
pub use tile::Tile;
pub use vector::Vec2;

/// Default board edge length.
pub const GRID_SIZE: usize = 4;
