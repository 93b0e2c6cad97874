use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::event::{GameEvent, ListenerHandle, TileSnapshot};
use super::tile::Tile;
use super::vector::Vec2;
use super::GRID_SIZE;

/// The game grid: a rows x cols array of slots, each empty or holding one
/// tile.
///
/// The board owns its tiles outright; the outside world sees them only
/// through queries and event notifications. Moves are discrete commands
/// (`left`, `right`, `up`, `down`, `place_tile`) and every notification they
/// trigger is delivered before the command returns.
pub struct Board {
    rows: usize,
    cols: usize,
    tiles: Vec<Vec<Option<Tile>>>,
    listeners: Vec<ListenerHandle>,
    rng: StdRng,
}

impl Board {
    /// A default-sized board with an OS-seeded tile-placement RNG.
    pub fn new() -> Self {
        Self::with_rng(GRID_SIZE, GRID_SIZE, StdRng::from_os_rng())
    }

    pub fn with_dims(rows: usize, cols: usize) -> Self {
        Self::with_rng(rows, cols, StdRng::from_os_rng())
    }

    /// Deterministic board for tests and reproducible games.
    pub fn from_seed(rows: usize, cols: usize, seed: u64) -> Self {
        Self::with_rng(rows, cols, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rows: usize, cols: usize, rng: StdRng) -> Self {
        assert!(rows > 0 && cols > 0, "board must have at least one cell");
        let tiles = (0..rows)
            .map(|_| (0..cols).map(|_| None).collect())
            .collect();
        Board {
            rows,
            cols,
            tiles,
            listeners: Vec::new(),
            rng,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Subscribe a listener to board-level events (tile creation).
    pub fn add_listener(&mut self, listener: ListenerHandle) {
        self.listeners.push(listener);
    }

    /// Subscribe a listener to the tile at `pos`, if one is there.
    ///
    /// Views typically call this from their handler for `TileCreated`, so
    /// that later moves and merges of that tile reach them too.
    pub fn add_tile_listener(&mut self, pos: Vec2, listener: ListenerHandle) {
        if let Some(tile) = self.slot_mut(pos).as_mut() {
            tile.add_listener(listener);
        }
    }

    /// Is `pos` a legal position on the board?
    pub fn in_bounds(&self, pos: Vec2) -> bool {
        pos.row >= 0 && (pos.row as usize) < self.rows && pos.col >= 0 && (pos.col as usize) < self.cols
    }

    /// The tile at `pos`, if any. Panics on out-of-bounds positions.
    pub fn get(&self, pos: Vec2) -> Option<&Tile> {
        self.slot(pos).as_ref()
    }

    // Direct slot access panics on out-of-bounds indices; bounds-tolerant
    // callers go through `in_bounds` first.
    fn slot(&self, pos: Vec2) -> &Option<Tile> {
        &self.tiles[pos.row as usize][pos.col as usize]
    }

    fn slot_mut(&mut self, pos: Vec2) -> &mut Option<Tile> {
        &mut self.tiles[pos.row as usize][pos.col as usize]
    }

    fn values_equal_at(&self, a: Vec2, b: Vec2) -> bool {
        match (self.slot(a), self.slot(b)) {
            (Some(x), Some(y)) => x.values_equal(y),
            _ => false,
        }
    }

    /// Slide the tile at `pos` (if any) step by step in direction `dir`
    /// until it reaches the edge, merges with an equal-valued tile, or bumps
    /// into an unequal one.
    ///
    /// A tile merges at most once per slide. A tile that already merged in
    /// an earlier slide of the same move may still be merged again by a
    /// later slide; only the in-flight tile stops.
    pub fn slide(&mut self, mut pos: Vec2, dir: Vec2) {
        if self.slot(pos).is_none() {
            return;
        }
        loop {
            let next = pos + dir;
            if !self.in_bounds(next) {
                break;
            }
            if self.slot(next).is_none() {
                self.move_tile(pos, next);
            } else if self.values_equal_at(pos, next) {
                let absorbed = self.slot_mut(next).take().expect("occupied slot");
                self.slot_mut(pos)
                    .as_mut()
                    .expect("sliding tile present")
                    .merge(absorbed);
                self.move_tile(pos, next);
                break; // stop moving once we merge
            } else {
                // Stuck against another tile
                break;
            }
            pos = next;
        }
    }

    fn move_tile(&mut self, old_pos: Vec2, new_pos: Vec2) {
        if let Some(mut tile) = self.slot_mut(old_pos).take() {
            tile.move_to(new_pos);
            *self.slot_mut(new_pos) = Some(tile);
        }
    }

    /// Slide every tile toward the left edge.
    ///
    /// For each direction, cells nearer the target edge are processed first;
    /// processing in the wrong order produces bad merge chains (a row of
    /// four equal tiles must become two pairs, never a triple-merge).
    pub fn left(&mut self) {
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                self.slide(Vec2::new(row, col), Vec2::LEFT);
            }
        }
    }

    pub fn right(&mut self) {
        for row in 0..self.rows as i32 {
            for col in (0..self.cols as i32).rev() {
                self.slide(Vec2::new(row, col), Vec2::RIGHT);
            }
        }
    }

    pub fn up(&mut self) {
        for col in 0..self.cols as i32 {
            for row in 0..self.rows as i32 {
                self.slide(Vec2::new(row, col), Vec2::UP);
            }
        }
    }

    pub fn down(&mut self) {
        for col in 0..self.cols as i32 {
            for row in (0..self.rows as i32).rev() {
                self.slide(Vec2::new(row, col), Vec2::DOWN);
            }
        }
    }

    /// Is there at least one cell without a tile?
    pub fn has_empty(&self) -> bool {
        self.tiles.iter().flatten().any(|slot| slot.is_none())
    }

    fn empty_positions(&self) -> Vec<Vec2> {
        let mut empties = Vec::new();
        for (row, row_tiles) in self.tiles.iter().enumerate() {
            for (col, slot) in row_tiles.iter().enumerate() {
                if slot.is_none() {
                    empties.push(Vec2::new(row as i32, col as i32));
                }
            }
        }
        empties
    }

    /// Place a tile on a uniformly chosen empty cell and notify listeners.
    ///
    /// With no explicit value, draws 4 with probability 0.9 and 2 otherwise.
    ///
    /// Panics if the board has no empty cell; callers are expected to check
    /// [`Board::has_empty`] first.
    pub fn place_tile(&mut self, value: Option<u32>) {
        let empties = self.empty_positions();
        assert!(!empties.is_empty(), "place_tile called on a full board");
        let pos = empties[self.rng.random_range(0..empties.len())];
        let value = match value {
            Some(v) => v,
            // 0.1 probability of 2
            None => {
                if self.rng.random::<f64>() > 0.1 {
                    4
                } else {
                    2
                }
            }
        };
        *self.slot_mut(pos) = Some(Tile::new(pos, value));
        self.notify_all(GameEvent::TileCreated(TileSnapshot { pos, value }));
    }

    /// Sum of all tile values on the board.
    ///
    /// Unlike classic 2048, the score is a function of the current state,
    /// not of the sequence of moves.
    pub fn score(&self) -> u32 {
        self.tiles
            .iter()
            .flatten()
            .filter_map(|slot| slot.as_ref().map(Tile::value))
            .sum()
    }

    /// Test scaffolding: each tile as its value, empty cells as 0.
    pub fn to_list(&self) -> Vec<Vec<u32>> {
        self.tiles
            .iter()
            .map(|row| {
                row.iter()
                    .map(|slot| slot.as_ref().map_or(0, Tile::value))
                    .collect()
            })
            .collect()
    }

    /// Test scaffolding: replace the whole grid with fresh tiles matching
    /// `values`, where 0 marks an empty cell. The board adopts the shape of
    /// the array; listeners on prior tiles are dropped with them.
    pub fn from_list(&mut self, values: &[Vec<u32>]) {
        assert!(!values.is_empty(), "from_list requires at least one row");
        let cols = values[0].len();
        assert!(
            values.iter().all(|row| row.len() == cols),
            "from_list requires a rectangular array"
        );
        self.rows = values.len();
        self.cols = cols;
        self.tiles = values
            .iter()
            .enumerate()
            .map(|(row, row_values)| {
                row_values
                    .iter()
                    .enumerate()
                    .map(|(col, &value)| {
                        if value == 0 {
                            None
                        } else {
                            Some(Tile::new(Vec2::new(row as i32, col as i32), value))
                        }
                    })
                    .collect()
            })
            .collect();
    }

    fn notify_all(&self, event: GameEvent) {
        for listener in &self.listeners {
            listener.borrow_mut().notify(&event);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
