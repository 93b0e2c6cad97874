use std::fmt;

use super::event::{GameEvent, ListenerHandle, TileSnapshot};
use super::vector::Vec2;

/// A slidy numbered thing.
///
/// A tile knows its own position and value and tells its listeners when
/// either changes. It never touches the board; the board moves tiles between
/// grid slots separately.
pub struct Tile {
    pos: Vec2,
    value: u32,
    listeners: Vec<ListenerHandle>,
}

impl Tile {
    pub fn new(pos: Vec2, value: u32) -> Self {
        Tile {
            pos,
            value,
            listeners: Vec::new(),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// True when two tiles show the same number.
    ///
    /// This is the comparison the slide logic uses to decide whether two
    /// tiles may merge. Position and identity are deliberately ignored, and
    /// the comparison is a named method rather than a `PartialEq` impl so it
    /// cannot be picked up accidentally elsewhere.
    pub fn values_equal(&self, other: &Tile) -> bool {
        self.value == other.value
    }

    pub fn add_listener(&mut self, listener: ListenerHandle) {
        self.listeners.push(listener);
    }

    /// Read-only view of this tile for event payloads.
    pub fn snapshot(&self) -> TileSnapshot {
        TileSnapshot {
            pos: self.pos,
            value: self.value,
        }
    }

    fn notify_all(&self, event: GameEvent) {
        for listener in &self.listeners {
            listener.borrow_mut().notify(&event);
        }
    }

    /// Move this tile to `new_pos` and notify its listeners.
    ///
    /// Updates only the tile's own record of where it is; the board adjusts
    /// its grid slots itself.
    pub fn move_to(&mut self, new_pos: Vec2) {
        self.pos = new_pos;
        self.notify_all(GameEvent::TileUpdated(self.snapshot()));
    }

    /// Absorb `other` into this tile, doubling up.
    ///
    /// Emits Updated for this tile, then Removed for the absorbed one. The
    /// absorbed tile is consumed; nothing can mutate it afterwards.
    ///
    /// Precondition: both tiles hold the same value. The board only calls
    /// this for tiles that compare equal under [`Tile::values_equal`].
    pub fn merge(&mut self, other: Tile) {
        debug_assert!(self.values_equal(&other), "merge requires equal values");
        self.value += other.value;
        self.notify_all(GameEvent::TileUpdated(self.snapshot()));
        other.notify_all(GameEvent::TileRemoved(other.snapshot()));
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile[{},{}]:{}", self.pos.row, self.pos.col, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::super::event::testing::Recorder;
    use super::*;

    #[test]
    fn test_values_equal_ignores_position() {
        let a = Tile::new(Vec2::new(0, 0), 4);
        let b = Tile::new(Vec2::new(3, 2), 4);
        let c = Tile::new(Vec2::new(0, 0), 8);
        assert!(a.values_equal(&b));
        assert!(!a.values_equal(&c));
    }

    #[test]
    fn test_move_to_updates_position_and_notifies() {
        let recorder = Recorder::handle();
        let mut tile = Tile::new(Vec2::new(1, 2), 2);
        tile.add_listener(recorder.clone());

        tile.move_to(Vec2::new(1, 0));

        assert_eq!(tile.position(), Vec2::new(1, 0));
        assert_eq!(
            recorder.borrow().events,
            vec![GameEvent::TileUpdated(TileSnapshot {
                pos: Vec2::new(1, 0),
                value: 2,
            })]
        );
    }

    #[test]
    fn test_merge_sums_values_and_notifies_both() {
        let keeper_log = Recorder::handle();
        let absorbed_log = Recorder::handle();
        let mut keeper = Tile::new(Vec2::new(0, 1), 2);
        let mut absorbed = Tile::new(Vec2::new(0, 2), 2);
        keeper.add_listener(keeper_log.clone());
        absorbed.add_listener(absorbed_log.clone());

        keeper.merge(absorbed);

        assert_eq!(keeper.value(), 4);
        assert_eq!(
            keeper_log.borrow().events,
            vec![GameEvent::TileUpdated(TileSnapshot {
                pos: Vec2::new(0, 1),
                value: 4,
            })]
        );
        assert_eq!(
            absorbed_log.borrow().events,
            vec![GameEvent::TileRemoved(TileSnapshot {
                pos: Vec2::new(0, 2),
                value: 2,
            })]
        );
    }

    #[test]
    fn test_listeners_notified_in_registration_order() {
        let first = Recorder::handle();
        let second = Recorder::handle();
        let mut tile = Tile::new(Vec2::new(0, 0), 2);
        tile.add_listener(first.clone());
        tile.add_listener(second.clone());

        tile.move_to(Vec2::new(0, 1));

        // Both saw the event; order across listeners is registration order,
        // which we can only observe here as "both delivered synchronously".
        assert_eq!(first.borrow().events.len(), 1);
        assert_eq!(second.borrow().events.len(), 1);
    }

    #[test]
    fn test_debug_format() {
        let tile = Tile::new(Vec2::new(2, 3), 16);
        assert_eq!(format!("{:?}", tile), "Tile[2,3]:16");
    }
}
