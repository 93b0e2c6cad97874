//! Notification plumbing between the model and its listeners. Neither the
//! game logic nor any display logic lives here; this is only the channel
//! that carries change events outward in a model-view-controller pattern.

use std::cell::RefCell;
use std::rc::Rc;

use super::vector::Vec2;

/// What a listener gets to see of a tile: where it is and what number it
/// shows. A snapshot, not a live handle — listeners cannot mutate the board
/// through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSnapshot {
    pub pos: Vec2,
    pub value: u32,
}

/// A state change broadcast from the model to registered listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A tile was placed on a previously empty cell.
    TileCreated(TileSnapshot),
    /// A tile changed position or value.
    TileUpdated(TileSnapshot),
    /// A tile was absorbed by a merge and no longer exists.
    TileRemoved(TileSnapshot),
}

impl GameEvent {
    /// The tile this event is about.
    pub fn tile(&self) -> TileSnapshot {
        match self {
            GameEvent::TileCreated(t) | GameEvent::TileUpdated(t) | GameEvent::TileRemoved(t) => {
                *t
            }
        }
    }
}

/// Receives change notifications from the board and its tiles.
///
/// Delivery is synchronous and in registration order: `notify` runs before
/// the operation that triggered it returns.
pub trait GameListener {
    fn notify(&mut self, event: &GameEvent);
}

/// Shared handle to a listener. The model is single-threaded, so a plain
/// `Rc<RefCell<..>>` lets one listener subscribe to the board and to
/// individual tiles at the same time.
pub type ListenerHandle = Rc<RefCell<dyn GameListener>>;

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Listener that records every event it is notified of, in order.
    pub struct Recorder {
        pub events: Vec<GameEvent>,
    }

    impl Recorder {
        pub fn handle() -> Rc<RefCell<Recorder>> {
            Rc::new(RefCell::new(Recorder { events: Vec::new() }))
        }
    }

    impl GameListener for Recorder {
        fn notify(&mut self, event: &GameEvent) {
            self.events.push(*event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Recorder;
    use super::*;

    #[test]
    fn test_event_carries_snapshot() {
        let snap = TileSnapshot {
            pos: Vec2::new(1, 2),
            value: 4,
        };
        assert_eq!(GameEvent::TileCreated(snap).tile(), snap);
        assert_eq!(GameEvent::TileUpdated(snap).tile(), snap);
        assert_eq!(GameEvent::TileRemoved(snap).tile(), snap);
    }

    #[test]
    fn test_recorder_keeps_order() {
        let recorder = Recorder::handle();
        let a = GameEvent::TileCreated(TileSnapshot {
            pos: Vec2::new(0, 0),
            value: 2,
        });
        let b = GameEvent::TileRemoved(TileSnapshot {
            pos: Vec2::new(0, 1),
            value: 2,
        });
        recorder.borrow_mut().notify(&a);
        recorder.borrow_mut().notify(&b);
        assert_eq!(recorder.borrow().events, vec![a, b]);
    }
}
