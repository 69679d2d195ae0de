//! Connections and levers — lockable corridors between adjacent cells.

use serde::{Deserialize, Serialize};

use crate::cell::Coord;

/// Stable handle to a connection record in the topology's arena.
pub type ConnectionId = usize;

/// A corridor between two grid-adjacent cells.
///
/// One record serves both directions: the topology maps (a, b) and (b, a)
/// to the same `ConnectionId`, so a lock toggle affects both ways
/// atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub a: Coord,
    pub b: Coord,
    pub locked: bool,
    /// Optional key item that opens this door, if the game hands one out.
    pub key: Option<String>,
}

impl Connection {
    pub fn open(a: Coord, b: Coord) -> Self {
        Self {
            a,
            b,
            locked: false,
            key: None,
        }
    }

    /// The endpoint opposite `from`, if `from` is an endpoint at all.
    pub fn other_end(&self, from: Coord) -> Option<Coord> {
        if from == self.a {
            Some(self.b)
        } else if from == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// A lever toggles the locks of a fixed set of target connections.
///
/// Inactive by default. Invariant: every target's `locked` flag equals
/// `!active`, re-applied whenever a target is added or the lever flips —
/// see the lever operations on the topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lever {
    pub cell: Coord,
    pub targets: Vec<ConnectionId>,
    pub active: bool,
}

impl Lever {
    pub fn new(cell: Coord) -> Self {
        Self {
            cell,
            targets: Vec::new(),
            active: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_end() {
        let conn = Connection::open(Coord::new(0, 0), Coord::new(1, 0));
        assert_eq!(conn.other_end(Coord::new(0, 0)), Some(Coord::new(1, 0)));
        assert_eq!(conn.other_end(Coord::new(1, 0)), Some(Coord::new(0, 0)));
        assert_eq!(conn.other_end(Coord::new(5, 5)), None);
    }

    #[test]
    fn test_new_lever_inactive() {
        let lever = Lever::new(Coord::new(2, 2));
        assert!(!lever.active);
        assert!(lever.targets.is_empty());
    }
}
