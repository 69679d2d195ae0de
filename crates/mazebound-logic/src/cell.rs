//! Cells — grid positions that double as graph vertices.
//!
//! A cell's identity is its coordinate pair. The `entrance` and `center`
//! flags are fixed at generation time; the gameplay flags are toggled by
//! collaborators during play and never change the topology except through
//! [`Cell::move_cost`].

use serde::{Deserialize, Serialize};

use crate::constants::{BASE_MOVE_COST, DIRECTIONS};

/// Identity key of a cell: its integer grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four grid-adjacent coordinates, clockwise from north. May lie
    /// outside any particular maze — callers bounds-check.
    pub fn grid_neighbors(self) -> [Coord; 4] {
        let mut out = [self; 4];
        for (i, &(dx, dy)) in DIRECTIONS.iter().enumerate() {
            out[i] = Coord::new(self.x + dx, self.y + dy);
        }
        out
    }

    /// Whether `other` is exactly one grid step away.
    pub fn is_adjacent(self, other: Coord) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }

    pub fn manhattan(self, other: Coord) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }
}

/// Stable handle to a lever in the topology's lever list.
pub type LeverId = usize;

/// A room in the maze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub coord: Coord,
    pub entrance: bool,
    pub center: bool,
    pub pickaxe: bool,
    pub ender_pearl: bool,
    pub question: bool,
    pub soul_sand: bool,
    /// A cell owns at most one lever.
    pub lever: Option<LeverId>,
}

impl Cell {
    pub fn new(coord: Coord) -> Self {
        Self {
            coord,
            entrance: false,
            center: false,
            pickaxe: false,
            ender_pearl: false,
            question: false,
            soul_sand: false,
            lever: None,
        }
    }

    /// Cost of moving into this cell. Uniform: soul sand slows the walker,
    /// not the route weight.
    pub fn move_cost(&self) -> f64 {
        BASE_MOVE_COST
    }

    /// True when nothing occupies this cell — placement code asks this
    /// before claiming it for an item, question, or lever.
    pub fn is_free(&self) -> bool {
        !self.entrance
            && !self.center
            && !self.pickaxe
            && !self.ender_pearl
            && !self.question
            && self.lever.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_neighbors() {
        let n = Coord::new(3, 4).grid_neighbors();
        assert!(n.contains(&Coord::new(3, 3)));
        assert!(n.contains(&Coord::new(4, 4)));
        assert!(n.contains(&Coord::new(3, 5)));
        assert!(n.contains(&Coord::new(2, 4)));
    }

    #[test]
    fn test_adjacency() {
        let c = Coord::new(0, 0);
        assert!(c.is_adjacent(Coord::new(1, 0)));
        assert!(c.is_adjacent(Coord::new(0, 1)));
        assert!(!c.is_adjacent(Coord::new(1, 1)));
        assert!(!c.is_adjacent(c));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Coord::new(0, 0).manhattan(Coord::new(3, 4)), 7);
        assert_eq!(Coord::new(2, 2).manhattan(Coord::new(2, 2)), 0);
    }

    #[test]
    fn test_fresh_cell_is_free() {
        let cell = Cell::new(Coord::new(1, 1));
        assert!(cell.is_free());
    }

    #[test]
    fn test_occupied_cell_not_free() {
        let mut cell = Cell::new(Coord::new(1, 1));
        cell.pickaxe = true;
        assert!(!cell.is_free());

        let mut cell = Cell::new(Coord::new(1, 1));
        cell.lever = Some(0);
        assert!(!cell.is_free());
    }

    #[test]
    fn test_soul_sand_does_not_block_placement() {
        let mut cell = Cell::new(Coord::new(1, 1));
        cell.soul_sand = true;
        assert!(cell.is_free());
        assert_eq!(cell.move_cost(), BASE_MOVE_COST);
    }
}
