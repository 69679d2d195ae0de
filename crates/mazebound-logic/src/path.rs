//! Lock-aware path and distance queries.
//!
//! Both run against the lock state at call time; callers re-query after a
//! lever pull instead of caching results across toggles. Invalid cells
//! never error — they yield an empty path or an all-unreachable field.

use std::collections::{HashMap, VecDeque};

use crate::cell::Coord;
use crate::constants::UNREACHABLE;
use crate::topology::MazeTopology;

/// Hop distances from one target cell to every cell in the topology.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    distances: HashMap<Coord, u32>,
}

impl DistanceField {
    /// Hops from the field's target to `coord`; [`UNREACHABLE`] when no
    /// unlocked route exists or the cell is unknown.
    pub fn distance(&self, coord: Coord) -> u32 {
        self.distances.get(&coord).copied().unwrap_or(UNREACHABLE)
    }

    pub fn is_reachable(&self, coord: Coord) -> bool {
        self.distance(coord) != UNREACHABLE
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, u32)> + '_ {
        self.distances.iter().map(|(&coord, &d)| (coord, d))
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Weight-optimal route start..=end honoring the current locks. Empty
/// when either end is unknown or the end is unreachable.
pub fn shortest_path(topo: &MazeTopology, start: Coord, end: Coord) -> Vec<Coord> {
    topo.network()
        .shortest_path_filtered(&start, &end, |a, b| topo.can_traverse(*a, *b))
}

/// Unweighted hop distance from `target` to every cell, expanding only
/// through traversable connections. An unknown target yields an
/// all-unreachable field.
pub fn distance_field(topo: &MazeTopology, target: Coord) -> DistanceField {
    let mut distances: HashMap<Coord, u32> =
        topo.cells().map(|cell| (cell.coord, UNREACHABLE)).collect();
    if !topo.contains(target) {
        return DistanceField { distances };
    }
    distances.insert(target, 0);
    let mut frontier = VecDeque::new();
    frontier.push_back(target);
    while let Some(current) = frontier.pop_front() {
        let next_hop = distances[&current] + 1;
        for neighbor in topo.neighbors(current) {
            if distances.get(&neighbor) == Some(&UNREACHABLE) {
                distances.insert(neighbor, next_hop);
                frontier.push_back(neighbor);
            }
        }
    }
    DistanceField { distances }
}
