//! Procedural maze generation — carve, clear, braid.
//!
//! 1. Create a cell per grid position; the four corners are entrances and
//!    the centered block is the goal region.
//! 2. Carve a spanning tree by randomized depth-first search from the
//!    grid's center cell (explicit stack, no recursion) — every cell ends
//!    up reachable, with no cycles.
//! 3. Force the center block fully open regardless of how the carve ran.
//! 4. Braid: open extra corridors at a fixed probability, refusing any
//!    that would complete a fully-connected 2×2 square.
//!
//! The random source is injected, so one seed always reproduces the same
//! topology, braid edges included.

use rand::Rng;

use crate::cell::{Cell, Coord};
use crate::constants::{BRAID_PROBABILITY, CENTER_SIZE, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::topology::MazeTopology;

/// Generation parameters.
#[derive(Debug, Clone)]
pub struct MazeConfig {
    pub width: i32,
    pub height: i32,
    /// Side length of the forced-open goal block in the middle.
    pub center_size: i32,
    /// Chance of opening each still-walled grid-adjacent pair.
    pub braid_probability: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            center_size: CENTER_SIZE,
            braid_probability: BRAID_PROBABILITY,
        }
    }
}

impl MazeConfig {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Inclusive corner bounds of the centered goal block.
    pub fn center_rect(&self) -> (Coord, Coord) {
        let cx = (self.width - self.center_size) / 2;
        let cy = (self.height - self.center_size) / 2;
        (
            Coord::new(cx, cy),
            Coord::new(cx + self.center_size - 1, cy + self.center_size - 1),
        )
    }

    pub fn in_center(&self, coord: Coord) -> bool {
        let (lo, hi) = self.center_rect();
        coord.x >= lo.x && coord.x <= hi.x && coord.y >= lo.y && coord.y <= hi.y
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }
}

/// Build a full maze topology from `config` and a seedable random source.
pub fn generate(config: &MazeConfig, rng: &mut impl Rng) -> MazeTopology {
    let mut topo = MazeTopology::new();
    create_cells(config, &mut topo);
    carve_spanning_tree(config, &mut topo, rng);
    clear_center(config, &mut topo);
    let braided = braid(config, &mut topo, rng);
    log::debug!(
        "generated {}x{} maze: {} connections, {} braided",
        config.width,
        config.height,
        topo.connections().len(),
        braided
    );
    topo
}

fn create_cells(config: &MazeConfig, topo: &mut MazeTopology) {
    for y in 0..config.height {
        for x in 0..config.width {
            let coord = Coord::new(x, y);
            let mut cell = Cell::new(coord);
            cell.entrance =
                (x == 0 || x == config.width - 1) && (y == 0 || y == config.height - 1);
            cell.center = config.in_center(coord);
            topo.add_cell(cell);
        }
    }
}

/// Randomized depth-first carve from the grid's center cell.
fn carve_spanning_tree(config: &MazeConfig, topo: &mut MazeTopology, rng: &mut impl Rng) {
    let slot = |c: Coord| (c.y * config.width + c.x) as usize;
    let mut visited = vec![false; (config.width * config.height) as usize];
    let start = Coord::new(config.width / 2, config.height / 2);
    visited[slot(start)] = true;
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let unvisited: Vec<Coord> = current
            .grid_neighbors()
            .into_iter()
            .filter(|&n| config.in_bounds(n) && !visited[slot(n)])
            .collect();
        if unvisited.is_empty() {
            stack.pop();
            continue;
        }
        let next = unvisited[rng.gen_range(0..unvisited.len())];
        topo.connect(current, next);
        visited[slot(next)] = true;
        stack.push(next);
    }
}

/// Force every adjacent pair inside the center block open.
fn clear_center(config: &MazeConfig, topo: &mut MazeTopology) {
    let (lo, hi) = config.center_rect();
    for y in lo.y..=hi.y {
        for x in lo.x..=hi.x {
            let here = Coord::new(x, y);
            for next in [Coord::new(x + 1, y), Coord::new(x, y + 1)] {
                if config.in_bounds(next) && config.in_center(next) {
                    topo.connect(here, next);
                }
            }
        }
    }
}

/// Open extra corridors to introduce cycles, skipping any edge that would
/// complete a fully-connected 2×2 square. Returns the number added.
fn braid(config: &MazeConfig, topo: &mut MazeTopology, rng: &mut impl Rng) -> usize {
    let chance = config.braid_probability.clamp(0.0, 1.0);
    let mut added = 0;
    for y in 0..config.height {
        for x in 0..config.width {
            let here = Coord::new(x, y);
            for next in [Coord::new(x + 1, y), Coord::new(x, y + 1)] {
                if !config.in_bounds(next) || topo.connected(here, next) {
                    continue;
                }
                if !rng.gen_bool(chance) {
                    continue;
                }
                if closes_square(topo, here, next) {
                    continue;
                }
                topo.connect(here, next);
                added += 1;
            }
        }
    }
    added
}

/// Would opening `a`–`b` complete a fully-connected 2×2 block? Inspects
/// the block on each side of the candidate edge: if the three remaining
/// edges of either block already exist, the new edge closes a square.
fn closes_square(topo: &MazeTopology, a: Coord, b: Coord) -> bool {
    // Perpendicular step: horizontal edges look up/down, vertical ones
    // left/right.
    let (px, py) = if a.y == b.y { (0, 1) } else { (1, 0) };
    for side in [-1, 1] {
        let c = Coord::new(a.x + px * side, a.y + py * side);
        let d = Coord::new(b.x + px * side, b.y + py * side);
        if topo.contains(c)
            && topo.contains(d)
            && topo.connected(a, c)
            && topo.connected(b, d)
            && topo.connected(c, d)
        {
            return true;
        }
    }
    false
}
