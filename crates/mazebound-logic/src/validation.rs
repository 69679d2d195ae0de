//! Structural invariant checks for a built topology.
//!
//! Pure functions that inspect a topology and return validation errors.
//! The integration tests and the simtest harness run these after
//! generation and again after mutation sweeps.

use std::collections::{HashSet, VecDeque};

use crate::cell::Coord;
use crate::topology::MazeTopology;

/// A structural validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

// ── A. Connection reciprocity ───────────────────────────────────────────

/// Every record must be resolvable under both coordinate orders, span
/// existing grid-adjacent cells, and agree with the traversability
/// predicate in both directions.
pub fn check_reciprocal_connections(topo: &MazeTopology) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (id, conn) in topo.connections().iter().enumerate() {
        if topo.connection_between(conn.a, conn.b) != Some(id)
            || topo.connection_between(conn.b, conn.a) != Some(id)
        {
            errors.push(ValidationError {
                category: "reciprocity",
                severity: Severity::Error,
                message: format!(
                    "connection #{} not shared by both directions of ({},{})↔({},{})",
                    id, conn.a.x, conn.a.y, conn.b.x, conn.b.y
                ),
            });
        }
        if !topo.contains(conn.a) || !topo.contains(conn.b) {
            errors.push(ValidationError {
                category: "reciprocity",
                severity: Severity::Error,
                message: format!("connection #{} has a dangling endpoint", id),
            });
        }
        if !conn.a.is_adjacent(conn.b) {
            errors.push(ValidationError {
                category: "reciprocity",
                severity: Severity::Error,
                message: format!(
                    "connection #{} spans non-adjacent cells ({},{}) and ({},{})",
                    id, conn.a.x, conn.a.y, conn.b.x, conn.b.y
                ),
            });
        }
        let forward = topo.can_traverse(conn.a, conn.b);
        let backward = topo.can_traverse(conn.b, conn.a);
        if forward != backward || forward == conn.locked {
            errors.push(ValidationError {
                category: "reciprocity",
                severity: Severity::Error,
                message: format!(
                    "connection #{} lock flag ({}) disagrees with traversability ({}/{})",
                    id, conn.locked, forward, backward
                ),
            });
        }
    }
    errors
}

// ── B. Lever invariants ─────────────────────────────────────────────────

/// Levers must sit on existing cells that point back at them, hold no
/// duplicate targets, and keep every target's lock equal to `!active`.
pub fn check_lever_invariants(topo: &MazeTopology) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (id, lever) in topo.levers().iter().enumerate() {
        match topo.cell(lever.cell) {
            Some(cell) if cell.lever == Some(id) => {}
            Some(_) => errors.push(ValidationError {
                category: "lever",
                severity: Severity::Error,
                message: format!(
                    "lever #{} not referenced by its cell ({},{})",
                    id, lever.cell.x, lever.cell.y
                ),
            }),
            None => errors.push(ValidationError {
                category: "lever",
                severity: Severity::Error,
                message: format!("lever #{} sits on an unknown cell", id),
            }),
        }

        let mut seen = HashSet::new();
        for &target in &lever.targets {
            if !seen.insert(target) {
                errors.push(ValidationError {
                    category: "lever",
                    severity: Severity::Error,
                    message: format!("lever #{} lists target #{} twice", id, target),
                });
            }
            match topo.connection(target) {
                Some(conn) if conn.locked == lever.active => {
                    errors.push(ValidationError {
                        category: "lever",
                        severity: Severity::Error,
                        message: format!(
                            "lever #{} (active={}) target #{} has locked={}",
                            id, lever.active, target, conn.locked
                        ),
                    });
                }
                Some(_) => {}
                None => errors.push(ValidationError {
                    category: "lever",
                    severity: Severity::Error,
                    message: format!("lever #{} targets missing connection #{}", id, target),
                }),
            }
        }
    }
    errors
}

// ── C. Connectivity ─────────────────────────────────────────────────────

/// With every lock ignored, all cells must be mutually reachable.
pub fn check_connectivity(topo: &MazeTopology) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let cells: Vec<Coord> = topo.cells().map(|cell| cell.coord).collect();
    let Some(&start) = cells.first() else {
        return errors;
    };

    let mut visited = HashSet::new();
    visited.insert(start);
    let mut queue = VecDeque::new();
    queue.push_back(start);
    while let Some(current) = queue.pop_front() {
        for next in current.grid_neighbors() {
            if topo.connected(current, next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    let unreached: Vec<&Coord> = cells.iter().filter(|c| !visited.contains(c)).collect();
    if !unreached.is_empty() {
        errors.push(ValidationError {
            category: "connectivity",
            severity: Severity::Error,
            message: format!(
                "{} of {} cells unreachable with all locks open (e.g. ({},{}))",
                unreached.len(),
                cells.len(),
                unreached[0].x,
                unreached[0].y
            ),
        });
    }
    errors
}

// ── D. Degenerate squares ───────────────────────────────────────────────

/// No 2×2 block fully outside the center region may be pairwise fully
/// connected. Blocks touching the center are exempt — the goal region is
/// opened on purpose.
pub fn check_no_open_squares(topo: &MazeTopology) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for cell in topo.cells() {
        let a = cell.coord;
        let b = Coord::new(a.x + 1, a.y);
        let c = Coord::new(a.x, a.y + 1);
        let d = Coord::new(a.x + 1, a.y + 1);
        let block = [a, b, c, d];
        if block.iter().any(|&coord| !topo.contains(coord)) {
            continue;
        }
        let touches_center = block
            .iter()
            .any(|&coord| topo.cell(coord).map(|cc| cc.center).unwrap_or(false));
        if touches_center {
            continue;
        }
        if topo.connected(a, b)
            && topo.connected(a, c)
            && topo.connected(b, d)
            && topo.connected(c, d)
        {
            errors.push(ValidationError {
                category: "square",
                severity: Severity::Error,
                message: format!("fully open 2×2 block at ({},{})", a.x, a.y),
            });
        }
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

/// Run every structural check and return the combined results.
pub fn validate_all(topo: &MazeTopology) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_reciprocal_connections(topo));
    all.extend(check_lever_invariants(topo));
    all.extend(check_connectivity(topo));
    all.extend(check_no_open_squares(topo));
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{generate, MazeConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn test_generated_maze_validates_clean() {
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let topo = generate(&MazeConfig::new(9, 9), &mut rng);
            let errors = validate_all(&topo);
            assert!(errors.is_empty(), "seed {}: {:?}", seed, errors);
        }
    }

    #[test]
    fn test_levered_maze_validates_clean() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut topo = generate(&MazeConfig::new(9, 9), &mut rng);
        let door = topo.connections_of(c(4, 4))[0];
        let lever = topo.place_lever(c(0, 0), &[door]).unwrap();
        assert!(validate_all(&topo).is_empty());
        topo.toggle_lever(lever);
        assert!(validate_all(&topo).is_empty());
    }

    #[test]
    fn test_disconnected_cells_flagged() {
        let mut topo = MazeTopology::new();
        topo.connect(c(0, 0), c(1, 0));
        topo.add_cell(crate::cell::Cell::new(c(5, 5)));
        let errors = check_connectivity(&topo);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("unreachable"));
    }

    #[test]
    fn test_open_square_flagged() {
        let mut topo = MazeTopology::new();
        topo.connect(c(0, 0), c(1, 0));
        topo.connect(c(0, 0), c(0, 1));
        topo.connect(c(1, 0), c(1, 1));
        topo.connect(c(0, 1), c(1, 1));
        let errors = check_no_open_squares(&topo);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category, "square");
    }

    #[test]
    fn test_center_square_exempt() {
        let mut topo = MazeTopology::new();
        topo.connect(c(0, 0), c(1, 0));
        topo.connect(c(0, 0), c(0, 1));
        topo.connect(c(1, 0), c(1, 1));
        topo.connect(c(0, 1), c(1, 1));
        for coord in [c(0, 0), c(1, 0), c(0, 1), c(1, 1)] {
            topo.cell_mut(coord).unwrap().center = true;
        }
        assert!(check_no_open_squares(&topo).is_empty());
    }

    #[test]
    fn test_reciprocity_clean_on_locked_door() {
        let mut topo = MazeTopology::new();
        topo.connect(c(0, 0), c(1, 0));
        let door = topo.connection_between(c(0, 0), c(1, 0)).unwrap();
        topo.set_locked(door, true);
        assert!(check_reciprocal_connections(&topo).is_empty());
    }
}
