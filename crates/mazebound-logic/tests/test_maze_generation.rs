//! Integration tests for the full maze pipeline.
//!
//! Exercises: MazeConfig → generate → MazeTopology → levers/locks
//! → path and distance queries → snapshot round trip.
//!
//! All tests are pure logic — no rendering, no game client.

use mazebound_logic::cell::Coord;
use mazebound_logic::constants::UNREACHABLE;
use mazebound_logic::maze::{generate, MazeConfig};
use mazebound_logic::path::{distance_field, shortest_path};
use mazebound_logic::snapshot::MapSnapshot;
use mazebound_logic::topology::MazeTopology;
use mazebound_logic::validation::validate_all;

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ────────────────────────────────────────────────────────────

fn c(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

fn default_maze(seed: u64) -> MazeTopology {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(&MazeConfig::default(), &mut rng)
}

/// Fully open w×h grid with no walls at all.
fn open_grid(width: i32, height: i32) -> MazeTopology {
    let mut topo = MazeTopology::new();
    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                topo.connect(c(x, y), c(x + 1, y));
            }
            if y + 1 < height {
                topo.connect(c(x, y), c(x, y + 1));
            }
        }
    }
    topo
}

// ── Generation sweeps ──────────────────────────────────────────────────

#[test]
fn every_seed_yields_a_valid_connected_maze() {
    for seed in 0..25 {
        let topo = default_maze(seed);
        let errors = validate_all(&topo);
        assert!(errors.is_empty(), "seed {}: {:?}", seed, errors);

        // With no locks placed yet, every cell is reachable from a corner.
        let field = distance_field(&topo, c(0, 0));
        let unreachable = topo
            .cells()
            .filter(|cell| !field.is_reachable(cell.coord))
            .count();
        assert_eq!(unreachable, 0, "seed {} has unreachable cells", seed);
    }
}

#[test]
fn deterministic_output() {
    let a = default_maze(42);
    let b = default_maze(42);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn different_seeds_produce_variation() {
    let mut distinct = std::collections::HashSet::new();
    for seed in 0..10 {
        let topo = default_maze(seed);
        distinct.insert(serde_json::to_string(&topo.snapshot()).unwrap());
    }
    assert!(
        distinct.len() >= 2,
        "10 seeds produced only {} distinct mazes",
        distinct.len()
    );
}

#[test]
fn generation_scales_past_initial_capacity() {
    // 20×20 = 400 cells, far past the first adjacency allocation. All
    // structural invariants must survive the repeated doublings.
    let mut rng = StdRng::seed_from_u64(7);
    let topo = generate(&MazeConfig::new(20, 20), &mut rng);
    assert_eq!(topo.len(), 400);
    assert!(validate_all(&topo).is_empty());
    let field = distance_field(&topo, c(10, 10));
    assert!(topo.cells().all(|cell| field.is_reachable(cell.coord)));
}

// ── Locks and levers ───────────────────────────────────────────────────

#[test]
fn lever_double_toggle_is_idempotent() {
    let mut topo = default_maze(5);
    let door = topo.connections_of(c(7, 7))[0];
    let lever = topo.place_lever(c(0, 0), &[door]).unwrap();

    let before: Vec<bool> = topo.connections().iter().map(|conn| conn.locked).collect();
    topo.toggle_lever(lever);
    topo.toggle_lever(lever);
    let after: Vec<bool> = topo.connections().iter().map(|conn| conn.locked).collect();
    assert_eq!(before, after);
}

#[test]
fn shortest_path_routes_around_locked_door() {
    // 3×3 grid fully connected except that the center-left ↔ center edge
    // is locked: the path must detour, then take the direct edge once
    // the door opens.
    let mut topo = open_grid(3, 3);
    let door = topo.connection_between(c(0, 1), c(1, 1)).unwrap();
    let lever = topo.place_lever(c(2, 2), &[door]).unwrap();

    let detour = shortest_path(&topo, c(0, 1), c(1, 1));
    assert!(detour.len() > 2, "expected a detour, got {:?}", detour);
    assert_eq!(detour.first(), Some(&c(0, 1)));
    assert_eq!(detour.last(), Some(&c(1, 1)));

    topo.toggle_lever(lever);
    assert_eq!(shortest_path(&topo, c(0, 1), c(1, 1)), vec![c(0, 1), c(1, 1)]);
}

#[test]
fn isolated_cell_reports_unreachable() {
    let mut topo = default_maze(9);
    // Lock every corridor touching the far corner.
    let corner = c(14, 14);
    for door in topo.connections_of(corner) {
        topo.set_locked(door, true);
    }
    let field = distance_field(&topo, c(0, 0));
    assert_eq!(field.distance(corner), UNREACHABLE);
    assert!(shortest_path(&topo, c(0, 0), corner).is_empty());
    // The origin side of the maze is still live.
    assert!(field.is_reachable(c(0, 0)));
}

#[test]
fn wall_breaking_shortens_routes() {
    let mut topo = default_maze(13);
    let before = distance_field(&topo, c(7, 7));

    // Break every wall on the top row; distances can only improve.
    for x in 0..14 {
        topo.break_wall(c(x, 0), c(x + 1, 0));
    }
    let after = distance_field(&topo, c(7, 7));
    for cell in topo.cells() {
        assert!(after.distance(cell.coord) <= before.distance(cell.coord));
    }
}

// ── Distance fields ────────────────────────────────────────────────────

#[test]
fn distance_field_is_manhattan_on_open_grid() {
    let topo = open_grid(5, 5);
    let field = distance_field(&topo, c(0, 0));
    assert_eq!(field.distance(c(0, 0)), 0);
    assert_eq!(field.distance(c(1, 0)), 1);
    assert_eq!(field.distance(c(0, 1)), 1);
    for cell in topo.cells() {
        assert_eq!(
            field.distance(cell.coord),
            cell.coord.manhattan(c(0, 0)),
            "wrong distance at ({},{})",
            cell.coord.x,
            cell.coord.y
        );
    }
}

#[test]
fn distance_field_tracks_lock_changes() {
    let mut topo = open_grid(2, 1);
    let door = topo.connection_between(c(0, 0), c(1, 0)).unwrap();
    let lever = topo.place_lever(c(0, 0), &[door]).unwrap();

    assert!(!distance_field(&topo, c(0, 0)).is_reachable(c(1, 0)));
    topo.toggle_lever(lever);
    assert_eq!(distance_field(&topo, c(0, 0)).distance(c(1, 0)), 1);
}

// ── Persistence ────────────────────────────────────────────────────────

#[test]
fn snapshot_roundtrip_via_json() {
    let mut topo = default_maze(21);
    let door = topo.connections_of(c(3, 3))[0];
    let lever = topo.place_lever(c(14, 0), &[door]).unwrap();
    topo.toggle_lever(lever);

    let json = serde_json::to_string(&topo.snapshot()).unwrap();
    let parsed: MapSnapshot = serde_json::from_str(&json).unwrap();
    let restored = MazeTopology::from_snapshot(&parsed);

    assert_eq!(restored.snapshot(), topo.snapshot());
    // The restored topology answers queries identically.
    let a = distance_field(&topo, c(7, 7));
    let b = distance_field(&restored, c(7, 7));
    for cell in topo.cells() {
        assert_eq!(a.distance(cell.coord), b.distance(cell.coord));
    }
}
