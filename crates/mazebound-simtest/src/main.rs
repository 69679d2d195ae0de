//! Mazebound Headless Validation Harness
//!
//! Exercises the topology engine without a game client: seeded generation
//! sweeps, structural invariants, lock-aware pathfinding, lever behavior,
//! distance fields, and a shared-handle concurrency smoke test.
//!
//! Usage:
//!   cargo run -p mazebound-simtest
//!   cargo run -p mazebound-simtest -- --verbose
//!   cargo run -p mazebound-simtest -- --dump     # print a JSON map snapshot

use std::thread;

use mazebound_logic::cell::Coord;
use mazebound_logic::constants::UNREACHABLE;
use mazebound_logic::maze::{generate, MazeConfig};
use mazebound_logic::path::{distance_field, shortest_path};
use mazebound_logic::shared::SharedTopology;
use mazebound_logic::topology::MazeTopology;
use mazebound_logic::validation::validate_all;

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: String) -> Self {
        Self {
            name: name.into(),
            passed,
            detail,
        }
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    if std::env::args().any(|a| a == "--dump") {
        dump_snapshot();
        return;
    }

    println!("=== Mazebound Topology Harness ===\n");

    let mut results = Vec::new();

    // 1. Seeded generation sweep
    results.extend(validate_generation(verbose));

    // 2. Lock-aware pathfinding
    results.extend(validate_pathfinding(verbose));

    // 3. Lever behavior
    results.extend(validate_levers(verbose));

    // 4. Distance fields
    results.extend(validate_distance_fields(verbose));

    // 5. Wall breaking
    results.extend(validate_wall_breaking(verbose));

    // 6. Shared-handle concurrency smoke
    results.extend(validate_concurrency(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn c(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

fn seeded_maze(config: &MazeConfig, seed: u64) -> MazeTopology {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(config, &mut rng)
}

/// Fully open grid used for exact-distance checks.
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

fn dump_snapshot() {
    let topo = seeded_maze(&MazeConfig::default(), 42);
    match serde_json::to_string_pretty(&topo.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("snapshot serialization failed: {}", e);
            std::process::exit(1);
        }
    }
}

// ── 1. Generation sweep ─────────────────────────────────────────────────

fn validate_generation(verbose: bool) -> Vec<TestResult> {
    println!("--- Generation Sweep ---");
    let mut results = Vec::new();

    const SEEDS: u64 = 50;
    let mut invalid = 0;
    let mut disconnected = 0;
    for seed in 0..SEEDS {
        let topo = seeded_maze(&MazeConfig::default(), seed);
        let errors = validate_all(&topo);
        if !errors.is_empty() {
            invalid += 1;
            if verbose {
                println!("  seed {}: {:?}", seed, errors);
            }
        }
        let field = distance_field(&topo, c(0, 0));
        if topo.cells().any(|cell| !field.is_reachable(cell.coord)) {
            disconnected += 1;
        }
    }
    results.push(TestResult::new(
        "generation_invariants",
        invalid == 0,
        format!("{} of {} seeds failed validation", invalid, SEEDS),
    ));
    results.push(TestResult::new(
        "generation_connectivity",
        disconnected == 0,
        format!("{} of {} seeds left cells unreachable", disconnected, SEEDS),
    ));

    let a = seeded_maze(&MazeConfig::default(), 42);
    let b = seeded_maze(&MazeConfig::default(), 42);
    results.push(TestResult::new(
        "generation_deterministic",
        a.snapshot() == b.snapshot(),
        "same seed, same topology".into(),
    ));

    let big = seeded_maze(&MazeConfig::new(20, 20), 7);
    results.push(TestResult::new(
        "generation_scales",
        big.len() == 400 && validate_all(&big).is_empty(),
        format!("20×20 grid: {} cells", big.len()),
    ));

    results
}

// ── 2. Pathfinding ──────────────────────────────────────────────────────

fn validate_pathfinding(verbose: bool) -> Vec<TestResult> {
    println!("--- Pathfinding ---");
    let mut results = Vec::new();

    // Locked door forces a detour on a fully open 3×3 grid.
    let mut topo = open_grid(3, 3);
    let door = topo
        .connection_between(c(0, 1), c(1, 1))
        .expect("open grid edge");
    topo.set_locked(door, true);
    let detour = shortest_path(&topo, c(0, 1), c(1, 1));
    results.push(TestResult::new(
        "path_detours_around_lock",
        detour.len() > 2
            && detour.first() == Some(&c(0, 1))
            && detour.last() == Some(&c(1, 1)),
        format!("detour length {}", detour.len()),
    ));
    topo.set_locked(door, false);
    let direct = shortest_path(&topo, c(0, 1), c(1, 1));
    results.push(TestResult::new(
        "path_direct_when_unlocked",
        direct == vec![c(0, 1), c(1, 1)],
        format!("direct length {}", direct.len()),
    ));

    // Entrance-to-center route exists in every generated maze.
    let mut bad = 0;
    for seed in 0..20u64 {
        let maze = seeded_maze(&MazeConfig::default(), seed);
        let path = shortest_path(&maze, c(0, 0), c(7, 7));
        if path.is_empty() {
            bad += 1;
            if verbose {
                println!("  seed {}: no entrance→center path", seed);
            }
        }
    }
    results.push(TestResult::new(
        "path_entrance_to_center",
        bad == 0,
        format!("{} of 20 seeds had no route", bad),
    ));

    // Invalid endpoints degrade to empty paths.
    let maze = seeded_maze(&MazeConfig::default(), 1);
    results.push(TestResult::new(
        "path_invalid_cells_safe",
        shortest_path(&maze, c(-5, 0), c(7, 7)).is_empty()
            && shortest_path(&maze, c(0, 0), c(99, 99)).is_empty(),
        "unknown cells yield empty paths".into(),
    ));

    results
}

// ── 3. Levers ───────────────────────────────────────────────────────────

fn validate_levers(_verbose: bool) -> Vec<TestResult> {
    println!("--- Levers ---");
    let mut results = Vec::new();

    let mut topo = seeded_maze(&MazeConfig::default(), 3);
    let door = topo.connections_of(c(7, 7))[0];
    let lever = match topo.place_lever(c(0, 0), &[door]) {
        Some(id) => id,
        None => {
            results.push(TestResult::new(
                "lever_placement",
                false,
                "could not place lever".into(),
            ));
            return results;
        }
    };

    let locked_after_place = topo.connection(door).map(|d| d.locked).unwrap_or(false);
    results.push(TestResult::new(
        "lever_locks_on_placement",
        locked_after_place,
        "inactive lever keeps targets locked".into(),
    ));

    topo.toggle_lever(lever);
    let open_after_toggle = topo.connection(door).map(|d| !d.locked).unwrap_or(false);
    results.push(TestResult::new(
        "lever_opens_on_toggle",
        open_after_toggle,
        "active lever unlocks targets".into(),
    ));

    let before: Vec<bool> = topo.connections().iter().map(|d| d.locked).collect();
    topo.toggle_lever(lever);
    topo.toggle_lever(lever);
    let after: Vec<bool> = topo.connections().iter().map(|d| d.locked).collect();
    results.push(TestResult::new(
        "lever_double_toggle_idempotent",
        before == after,
        "two toggles restore every lock".into(),
    ));

    results.push(TestResult::new(
        "lever_invariants_validate",
        validate_all(&topo).is_empty(),
        "structural checks stay clean".into(),
    ));

    results
}

// ── 4. Distance fields ──────────────────────────────────────────────────

fn validate_distance_fields(_verbose: bool) -> Vec<TestResult> {
    println!("--- Distance Fields ---");
    let mut results = Vec::new();

    let topo = open_grid(5, 5);
    let field = distance_field(&topo, c(0, 0));
    let manhattan_ok = topo
        .cells()
        .all(|cell| field.distance(cell.coord) == cell.coord.manhattan(c(0, 0)));
    results.push(TestResult::new(
        "field_manhattan_on_open_grid",
        manhattan_ok && field.distance(c(0, 0)) == 0,
        "hop counts match Manhattan distance".into(),
    ));

    let mut corridor = open_grid(3, 1);
    let door = corridor
        .connection_between(c(1, 0), c(2, 0))
        .expect("corridor edge");
    corridor.set_locked(door, true);
    let field = distance_field(&corridor, c(0, 0));
    results.push(TestResult::new(
        "field_unreachable_sentinel",
        field.distance(c(2, 0)) == UNREACHABLE && field.distance(c(1, 0)) == 1,
        "isolated cell reports UNREACHABLE".into(),
    ));

    let maze = seeded_maze(&MazeConfig::default(), 8);
    let field = distance_field(&maze, c(99, 99));
    results.push(TestResult::new(
        "field_unknown_target_safe",
        maze.cells().all(|cell| !field.is_reachable(cell.coord)),
        "unknown target yields all-unreachable field".into(),
    ));

    results
}

// ── 5. Wall breaking ────────────────────────────────────────────────────

fn validate_wall_breaking(_verbose: bool) -> Vec<TestResult> {
    println!("--- Wall Breaking ---");
    let mut results = Vec::new();

    let mut topo = seeded_maze(&MazeConfig::default(), 13);
    let before = distance_field(&topo, c(7, 7));
    let mut broken = 0;
    for x in 0..14 {
        if topo.break_wall(c(x, 0), c(x + 1, 0)) {
            broken += 1;
        }
    }
    let after = distance_field(&topo, c(7, 7));
    let improved_only = topo
        .cells()
        .all(|cell| after.distance(cell.coord) <= before.distance(cell.coord));
    results.push(TestResult::new(
        "break_wall_improves_distances",
        improved_only,
        format!("{} walls broken, no distance regressed", broken),
    ));

    let rejected = !topo.break_wall(c(0, 0), c(2, 0)) && !topo.break_wall(c(0, 0), c(99, 99));
    results.push(TestResult::new(
        "break_wall_rejects_bad_pairs",
        rejected,
        "non-adjacent and unknown pairs refused".into(),
    ));

    results
}

// ── 6. Concurrency smoke ────────────────────────────────────────────────

fn validate_concurrency(_verbose: bool) -> Vec<TestResult> {
    println!("--- Concurrency Smoke ---");
    let mut results = Vec::new();

    let mut topo = seeded_maze(&MazeConfig::default(), 17);
    let door = topo.connections_of(c(7, 7))[0];
    let lever = topo.place_lever(c(14, 14), &[door]).unwrap_or(0);
    let shared = SharedTopology::new(topo);

    // Background bot queries while the main thread flips the lever.
    // Every result must reflect a whole toggle: the field anchored at its
    // target, every non-empty path spanning start to end.
    let bot = shared.clone();
    let handle = thread::spawn(move || {
        let mut consistent = true;
        for _ in 0..100 {
            let field = bot.distance_field(c(7, 7));
            if field.distance(c(7, 7)) != 0 {
                consistent = false;
            }
            let path = bot.shortest_path(c(0, 0), c(7, 7));
            if !path.is_empty()
                && (path.first() != Some(&c(0, 0)) || path.last() != Some(&c(7, 7)))
            {
                consistent = false;
            }
        }
        consistent
    });

    for _ in 0..50 {
        shared.toggle_lever(lever);
    }
    let consistent = handle.join().unwrap_or(false);
    results.push(TestResult::new(
        "concurrent_queries_consistent",
        consistent,
        "bot thread saw only whole toggles".into(),
    ));

    results
}
