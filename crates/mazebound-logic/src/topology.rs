//! The game topology — a lockable weighted network over grid cells.
//!
//! `MazeTopology` is the one concrete type the rest of the game talks to.
//! Connection records live in an arena; both directions of a corridor map
//! to the same record, so a lock toggle affects both ways atomically.
//! Edge weights come from the destination cell's `move_cost` at connect
//! time. The only structural mutations after generation are lever toggles
//! and wall-breaking — cells are never removed during play.

use std::collections::HashMap;

use crate::cell::{Cell, Coord, LeverId};
use crate::connection::{Connection, ConnectionId, Lever};
use crate::network::Network;

#[derive(Debug, Clone)]
pub struct MazeTopology {
    net: Network<Coord>,
    cells: HashMap<Coord, Cell>,
    connections: Vec<Connection>,
    /// Both (a, b) and (b, a) map to the same arena slot.
    edge_ids: HashMap<(Coord, Coord), ConnectionId>,
    levers: Vec<Lever>,
}

impl MazeTopology {
    pub fn new() -> Self {
        Self {
            net: Network::new(),
            cells: HashMap::new(),
            connections: Vec::new(),
            edge_ids: HashMap::new(),
            levers: Vec::new(),
        }
    }

    // ── Cells ───────────────────────────────────────────────────────────

    /// Register a cell. Returns false when the coordinate is taken.
    pub fn add_cell(&mut self, cell: Cell) -> bool {
        if self.cells.contains_key(&cell.coord) {
            return false;
        }
        self.net.add_vertex(cell.coord);
        self.cells.insert(cell.coord, cell);
        true
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.cells.get(&coord)
    }

    pub fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.cells.get_mut(&coord)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in vertex-insertion order — the stable enumeration order
    /// used for snapshots.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.net.vertices().iter().filter_map(|c| self.cells.get(c))
    }

    /// Placement query: does this cell exist and carry no feature yet?
    pub fn is_cell_free(&self, coord: Coord) -> bool {
        self.cell(coord).map(|c| c.is_free()).unwrap_or(false)
    }

    // ── Connections ─────────────────────────────────────────────────────

    /// Open a reciprocal, unlocked corridor between two cells, lazily
    /// registering unknown coordinates as plain cells. Returns the
    /// record's id — the existing one when the pair is already connected —
    /// or `None` for a self-edge.
    pub fn connect(&mut self, from: Coord, to: Coord) -> Option<ConnectionId> {
        if from == to {
            return None;
        }
        if let Some(&id) = self.edge_ids.get(&(from, to)) {
            return Some(id);
        }
        if !self.cells.contains_key(&from) {
            self.add_cell(Cell::new(from));
        }
        if !self.cells.contains_key(&to) {
            self.add_cell(Cell::new(to));
        }

        let id = self.connections.len();
        self.connections.push(Connection::open(from, to));
        self.edge_ids.insert((from, to), id);
        self.edge_ids.insert((to, from), id);

        // Direction weight = cost of entering the destination cell.
        let into_to = self.cells.get(&to).map(|c| c.move_cost()).unwrap_or(1.0);
        let into_from = self.cells.get(&from).map(|c| c.move_cost()).unwrap_or(1.0);
        self.net.add_edge(&from, &to, into_to);
        self.net.set_edge_weight(&to, &from, into_from);
        Some(id)
    }

    /// Connect and apply an explicit lock state and key — the restore
    /// path for persisted maps.
    pub fn connect_with(
        &mut self,
        from: Coord,
        to: Coord,
        locked: bool,
        key: Option<String>,
    ) -> Option<ConnectionId> {
        let id = self.connect(from, to)?;
        let conn = &mut self.connections[id];
        conn.locked = locked;
        conn.key = key;
        Some(id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    /// All connection records in creation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection_between(&self, a: Coord, b: Coord) -> Option<ConnectionId> {
        self.edge_ids.get(&(a, b)).copied()
    }

    /// Whether a corridor exists between two cells, locked or not.
    pub fn connected(&self, a: Coord, b: Coord) -> bool {
        self.connection_between(a, b).is_some()
    }

    /// Connection ids leaving `coord`, ordered by the far end's vertex
    /// index.
    pub fn connections_of(&self, coord: Coord) -> Vec<ConnectionId> {
        self.net
            .vertices()
            .iter()
            .filter_map(|&other| self.connection_between(coord, other))
            .collect()
    }

    /// Directly set a connection's lock flag. Lever toggling goes through
    /// [`MazeTopology::toggle_lever`]; this is for generation and tests.
    pub fn set_locked(&mut self, id: ConnectionId, locked: bool) -> bool {
        match self.connections.get_mut(id) {
            Some(conn) => {
                conn.locked = locked;
                true
            }
            None => false,
        }
    }

    /// The single authoritative traversability predicate: an adjacency
    /// edge exists, a connection record backs it, and it is not locked.
    pub fn can_traverse(&self, from: Coord, to: Coord) -> bool {
        if !self.net.graph().has_edge(&from, &to) {
            return false;
        }
        match self.connection_between(from, to) {
            Some(id) => !self.connections[id].locked,
            None => false,
        }
    }

    /// Traversable neighbors of `coord` in vertex-index order. Locked
    /// doors are invisible here — this is the adjacency the pathfinder
    /// and the bot heuristics consume.
    pub fn neighbors(&self, coord: Coord) -> Vec<Coord> {
        let Some(i) = self.net.index_of(&coord) else {
            return Vec::new();
        };
        self.net
            .graph()
            .adjacent_indices(i)
            .into_iter()
            .filter_map(|j| self.net.vertex(j).copied())
            .filter(|&n| self.can_traverse(coord, n))
            .collect()
    }

    /// Knock a new opening between two adjacent, previously unconnected
    /// cells. Both must already exist; anything else is a `false` no-op.
    pub fn break_wall(&mut self, a: Coord, b: Coord) -> bool {
        if !a.is_adjacent(b) || !self.contains(a) || !self.contains(b) {
            return false;
        }
        if self.connected(a, b) {
            return false;
        }
        let broken = self.connect(a, b).is_some();
        if broken {
            log::debug!("broke wall between ({},{}) and ({},{})", a.x, a.y, b.x, b.y);
        }
        broken
    }

    // ── Levers ──────────────────────────────────────────────────────────

    /// Install a lever on a cell and attach its targets. The cell must
    /// exist and not own a lever yet; every target must resolve. Targets
    /// immediately take the lock state the lever dictates (inactive →
    /// locked).
    pub fn place_lever(&mut self, cell: Coord, targets: &[ConnectionId]) -> Option<LeverId> {
        match self.cell(cell) {
            Some(c) if c.lever.is_none() => {}
            _ => return None,
        }
        if targets.iter().any(|&t| t >= self.connections.len()) {
            return None;
        }
        let id = self.levers.len();
        self.levers.push(Lever::new(cell));
        if let Some(c) = self.cells.get_mut(&cell) {
            c.lever = Some(id);
        }
        for &target in targets {
            self.lever_add_target(id, target);
        }
        Some(id)
    }

    /// Attach one more connection to a lever; duplicates are ignored. The
    /// target immediately takes `locked == !active`.
    pub fn lever_add_target(&mut self, lever: LeverId, target: ConnectionId) -> bool {
        if target >= self.connections.len() {
            return false;
        }
        let Some(l) = self.levers.get_mut(lever) else {
            return false;
        };
        if !l.targets.contains(&target) {
            l.targets.push(target);
        }
        let locked = !l.active;
        self.connections[target].locked = locked;
        true
    }

    /// Flip a lever and re-apply `locked == !active` to every target in
    /// one call — no partially toggled state is ever observable.
    pub fn toggle_lever(&mut self, lever: LeverId) -> bool {
        let Some(l) = self.levers.get_mut(lever) else {
            return false;
        };
        l.active = !l.active;
        let locked = !l.active;
        let targets = l.targets.clone();
        for target in targets {
            if let Some(conn) = self.connections.get_mut(target) {
                conn.locked = locked;
            }
        }
        log::debug!(
            "lever {} toggled, targets now {}",
            lever,
            if locked { "locked" } else { "open" }
        );
        true
    }

    pub fn lever(&self, id: LeverId) -> Option<&Lever> {
        self.levers.get(id)
    }

    /// All levers in placement order.
    pub fn levers(&self) -> &[Lever] {
        &self.levers
    }

    // ── Internals for the query layer ───────────────────────────────────

    pub(crate) fn network(&self) -> &Network<Coord> {
        &self.net
    }
}

impl Default for MazeTopology {
    fn default() -> Self {
        Self::new()
    }
}
