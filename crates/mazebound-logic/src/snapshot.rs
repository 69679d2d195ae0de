//! Enumerable plain-data snapshot of a topology.
//!
//! Collaborators persist maps however they like; the core only promises a
//! complete, deterministic dump and an exact reconstruction — lock state
//! and lever wiring included. Connection and lever ids are positional, so
//! they survive the round trip unchanged.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::connection::{Connection, Lever};
use crate::topology::MazeTopology;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub cells: Vec<Cell>,
    pub connections: Vec<Connection>,
    pub levers: Vec<Lever>,
}

impl MazeTopology {
    /// Dump every cell (vertex order), connection, and lever.
    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            cells: self.cells().cloned().collect(),
            connections: self.connections().to_vec(),
            levers: self.levers().to_vec(),
        }
    }

    /// Rebuild a topology from a snapshot. Lever targets are re-attached
    /// last, which re-applies the lever invariant to every target's lock.
    pub fn from_snapshot(snapshot: &MapSnapshot) -> MazeTopology {
        let mut topo = MazeTopology::new();
        for cell in &snapshot.cells {
            let mut cell = cell.clone();
            cell.lever = None; // re-attached below
            topo.add_cell(cell);
        }
        for conn in &snapshot.connections {
            topo.connect_with(conn.a, conn.b, conn.locked, conn.key.clone());
        }
        for lever in &snapshot.levers {
            if let Some(id) = topo.place_lever(lever.cell, &lever.targets) {
                if lever.active {
                    topo.toggle_lever(id);
                }
            }
        }
        topo
    }
}
