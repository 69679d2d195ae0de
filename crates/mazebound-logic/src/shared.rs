//! Shared handle for cross-thread access to one topology.
//!
//! The interactive thread and the background decision thread each hold a
//! clone of [`SharedTopology`]. Mutations (lever pulls, wall breaks) take
//! the write lock; every query holds the read lock for its entire
//! traversal, so a path or distance field never mixes lock state from
//! before and after a toggle.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cell::{Coord, LeverId};
use crate::connection::ConnectionId;
use crate::path::{self, DistanceField};
use crate::topology::MazeTopology;

#[derive(Debug, Clone)]
pub struct SharedTopology {
    inner: Arc<RwLock<MazeTopology>>,
}

impl SharedTopology {
    pub fn new(topo: MazeTopology) -> Self {
        Self {
            inner: Arc::new(RwLock::new(topo)),
        }
    }

    /// Read access for ad-hoc inspection. A poisoned lock is recovered so
    /// the topology stays queryable after a panicked writer.
    pub fn read(&self) -> RwLockReadGuard<'_, MazeTopology> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Write access for multi-step mutations.
    pub fn write(&self) -> RwLockWriteGuard<'_, MazeTopology> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn can_traverse(&self, from: Coord, to: Coord) -> bool {
        self.read().can_traverse(from, to)
    }

    /// Weight-optimal route under one consistent view of the locks.
    pub fn shortest_path(&self, start: Coord, end: Coord) -> Vec<Coord> {
        let topo = self.read();
        path::shortest_path(&topo, start, end)
    }

    /// Distance field under one consistent view of the locks.
    pub fn distance_field(&self, target: Coord) -> DistanceField {
        let topo = self.read();
        path::distance_field(&topo, target)
    }

    pub fn toggle_lever(&self, lever: LeverId) -> bool {
        self.write().toggle_lever(lever)
    }

    pub fn break_wall(&self, a: Coord, b: Coord) -> bool {
        self.write().break_wall(a, b)
    }

    pub fn set_locked(&self, id: ConnectionId, locked: bool) -> bool {
        self.write().set_locked(id, locked)
    }
}
