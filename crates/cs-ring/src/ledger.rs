//! Per-process chunk holdings, stored as one flat arena.
//!
//! # Layout
//!
//! Slot `process * n + chunk` holds `Some(chunk)` when `process` currently
//! owns a copy of chunk `chunk`.  Every process owns its own row; nothing is
//! shared between rows, so a transfer is always a clone from one row into
//! another.
//!
//! `Ledger: Clone` is a deep copy, which is how phase 1's terminal state is
//! frozen before phase 2 starts mutating.

use std::fmt;

use cs_core::{ChunkIndex, Rank, WorldSize};

use crate::Chunk;

/// Which chunks every process holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    world: WorldSize,
    slots: Vec<Option<Chunk>>,
}

impl Ledger {
    /// Starting state: every rank holds exactly its own original chunk.
    pub fn initial(world: WorldSize) -> Self {
        let n = world.as_usize();
        let mut slots = vec![None; n * n];
        for rank in world.ranks() {
            slots[rank.index() * n + rank.index()] = Some(Chunk::original(rank));
        }
        Self { world, slots }
    }

    pub fn world_size(&self) -> WorldSize {
        self.world
    }

    #[inline]
    fn slot(&self, process: Rank, chunk: ChunkIndex) -> usize {
        process.index() * self.world.as_usize() + chunk.index()
    }

    fn row(&self, process: Rank) -> &[Option<Chunk>] {
        let n = self.world.as_usize();
        &self.slots[process.index() * n..(process.index() + 1) * n]
    }

    pub fn get(&self, process: Rank, chunk: ChunkIndex) -> Option<&Chunk> {
        self.slots[self.slot(process, chunk)].as_ref()
    }

    pub fn contains(&self, process: Rank, chunk: ChunkIndex) -> bool {
        self.get(process, chunk).is_some()
    }

    /// Chunks held by `process`, ordered by chunk index.
    pub fn holdings(&self, process: Rank) -> impl Iterator<Item = &Chunk> {
        self.row(process).iter().flatten()
    }

    pub fn held_count(&self, process: Rank) -> usize {
        self.holdings(process).count()
    }

    /// Owned copy of `process`'s holdings, for records and rendering.
    pub fn snapshot(&self, process: Rank) -> Holdings {
        Holdings(self.holdings(process).cloned().collect())
    }

    // ── Mutation (simulator only) ─────────────────────────────────────────

    /// Remove and return `process`'s copy of `chunk`.
    pub(crate) fn take(&mut self, process: Rank, chunk: ChunkIndex) -> Option<Chunk> {
        let slot = self.slot(process, chunk);
        self.slots[slot].take()
    }

    /// Store `chunk` for `process`, replacing any copy already held at that
    /// index.
    pub(crate) fn put(&mut self, process: Rank, chunk: Chunk) {
        let slot = self.slot(process, chunk.index());
        self.slots[slot] = Some(chunk);
    }

    /// Store `chunk` only if `process` holds nothing at that index.
    /// Returns `true` if it was inserted.
    pub(crate) fn put_if_absent(&mut self, process: Rank, chunk: Chunk) -> bool {
        let slot = self.slot(process, chunk.index());
        if self.slots[slot].is_some() {
            return false;
        }
        self.slots[slot] = Some(chunk);
        true
    }
}

// ── Holdings ──────────────────────────────────────────────────────────────────

/// A frozen copy of one process's chunks, ordered by index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Holdings(Vec<Chunk>);

impl Holdings {
    pub fn chunks(&self) -> &[Chunk] {
        &self.0
    }

    pub fn indices(&self) -> impl Iterator<Item = ChunkIndex> + '_ {
        self.0.iter().map(Chunk::index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Holdings {
    /// One chunk per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chunk) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{chunk}")?;
        }
        Ok(())
    }
}
