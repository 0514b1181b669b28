//! Chunks and their contributor sets.

use std::collections::BTreeSet;
use std::fmt;

use cs_core::{ChunkIndex, Rank, WorldSize};

// ── ContributorSet ────────────────────────────────────────────────────────────

/// The original ranks whose data has been folded into a chunk.
///
/// Only grows: there is no way to remove a contributor once added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContributorSet(BTreeSet<Rank>);

impl ContributorSet {
    pub fn single(rank: Rank) -> Self {
        Self(BTreeSet::from([rank]))
    }

    /// Add `rank`.  Returns `false` if it was already present.
    pub fn insert(&mut self, rank: Rank) -> bool {
        self.0.insert(rank)
    }

    pub fn contains(&self, rank: Rank) -> bool {
        self.0.contains(&rank)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Contributors in ascending rank order.
    pub fn iter(&self) -> impl Iterator<Item = Rank> + '_ {
        self.0.iter().copied()
    }

    /// `true` once every rank of `world` has contributed.
    pub fn is_complete(&self, world: WorldSize) -> bool {
        world.ranks().all(|r| self.0.contains(&r))
    }

    /// Ranks of `world` that have not contributed yet.
    pub fn missing(&self, world: WorldSize) -> Vec<Rank> {
        world.ranks().filter(|r| !self.0.contains(r)).collect()
    }
}

impl fmt::Display for ContributorSet {
    /// `P0+P2+P3`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rank) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{rank}")?;
        }
        Ok(())
    }
}

// ── Chunk ─────────────────────────────────────────────────────────────────────

/// One slice of the reduced vector, plus who has contributed to it so far.
///
/// Chunks are plain values: a transfer clones the chunk, so the receiver's
/// copy and the sender's copy never alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    index:        ChunkIndex,
    contributors: ContributorSet,
}

impl Chunk {
    /// The chunk `rank` starts with: its own data, contributed only by itself.
    pub fn original(rank: Rank) -> Self {
        Self {
            index:        rank.own_chunk(),
            contributors: ContributorSet::single(rank),
        }
    }

    #[inline]
    pub fn index(&self) -> ChunkIndex {
        self.index
    }

    #[inline]
    pub fn contributors(&self) -> &ContributorSet {
        &self.contributors
    }

    /// Combine `rank`'s local data into this partial reduction.
    pub fn fold_in(&mut self, rank: Rank) {
        self.contributors.insert(rank);
    }

    /// `true` once every rank of `world` has contributed.
    pub fn is_fully_reduced(&self, world: WorldSize) -> bool {
        self.contributors.is_complete(world)
    }
}

impl fmt::Display for Chunk {
    /// `C3[P1+P2+P3]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.index, self.contributors)
    }
}
