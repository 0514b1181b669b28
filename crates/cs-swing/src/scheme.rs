//! The `PartnerScheme` trait, the pluggable partner-selection seam.

use cs_core::{Rank, Round, WorldSize};

use crate::partner;

/// Chooses who each rank exchanges with at each round.
///
/// Implementations must be pure: the same `(rank, round, world)` always
/// yields the same answer.  Schemes are `Send + Sync` so sweeps can share one
/// instance across worker threads.
pub trait PartnerScheme: Send + Sync {
    /// Short identifier used in logs and output files.
    fn name(&self) -> &'static str;

    /// Rounds needed to complete one sweep over the world.
    ///
    /// Default: ⌈log2(world)⌉.
    fn round_count(&self, world: WorldSize) -> u32 {
        partner::round_count(world)
    }

    /// The peer for `rank` at `round`, or `None` if `rank` sits this round
    /// out.
    fn partner(&self, rank: Rank, round: Round, world: WorldSize) -> Option<Rank>;
}

/// Swing: alternating power-of-two offsets.  Every rank is busy every round.
#[derive(Copy, Clone, Debug, Default)]
pub struct Swing;

impl PartnerScheme for Swing {
    fn name(&self) -> &'static str {
        "swing"
    }

    fn partner(&self, rank: Rank, round: Round, world: WorldSize) -> Option<Rank> {
        Some(partner::partner(rank, round, world))
    }
}

/// Recursive doubling: `peer = rank XOR 2^round`.
///
/// On non-power-of-two worlds the ranks whose XOR partner falls outside the
/// world are idle for that round.
#[derive(Copy, Clone, Debug, Default)]
pub struct RecursiveDoubling;

impl PartnerScheme for RecursiveDoubling {
    fn name(&self) -> &'static str {
        "recursive_doubling"
    }

    fn partner(&self, rank: Rank, round: Round, world: WorldSize) -> Option<Rank> {
        let mask = 1u64.checked_shl(round.0)?;
        let peer = rank.0 as u64 ^ mask;
        (peer < world.get() as u64).then_some(Rank(peer as u32))
    }
}
