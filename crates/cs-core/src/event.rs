//! The shared communication-event model.

use crate::{ChunkIndex, Phase, Rank, Round};

/// One directed transfer in a simulated schedule.
///
/// Both simulator families flatten their output into `CommEvent`s: the ring
/// simulator knows which chunk moved, the partner-selection schedules only
/// know how many bytes did.  Events are produced once and never mutated.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommEvent {
    pub phase: Phase,
    /// Round within `phase`.
    pub round: Round,
    pub src:   Rank,
    pub dst:   Rank,
    /// The chunk carried, when the simulator tracks chunk identity.
    pub chunk: Option<ChunkIndex>,
    /// Payload size.  Fractional for halving schedules on sizes that are not
    /// a multiple of the divisor.
    pub bytes: f64,
}
