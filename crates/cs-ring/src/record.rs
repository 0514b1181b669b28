//! Round records: the rendering-facing output of a ring run.

use cs_core::{ChunkIndex, CommEvent, Phase, Rank, Round, WorldSize};

use crate::{Chunk, Holdings, Ledger};

/// What one process did in one round.
///
/// `sent` is the chunk as it left the sender; `received` is the chunk as the
/// receiver stored it (after folding in its own contribution during
/// reduce-scatter).  `holdings` is the receiver's ledger after the round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundRecord {
    pub phase:          Phase,
    pub round:          Round,
    pub process:        Rank,
    pub send_to:        Rank,
    pub sent:           Chunk,
    pub bytes_sent:     u64,
    pub recv_from:      Rank,
    pub received:       Chunk,
    pub bytes_received: u64,
    pub holdings:       Holdings,
}

impl RoundRecord {
    #[inline]
    pub fn send_chunk(&self) -> ChunkIndex {
        self.sent.index()
    }

    #[inline]
    pub fn recv_chunk(&self) -> ChunkIndex {
        self.received.index()
    }

    /// The outgoing transfer as a shared-model event.
    pub fn send_event(&self) -> CommEvent {
        CommEvent {
            phase: self.phase,
            round: self.round,
            src:   self.process,
            dst:   self.send_to,
            chunk: Some(self.sent.index()),
            bytes: self.bytes_sent as f64,
        }
    }
}

/// The complete output of a ring allreduce simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingSchedule {
    pub world: WorldSize,
    /// Bytes per chunk (`vector / n`, floored).
    pub chunk_bytes: u64,
    /// One entry per reduce-scatter round, each with one record per process.
    pub reduce_scatter: Vec<Vec<RoundRecord>>,
    /// One entry per allgather round, each with one record per process.
    pub allgather: Vec<Vec<RoundRecord>>,
    /// Ledger at the end of reduce-scatter (unaffected by the allgather).
    pub reduce_scatter_ledger: Ledger,
    /// Chunk each process received last during reduce-scatter.
    pub reduce_scatter_last_received: Vec<ChunkIndex>,
    /// Ledger at the end of the allgather.
    pub final_ledger: Ledger,
}

impl RingSchedule {
    /// Every round of both phases, reduce-scatter first.
    pub fn rounds(&self) -> impl Iterator<Item = &[RoundRecord]> {
        self.reduce_scatter
            .iter()
            .chain(&self.allgather)
            .map(Vec::as_slice)
    }

    pub fn round_count(&self) -> usize {
        self.reduce_scatter.len() + self.allgather.len()
    }

    /// Every transfer of the run, in round then process order.
    pub fn events(&self) -> impl Iterator<Item = CommEvent> + '_ {
        self.rounds().flatten().map(RoundRecord::send_event)
    }

    /// Total bytes sent by all processes over both phases.
    pub fn total_bytes(&self) -> u64 {
        self.rounds().flatten().map(|r| r.bytes_sent).sum()
    }
}
