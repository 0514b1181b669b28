//! Reduction-completeness checks.
//!
//! These verify the postconditions of each phase against a ledger.  The
//! simulator runs them at every phase boundary and logs failures; callers
//! that want a hard guarantee can run them directly.

use cs_core::{ChunkIndex, Rank};

use crate::{Ledger, RingError, RingResult};

/// After reduce-scatter, every process's last-received chunk must carry the
/// full contributor set.
pub fn audit_reduce_scatter(ledger: &Ledger, last_received: &[ChunkIndex]) -> RingResult<()> {
    let world = ledger.world_size();
    for (process, &chunk) in world.ranks().zip(last_received) {
        check_complete(ledger, process, chunk)?;
    }
    Ok(())
}

/// After allgather, every process must hold every chunk, each fully reduced.
///
/// Processes are checked in rank order.  Within one process a missing chunk
/// is reported before any incomplete one, lowest index first.
pub fn audit_allgather(ledger: &Ledger) -> RingResult<()> {
    let world = ledger.world_size();
    for process in world.ranks() {
        let mut chunks = world.ranks().map(Rank::own_chunk);
        if let Some(chunk) = chunks.clone().find(|&c| !ledger.contains(process, c)) {
            return Err(RingError::MissingChunk { process, chunk });
        }
        chunks.try_for_each(|chunk| check_complete(ledger, process, chunk))?;
    }
    Ok(())
}

fn check_complete(ledger: &Ledger, process: Rank, chunk: ChunkIndex) -> RingResult<()> {
    let world = ledger.world_size();
    let held = ledger
        .get(process, chunk)
        .ok_or(RingError::MissingChunk { process, chunk })?;
    if held.is_fully_reduced(world) {
        Ok(())
    } else {
        Err(RingError::IncompleteReduction {
            process,
            chunk,
            missing: held.contributors().missing(world),
        })
    }
}
