use cs_core::{ChunkIndex, CsError, Phase, Rank};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RingError {
    #[error("invalid ring input: {0}")]
    Core(#[from] CsError),

    #[error("{process} does not hold chunk {chunk}")]
    MissingChunk { process: Rank, chunk: ChunkIndex },

    #[error("chunk {chunk} held by {process} is missing contributions from {missing:?}")]
    IncompleteReduction {
        process: Rank,
        chunk:   ChunkIndex,
        missing: Vec<Rank>,
    },

    #[error("cannot run {requested} while the simulation is in {current}")]
    OutOfOrder {
        requested: Phase,
        current:   Phase,
    },
}

pub type RingResult<T> = Result<T, RingError>;
