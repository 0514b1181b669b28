use cs_core::CsError;
use cs_ring::RingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error(transparent)]
    Core(#[from] CsError),

    #[error(transparent)]
    Ring(#[from] RingError),
}

impl SweepError {
    /// `true` when the case was rejected for a bad parameter rather than a
    /// load or simulation failure.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            SweepError::Core(e) | SweepError::Ring(RingError::Core(e)) => e.is_invalid_argument(),
            _ => false,
        }
    }
}

pub type SweepResult<T> = Result<T, SweepError>;
