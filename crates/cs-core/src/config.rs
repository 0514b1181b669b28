//! Run configuration.
//!
//! A [`RunConfig`] is the raw, unvalidated description of one simulation
//! run, typically deserialized from a sweep file.  [`RunConfig::validate`]
//! turns it into a [`ValidatedRun`] or rejects it before any simulation
//! state is created.

use crate::{Algorithm, CsError, CsResult, Variant, VectorSize, WorldSize};

/// Raw inputs for one simulation run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Number of processes.  Must be ≥ 1.
    pub world_size: i64,

    /// Bytes in the reduced vector.  Must be ≥ 0.
    pub vector_size_bytes: i64,

    /// Which algorithm family to simulate.
    pub algorithm: Algorithm,

    /// `"bandwidth"` or `"latency"`.  Required for `swing` and
    /// `recursive_doubling`, ignored for `ring`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub variant: Option<String>,
}

impl RunConfig {
    pub fn new(world_size: i64, vector_size_bytes: i64, algorithm: Algorithm) -> Self {
        Self { world_size, vector_size_bytes, algorithm, variant: None }
    }

    /// Set the variant string (builder style).
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Check every field and return the typed, validated form.
    ///
    /// Checks run in a fixed order (world size, vector size, variant) so the
    /// reported error is deterministic when several fields are bad.
    pub fn validate(&self) -> CsResult<ValidatedRun> {
        let world  = WorldSize::new(self.world_size)?;
        let vector = VectorSize::new(self.vector_size_bytes)?;

        let variant = match (self.algorithm.needs_variant(), self.variant.as_deref()) {
            (false, _)         => None,
            (true, None)       => return Err(CsError::MissingVariant(self.algorithm)),
            (true, Some(text)) => Some(text.parse::<Variant>()?),
        };

        Ok(ValidatedRun { world, vector, algorithm: self.algorithm, variant })
    }
}

/// A [`RunConfig`] whose fields have all been checked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ValidatedRun {
    pub world:     WorldSize,
    pub vector:    VectorSize,
    pub algorithm: Algorithm,
    /// `Some` for every algorithm where [`Algorithm::needs_variant`] holds.
    pub variant:   Option<Variant>,
}
