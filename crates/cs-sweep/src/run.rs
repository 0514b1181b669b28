//! Sweep evaluation.

use cs_core::{Algorithm, CsError, RunConfig, ValidatedRun, Variant};
use cs_ring::{RingSchedule, simulate_ring};
use cs_swing::{PartnerScheme, RecursiveDoubling, Swing, VolumeMatrix, build_schedule, total_bytes};
use tracing::{debug, info, warn};

use crate::{SweepError, SweepResult};

// ── Outcome types ─────────────────────────────────────────────────────────────

/// What a successful case produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Artifact {
    /// Swing or recursive doubling.
    Volume(VolumeMatrix),
    Ring(RingSchedule),
}

/// Headline numbers for one case.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Summary {
    /// Communication steps executed, counting both phases.
    pub rounds:      usize,
    /// Bytes moved by every rank across every step.
    pub total_bytes: f64,
}

/// One sweep case and its result.
#[derive(Debug)]
pub struct SweepOutcome {
    pub config: RunConfig,
    pub result: SweepResult<(Artifact, Summary)>,
}

impl SweepOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn summary(&self) -> Option<Summary> {
        self.result.as_ref().ok().map(|(_, s)| *s)
    }

    pub fn artifact(&self) -> Option<&Artifact> {
        self.result.as_ref().ok().map(|(a, _)| a)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Evaluate every case.  Outcomes come back in input order.
///
/// A rejected case is reported in its own outcome and never affects the
/// others.
pub fn run_sweep(configs: &[RunConfig]) -> Vec<SweepOutcome> {
    info!(cases = configs.len(), "sweep start");

    #[cfg(feature = "parallel")]
    let outcomes: Vec<SweepOutcome> = {
        use rayon::prelude::*;
        configs.par_iter().map(run_case).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<SweepOutcome> = configs.iter().map(run_case).collect();

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    info!(cases = outcomes.len(), failed, "sweep done");
    outcomes
}

/// Validate and evaluate a single case.
pub fn run_case(config: &RunConfig) -> SweepOutcome {
    let result = config
        .validate()
        .map_err(SweepError::from)
        .and_then(evaluate);

    match &result {
        Ok((_, summary)) => debug!(
            algorithm = %config.algorithm,
            world_size = config.world_size,
            rounds = summary.rounds,
            total_bytes = summary.total_bytes,
            "case done"
        ),
        Err(e) => warn!(
            algorithm = %config.algorithm,
            world_size = config.world_size,
            error = %e,
            "case rejected"
        ),
    }

    SweepOutcome { config: config.clone(), result }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn evaluate(run: ValidatedRun) -> SweepResult<(Artifact, Summary)> {
    match (run.algorithm, run.variant) {
        (Algorithm::Ring, _) => {
            let schedule = simulate_ring(run.world, run.vector)?;
            let summary = Summary {
                rounds:      schedule.round_count(),
                total_bytes: schedule.total_bytes() as f64,
            };
            Ok((Artifact::Ring(schedule), summary))
        }
        (Algorithm::Swing, Some(variant)) => Ok(logarithmic(&Swing, run, variant)),
        (Algorithm::RecursiveDoubling, Some(variant)) => Ok(logarithmic(&RecursiveDoubling, run, variant)),
        (algorithm, None) => Err(CsError::MissingVariant(algorithm).into()),
    }
}

fn logarithmic<S: PartnerScheme>(scheme: &S, run: ValidatedRun, variant: Variant) -> (Artifact, Summary) {
    let steps = build_schedule(scheme, run.world, run.vector, variant);
    let summary = Summary { rounds: steps.len(), total_bytes: total_bytes(&steps) };
    (Artifact::Volume(VolumeMatrix::from_schedule(run.world, &steps)), summary)
}
