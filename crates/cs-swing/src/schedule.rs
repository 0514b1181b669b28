//! Step-by-step schedules for logarithmic allreduce variants.
//!
//! # Bandwidth-optimal
//!
//! ```text
//! reduce-scatter:  s = 0, 1, …, R-1     payload = V / 2^(s+1)
//! allgather:       s = R-1, …, 1, 0     payload = V / 2^(s+1)
//! ```
//!
//! The allgather replays the reduce-scatter partners in reverse order with
//! the same payloads, so step numbers run `0..2R`.
//!
//! # Latency-optimal
//!
//! `R` full-exchange steps, each moving the whole vector `V`.

use cs_core::{CommEvent, Phase, Rank, Round, Variant, VectorSize, WorldSize};
use tracing::{debug, trace};

use crate::PartnerScheme;

/// One synchronized round of a logarithmic schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleStep {
    /// Position in the full schedule, starting at 0.
    pub step: u32,
    pub phase: Phase,
    /// Round passed to the partner function.  Runs backwards during a
    /// bandwidth-optimal allgather.
    pub round: Round,
    /// Bytes each active rank sends this step.
    pub payload_bytes: f64,
    /// `(sender, receiver)` for every active rank, in ascending sender order.
    pub transfers: Vec<(Rank, Rank)>,
}

impl ScheduleStep {
    /// Bytes moved by all transfers of this step.
    pub fn bytes(&self) -> f64 {
        self.payload_bytes * self.transfers.len() as f64
    }

    /// Flatten into the shared event model.  Chunk identity is not tracked.
    pub fn events(&self) -> impl Iterator<Item = CommEvent> + '_ {
        self.transfers.iter().map(move |&(src, dst)| CommEvent {
            phase: self.phase,
            round: self.round,
            src,
            dst,
            chunk: None,
            bytes: self.payload_bytes,
        })
    }
}

/// Payload of a halving round: `V / 2^(round+1)`.
#[inline]
pub fn halved_payload(vector: VectorSize, round: Round) -> f64 {
    vector.bytes() as f64 / 2f64.powi(round.0 as i32 + 1)
}

/// Build the full step schedule for `scheme` on `world` ranks.
///
/// A world of one rank yields an empty schedule.
pub fn build_schedule<S: PartnerScheme + ?Sized>(
    scheme:  &S,
    world:   WorldSize,
    vector:  VectorSize,
    variant: Variant,
) -> Vec<ScheduleStep> {
    let rounds = scheme.round_count(world);
    debug!(
        scheme = scheme.name(),
        world_size = world.get(),
        vector_bytes = vector.bytes(),
        %variant,
        rounds,
        "building schedule"
    );

    let plan: Vec<(Phase, Round, f64)> = match variant {
        Variant::Bandwidth => {
            let forward = (0..rounds)
                .map(|s| (Phase::ReduceScatter, Round(s), halved_payload(vector, Round(s))));
            let reverse = (0..rounds)
                .rev()
                .map(|s| (Phase::Allgather, Round(s), halved_payload(vector, Round(s))));
            forward.chain(reverse).collect()
        }
        Variant::Latency => (0..rounds)
            .map(|s| (Phase::FullExchange, Round(s), vector.bytes() as f64))
            .collect(),
    };

    plan.into_iter()
        .enumerate()
        .map(|(step, (phase, round, payload_bytes))| {
            let transfers: Vec<(Rank, Rank)> = world
                .ranks()
                .filter_map(|rank| scheme.partner(rank, round, world).map(|peer| (rank, peer)))
                .collect();
            trace!(step, %phase, %round, active = transfers.len(), payload_bytes, "step");
            ScheduleStep { step: step as u32, phase, round, payload_bytes, transfers }
        })
        .collect()
}

/// Total bytes moved across every step.
pub fn total_bytes(steps: &[ScheduleStep]) -> f64 {
    steps.iter().map(ScheduleStep::bytes).sum()
}
