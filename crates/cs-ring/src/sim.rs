//! The `RingSim` state machine and its round loop.

use cs_core::{ChunkIndex, Phase, Rank, Round, VectorSize, WorldSize};
use tracing::{debug, trace, warn};

use crate::{
    Chunk, Ledger, RingError, RingObserver, RingResult, RingSchedule, RoundRecord,
    audit_allgather, audit_reduce_scatter,
};

// ── Transmission intents ──────────────────────────────────────────────────────

/// One send computed from the frozen pre-round ledger.  Intents for a whole
/// round are collected before any ledger is touched.
struct Transmission {
    from:  Rank,
    to:    Rank,
    chunk: Chunk,
}

// ── RingState ─────────────────────────────────────────────────────────────────

/// Where a [`RingSim`] is in its run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RingState {
    /// Reduce-scatter; `next_round` rounds have completed.
    ReduceScatter { next_round: u32 },
    /// Allgather; `next_round` rounds have completed.
    Allgather { next_round: u32 },
    Done,
}

impl RingState {
    /// The running phase, or `None` once done.
    pub fn phase(self) -> Option<Phase> {
        match self {
            RingState::ReduceScatter { .. } => Some(Phase::ReduceScatter),
            RingState::Allgather { .. }     => Some(Phase::Allgather),
            RingState::Done                 => None,
        }
    }
}

// ── RingSim ───────────────────────────────────────────────────────────────────

/// Ring allreduce simulator.
///
/// Runs `n - 1` reduce-scatter rounds followed by `n - 1` allgather rounds.
/// Every round is computed in two passes: all sends are read from the ledger
/// as it stood at the start of the round, then all receives are applied.
///
/// Drive it one round at a time with [`step`][Self::step], one phase at a
/// time with [`reduce_scatter`][Self::reduce_scatter] /
/// [`allgather`][Self::allgather], or to completion with [`run`][Self::run].
pub struct RingSim {
    world:       WorldSize,
    chunk_bytes: u64,

    /// Live ledger for the running phase.
    ledger: Ledger,

    /// Per process: the chunk received most recently.  Starts as each rank's
    /// own chunk.
    last_received: Vec<ChunkIndex>,

    /// Deep copies of phase 1's terminal state, taken before phase 2 starts.
    reduce_scatter_ledger:        Option<Ledger>,
    reduce_scatter_last_received: Option<Vec<ChunkIndex>>,

    state: RingState,
}

impl RingSim {
    pub fn new(world: WorldSize, vector: VectorSize) -> Self {
        Self {
            world,
            chunk_bytes:                  vector.per_chunk(world),
            ledger:                       Ledger::initial(world),
            last_received:                world.ranks().map(Rank::own_chunk).collect(),
            reduce_scatter_ledger:        None,
            reduce_scatter_last_received: None,
            state:                        RingState::ReduceScatter { next_round: 0 },
        }
    }

    /// Validate raw inputs, then build a simulator.
    pub fn from_raw(world_size: i64, vector_size_bytes: i64) -> RingResult<Self> {
        let world  = WorldSize::new(world_size)?;
        let vector = VectorSize::new(vector_size_bytes)?;
        Ok(Self::new(world, vector))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn world_size(&self) -> WorldSize {
        self.world
    }

    pub fn chunk_bytes(&self) -> u64 {
        self.chunk_bytes
    }

    pub fn state(&self) -> RingState {
        self.state
    }

    /// Rounds in each phase: `n - 1`.
    pub fn rounds_per_phase(&self) -> u32 {
        self.world.get() - 1
    }

    /// The live ledger of the running (or last) phase.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn last_received(&self) -> &[ChunkIndex] {
        &self.last_received
    }

    /// Phase 1's terminal ledger and last-received map, once reduce-scatter
    /// has completed.
    pub fn reduce_scatter_result(&self) -> Option<(&Ledger, &[ChunkIndex])> {
        Some((
            self.reduce_scatter_ledger.as_ref()?,
            self.reduce_scatter_last_received.as_deref()?,
        ))
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Execute the next round of whichever phase is running.
    ///
    /// Phase boundaries are crossed transparently.  Returns `None` once both
    /// phases are complete.
    pub fn step<O: RingObserver>(&mut self, observer: &mut O) -> RingResult<Option<Vec<RoundRecord>>> {
        let rounds = self.rounds_per_phase();
        loop {
            match self.state {
                RingState::Done => return Ok(None),
                RingState::ReduceScatter { next_round } if next_round < rounds => {
                    return self
                        .execute_round(Phase::ReduceScatter, Round(next_round), observer)
                        .map(Some);
                }
                RingState::Allgather { next_round } if next_round < rounds => {
                    return self
                        .execute_round(Phase::Allgather, Round(next_round), observer)
                        .map(Some);
                }
                RingState::ReduceScatter { .. } => self.finish_reduce_scatter(observer),
                RingState::Allgather { .. }     => self.finish_allgather(observer),
            }
        }
    }

    /// Run every remaining reduce-scatter round and close the phase.
    pub fn reduce_scatter<O: RingObserver>(&mut self, observer: &mut O) -> RingResult<Vec<Vec<RoundRecord>>> {
        let current = self.state.phase().unwrap_or(Phase::Allgather);
        if current != Phase::ReduceScatter {
            return Err(RingError::OutOfOrder { requested: Phase::ReduceScatter, current });
        }
        self.run_phase(observer)
    }

    /// Run every remaining allgather round and close the phase.
    ///
    /// Fails with [`RingError::OutOfOrder`] while reduce-scatter rounds are
    /// still pending.  Returns no rounds once the simulation is done.
    pub fn allgather<O: RingObserver>(&mut self, observer: &mut O) -> RingResult<Vec<Vec<RoundRecord>>> {
        if let RingState::ReduceScatter { next_round } = self.state {
            if next_round < self.rounds_per_phase() {
                return Err(RingError::OutOfOrder {
                    requested: Phase::Allgather,
                    current:   Phase::ReduceScatter,
                });
            }
            self.finish_reduce_scatter(observer);
        }
        self.run_phase(observer)
    }

    /// Run both phases to completion and assemble the full schedule.
    ///
    /// Rounds already executed via [`step`][Self::step] are not repeated and
    /// do not appear in the returned schedule.
    pub fn run<O: RingObserver>(mut self, observer: &mut O) -> RingResult<RingSchedule> {
        let reduce_scatter = match self.state {
            RingState::ReduceScatter { .. } => self.reduce_scatter(observer)?,
            _ => Vec::new(),
        };
        let allgather = self.allgather(observer)?;

        let (rs_ledger, rs_last) = match (self.reduce_scatter_ledger, self.reduce_scatter_last_received) {
            (Some(l), Some(r)) => (l, r),
            // Unreachable after a completed reduce-scatter; fall back to the
            // initial state rather than panic.
            _ => (Ledger::initial(self.world), self.world.ranks().map(Rank::own_chunk).collect()),
        };

        Ok(RingSchedule {
            world:                        self.world,
            chunk_bytes:                  self.chunk_bytes,
            reduce_scatter,
            allgather,
            reduce_scatter_ledger:        rs_ledger,
            reduce_scatter_last_received: rs_last,
            final_ledger:                 self.ledger,
        })
    }

    // ── Phase plumbing ────────────────────────────────────────────────────

    fn run_phase<O: RingObserver>(&mut self, observer: &mut O) -> RingResult<Vec<Vec<RoundRecord>>> {
        let Some(phase) = self.state.phase() else {
            return Ok(Vec::new());
        };
        let per_phase = self.rounds_per_phase();
        let mut rounds = Vec::with_capacity(per_phase as usize);
        while self.state.phase() == Some(phase) {
            match self.state {
                RingState::ReduceScatter { next_round } | RingState::Allgather { next_round }
                    if next_round < per_phase =>
                {
                    rounds.push(self.execute_round(phase, Round(next_round), observer)?);
                }
                RingState::ReduceScatter { .. } => self.finish_reduce_scatter(observer),
                _ => self.finish_allgather(observer),
            }
        }
        Ok(rounds)
    }

    fn execute_round<O: RingObserver>(
        &mut self,
        phase:    Phase,
        round:    Round,
        observer: &mut O,
    ) -> RingResult<Vec<RoundRecord>> {
        debug!(%phase, %round, world_size = self.world.get(), "round start");
        observer.on_round_start(phase, round);

        let next_round = round.0 + 1;
        let records = match phase {
            Phase::ReduceScatter => {
                let records = self.reduce_scatter_round(round)?;
                self.state = RingState::ReduceScatter { next_round };
                records
            }
            _ => {
                let records = self.allgather_round(round)?;
                self.state = RingState::Allgather { next_round };
                records
            }
        };

        observer.on_round_end(phase, round, &records);
        Ok(records)
    }

    fn finish_reduce_scatter<O: RingObserver>(&mut self, observer: &mut O) {
        if let Err(e) = audit_reduce_scatter(&self.ledger, &self.last_received) {
            warn!(error = %e, "reduce-scatter finished with an incomplete reduction");
        }
        debug!(world_size = self.world.get(), "reduce-scatter complete");
        observer.on_phase_end(Phase::ReduceScatter, &self.ledger);

        self.reduce_scatter_ledger        = Some(self.ledger.clone());
        self.reduce_scatter_last_received = Some(self.last_received.clone());
        self.state = RingState::Allgather { next_round: 0 };
    }

    fn finish_allgather<O: RingObserver>(&mut self, observer: &mut O) {
        if let Err(e) = audit_allgather(&self.ledger) {
            warn!(error = %e, "allgather finished without a complete result");
        }
        debug!(world_size = self.world.get(), "allgather complete");
        observer.on_phase_end(Phase::Allgather, &self.ledger);
        self.state = RingState::Done;
        observer.on_run_end();
    }

    // ── Rounds ────────────────────────────────────────────────────────────

    /// Reduce-scatter round `s`: rank `r` sends chunk `(r - s) mod n` to its
    /// successor and gives it up; the predecessor's chunk arrives, gains `r`
    /// as a contributor, and replaces whatever `r` held at that index.
    fn reduce_scatter_round(&mut self, round: Round) -> RingResult<Vec<RoundRecord>> {
        let world = self.world;

        // ① Intents from the frozen ledger.
        let sends: Vec<Transmission> = world
            .ranks()
            .map(|r| {
                let idx = world.wrap(r.0 as i64 - round.0 as i64).own_chunk();
                let chunk = self
                    .ledger
                    .get(r, idx)
                    .cloned()
                    .ok_or(RingError::MissingChunk { process: r, chunk: idx })?;
                Ok(Transmission { from: r, to: world.next(r), chunk })
            })
            .collect::<RingResult<_>>()?;

        // ② Apply: senders relinquish, then receivers fold in.
        for t in &sends {
            trace!(from = %t.from, to = %t.to, chunk = %t.chunk, "reduce-scatter send");
            self.ledger.take(t.from, t.chunk.index());
        }

        let mut received = Vec::with_capacity(sends.len());
        for r in world.ranks() {
            let incoming = &sends[world.prev(r).index()];
            let mut chunk = incoming.chunk.clone();
            chunk.fold_in(r);
            debug_assert_eq!(
                chunk.index(),
                world.wrap(r.0 as i64 - round.0 as i64 - 1).own_chunk()
            );
            self.last_received[r.index()] = chunk.index();
            self.ledger.put(r, chunk.clone());
            received.push(chunk);
        }

        Ok(self.records(Phase::ReduceScatter, round, sends, received))
    }

    /// Allgather round `s`: rank `r` forwards (and keeps) the chunk it
    /// received last; an arriving chunk is stored only if `r` lacks that
    /// index.
    fn allgather_round(&mut self, round: Round) -> RingResult<Vec<RoundRecord>> {
        let world = self.world;

        // ① Intents from the frozen ledger.
        let sends: Vec<Transmission> = world
            .ranks()
            .map(|r| {
                let idx = self.last_received[r.index()];
                let chunk = self
                    .ledger
                    .get(r, idx)
                    .cloned()
                    .ok_or(RingError::MissingChunk { process: r, chunk: idx })?;
                Ok(Transmission { from: r, to: world.next(r), chunk })
            })
            .collect::<RingResult<_>>()?;

        // ② Apply receives.
        let mut received = Vec::with_capacity(sends.len());
        for r in world.ranks() {
            let incoming = &sends[world.prev(r).index()];
            trace!(from = %incoming.from, to = %r, chunk = %incoming.chunk, "allgather send");
            self.ledger.put_if_absent(r, incoming.chunk.clone());
            self.last_received[r.index()] = incoming.chunk.index();
            received.push(incoming.chunk.clone());
        }

        Ok(self.records(Phase::Allgather, round, sends, received))
    }

    /// Zip a round's sends and receives into one record per process, with
    /// holdings taken after every receive has been applied.
    fn records(
        &self,
        phase:    Phase,
        round:    Round,
        sends:    Vec<Transmission>,
        received: Vec<Chunk>,
    ) -> Vec<RoundRecord> {
        sends
            .into_iter()
            .zip(received)
            .map(|(sent, received)| {
                let process = sent.from;
                RoundRecord {
                    phase,
                    round,
                    process,
                    send_to:        sent.to,
                    sent:           sent.chunk,
                    bytes_sent:     self.chunk_bytes,
                    recv_from:      self.world.prev(process),
                    received,
                    bytes_received: self.chunk_bytes,
                    holdings:       self.ledger.snapshot(process),
                }
            })
            .collect()
    }
}

/// Run a complete ring allreduce simulation with no observer.
pub fn simulate_ring(world: WorldSize, vector: VectorSize) -> RingResult<RingSchedule> {
    RingSim::new(world, vector).run(&mut crate::NoopObserver)
}
