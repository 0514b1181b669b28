//! Observer hooks for ring simulations.

use cs_core::{Phase, Round};

use crate::{Ledger, RoundRecord};

/// Callbacks invoked by [`RingSim`][crate::RingSim] as it advances.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: round printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl RingObserver for Printer {
///     fn on_round_end(&mut self, phase: Phase, round: Round, records: &[RoundRecord]) {
///         println!("{phase} {round}: {} transfers", records.len());
///     }
/// }
/// ```
pub trait RingObserver {
    /// Called before a round's intents are computed.
    fn on_round_start(&mut self, _phase: Phase, _round: Round) {}

    /// Called after a round has been applied, with one record per process.
    fn on_round_end(&mut self, _phase: Phase, _round: Round, _records: &[RoundRecord]) {}

    /// Called once when a phase completes, with the ledger at that point.
    fn on_phase_end(&mut self, _phase: Phase, _ledger: &Ledger) {}

    /// Called once after the allgather completes.
    fn on_run_end(&mut self) {}
}

/// A [`RingObserver`] that does nothing.
pub struct NoopObserver;

impl RingObserver for NoopObserver {}
