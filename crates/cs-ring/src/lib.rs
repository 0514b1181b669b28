//! `cs-ring` — ring allreduce schedule simulator.
//!
//! # Two-phase run
//!
//! ```text
//! reduce-scatter, for s in 0..n-1:
//!   ① Intents: every rank r picks chunk (r - s) mod n from the frozen
//!              pre-round ledger and addresses it to (r + 1) mod n.
//!   ② Apply:   senders drop the chunk; each receiver folds itself into
//!              the incoming chunk's contributor set and stores it.
//!
//! allgather, for s in 0..n-1:
//!   ① Intents: every rank forwards the chunk it received last.
//!   ② Apply:   receivers insert the chunk if they do not hold it yet.
//! ```
//!
//! Each round emits one [`RoundRecord`] per rank.  Phase 1's terminal ledger
//! is kept as a frozen copy, so the allgather never disturbs it.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`chunk`]    | `Chunk`, `ContributorSet`                                 |
//! | [`ledger`]   | `Ledger` (per-process chunk arena), `Holdings` snapshot   |
//! | [`record`]   | `RoundRecord`, `RingSchedule`                             |
//! | [`sim`]      | `RingSim` state machine, `simulate_ring`                  |
//! | [`audit`]    | reduction-completeness checks for both phases             |
//! | [`observer`] | `RingObserver` callbacks, `NoopObserver`                  |
//! | [`error`]    | `RingError`, `RingResult<T>`                              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cs_core::{VectorSize, WorldSize};
//! use cs_ring::simulate_ring;
//!
//! let schedule = simulate_ring(WorldSize::new(8)?, VectorSize::new(16_384)?)?;
//! for round in &schedule.reduce_scatter {
//!     for rec in round {
//!         println!("{} → {}: {}", rec.process, rec.send_to, rec.sent);
//!     }
//! }
//! ```

pub mod audit;
pub mod chunk;
pub mod error;
pub mod ledger;
pub mod observer;
pub mod record;
pub mod sim;


pub use audit::{audit_allgather, audit_reduce_scatter};
pub use chunk::{Chunk, ContributorSet};
pub use error::{RingError, RingResult};
pub use ledger::{Holdings, Ledger};
pub use observer::{NoopObserver, RingObserver};
pub use record::{RingSchedule, RoundRecord};
pub use sim::{RingSim, RingState, simulate_ring};
