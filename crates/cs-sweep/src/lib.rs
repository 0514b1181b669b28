//! `cs-sweep` — batch evaluation of simulation cases.
//!
//! # Crate layout
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`loader`] | `load_configs_csv`, `load_configs_reader`             |
//! | [`run`]    | `run_sweep`, `run_case`, `SweepOutcome`, `Artifact`   |
//! | [`error`]  | `SweepError`, `SweepResult<T>`                        |
//!
//! Enable the `parallel` feature to evaluate cases on Rayon's pool.

pub mod error;
pub mod loader;
pub mod run;


pub use error::{SweepError, SweepResult};
pub use loader::{load_configs_csv, load_configs_reader};
pub use run::{Artifact, Summary, SweepOutcome, run_case, run_sweep};
