//! `cs-swing` — partner selection and communication volume for logarithmic
//! allreduce schedules.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`partner`]  | `distance`, `hop_distance`, `partner`, `round_count`         |
//! | [`scheme`]   | `PartnerScheme` trait, `Swing`, `RecursiveDoubling`          |
//! | [`schedule`] | `ScheduleStep`, `build_schedule`, `total_bytes`              |
//! | [`volume`]   | `VolumeMatrix`, `build_volume_matrix`                        |
//!
//! # Data flow
//!
//! ```text
//! PartnerScheme ──► build_schedule ──► Vec<ScheduleStep> ──► VolumeMatrix
//!                                            │
//!                                            └──► CommEvent stream
//! ```
//!
//! The volume matrix is always a fold over the step schedule, so the two
//! views of a run can never disagree.

pub mod partner;
pub mod schedule;
pub mod scheme;
pub mod volume;


pub use partner::{distance, hop_distance, partner, round_count};
pub use schedule::{ScheduleStep, build_schedule, halved_payload, total_bytes};
pub use scheme::{PartnerScheme, RecursiveDoubling, Swing};
pub use volume::{VolumeMatrix, build_volume_matrix, build_volume_matrix_with, volume_matrix_from_raw};
