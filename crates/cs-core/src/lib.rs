//! `cs-core` — foundational types for the collective-schedule simulators.
//!
//! This crate is a dependency of every other `cs-*` crate.  It has no `cs-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`ids`]      | `Rank`, `Round`, `ChunkIndex`                            |
//! | [`world`]    | `WorldSize`, `VectorSize` (validated run inputs)         |
//! | [`kind`]     | `Variant`, `Phase`, `Algorithm`                          |
//! | [`config`]   | `RunConfig`, `ValidatedRun`                              |
//! | [`event`]    | `CommEvent`, one directed transfer                       |
//! | [`bytes`]    | `HumanBytes` display helper                              |
//! | [`error`]    | `CsError`, `CsResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod bytes;
pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod kind;
pub mod world;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bytes::HumanBytes;
pub use config::{RunConfig, ValidatedRun};
pub use error::{CsError, CsResult};
pub use event::CommEvent;
pub use ids::{ChunkIndex, Rank, Round};
pub use kind::{Algorithm, Phase, Variant};
pub use world::{VectorSize, WorldSize};
