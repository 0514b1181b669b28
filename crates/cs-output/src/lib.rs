//! `cs-output` — writers for simulation results.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                         |
//! |-----------|---------|-------------------------------------------------------|
//! | *(none)*  | CSV     | `round_records.csv`, `volume_matrix.csv`              |
//! | `sqlite`  | SQLite  | `output.db`                                           |
//! | `parquet` | Parquet | `round_records.parquet`, `volume_matrix.parquet`      |
//!
//! All backends implement [`OutputWriter`].  Ring runs are streamed through
//! [`RingOutputObserver`], which implements `cs_ring::RingObserver`; Swing
//! matrices are written in one call with [`write_volume_matrix`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_output::{CsvWriter, RingOutputObserver};
//!
//! let writer = CsvWriter::round_records(Path::new("./output")).unwrap();
//! let mut obs = RingOutputObserver::new(writer);
//! RingSim::new(world, vector).run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RingOutputObserver;
pub use row::{RoundRecordRow, VolumeCellRow};
pub use writer::{OutputWriter, write_volume_matrix};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
