//! CSV sweep loader.
//!
//! # CSV format
//!
//! One row per simulation case.  `variant` may be left empty for `ring`.
//!
//! ```csv
//! world_size,vector_size_bytes,algorithm,variant
//! 16,14400,swing,bandwidth
//! 16,14400,swing,latency
//! 8,16384,ring,
//! 12,4096,recursive_doubling,bandwidth
//! ```
//!
//! Fields are trimmed.  Rows are only parsed here; range checks happen per
//! case in [`run_sweep`](crate::run_sweep) so one bad row does not reject the
//! whole file.

use std::io::Read;
use std::path::Path;

use cs_core::{CsError, RunConfig};

use crate::SweepError;

/// Load every case from a CSV file.
pub fn load_configs_csv(path: &Path) -> Result<Vec<RunConfig>, SweepError> {
    let file = std::fs::File::open(path)
        .map_err(CsError::Io)?;
    load_configs_reader(file)
}

/// Like [`load_configs_csv`] but accepts any `Read` source.
pub fn load_configs_reader<R: Read>(reader: R) -> Result<Vec<RunConfig>, SweepError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<RunConfig>()
        .enumerate()
        .map(|(i, row)| {
            // Header is line 1.
            row.map_err(|e| SweepError::from(CsError::Parse(format!("row {}: {e}", i + 2))))
        })
        .collect()
}
