//! The `OutputWriter` trait implemented by all backend writers.

use cs_swing::VolumeMatrix;

use crate::{OutputResult, RoundRecordRow, VolumeCellRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
pub trait OutputWriter {
    /// Write a batch of ring round records.
    fn write_round_records(&mut self, rows: &[RoundRecordRow]) -> OutputResult<()>;

    /// Write a batch of volume-matrix cells.
    fn write_volume(&mut self, rows: &[VolumeCellRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write every cell of `matrix`, row-major, as one batch.
pub fn write_volume_matrix<W: OutputWriter + ?Sized>(writer: &mut W, matrix: &VolumeMatrix) -> OutputResult<()> {
    let rows: Vec<VolumeCellRow> = matrix
        .cells()
        .map(|(sender, receiver, bytes)| VolumeCellRow { sender: sender.0, receiver: receiver.0, bytes })
        .collect();
    writer.write_volume(&rows)
}
