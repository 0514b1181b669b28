//! CSV output backend.
//!
//! Creates up to two files in the configured output directory:
//! - `round_records.csv`
//! - `volume_matrix.csv`
//!
//! [`CsvWriter::new`] opens both; [`CsvWriter::round_records`] and
//! [`CsvWriter::volume`] open one, and batches for the other are dropped.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, RoundRecordRow, VolumeCellRow};

pub(crate) const ROUND_RECORD_HEADER: [&str; 12] = [
    "phase",
    "round",
    "process",
    "send_to",
    "send_chunk",
    "send_label",
    "bytes_sent",
    "recv_from",
    "recv_chunk",
    "recv_label",
    "bytes_received",
    "data_held",
];

/// Writes results to CSV files.
pub struct CsvWriter {
    records:  Option<Writer<File>>,
    volume:   Option<Writer<File>>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) both CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            records:  Some(open_records(dir)?),
            volume:   Some(open_volume(dir)?),
            finished: false,
        })
    }

    /// Open only `round_records.csv`.
    pub fn round_records(dir: &Path) -> OutputResult<Self> {
        Ok(Self { records: Some(open_records(dir)?), volume: None, finished: false })
    }

    /// Open only `volume_matrix.csv`.
    pub fn volume(dir: &Path) -> OutputResult<Self> {
        Ok(Self { records: None, volume: Some(open_volume(dir)?), finished: false })
    }
}

fn open_records(dir: &Path) -> OutputResult<Writer<File>> {
    let mut records = Writer::from_path(dir.join("round_records.csv"))?;
    records.write_record(ROUND_RECORD_HEADER)?;
    Ok(records)
}

fn open_volume(dir: &Path) -> OutputResult<Writer<File>> {
    let mut volume = Writer::from_path(dir.join("volume_matrix.csv"))?;
    volume.write_record(["sender", "receiver", "bytes"])?;
    Ok(volume)
}

impl OutputWriter for CsvWriter {
    fn write_round_records(&mut self, rows: &[RoundRecordRow]) -> OutputResult<()> {
        let Some(records) = self.records.as_mut() else {
            return Ok(());
        };
        for row in rows {
            records.write_record(&[
                row.phase.as_str().to_owned(),
                row.round.to_string(),
                row.process.to_string(),
                row.send_to.to_string(),
                row.send_chunk.to_string(),
                row.send_label.clone(),
                row.bytes_sent.to_string(),
                row.recv_from.to_string(),
                row.recv_chunk.to_string(),
                row.recv_label.clone(),
                row.bytes_received.to_string(),
                row.data_held.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_volume(&mut self, rows: &[VolumeCellRow]) -> OutputResult<()> {
        let Some(volume) = self.volume.as_mut() else {
            return Ok(());
        };
        for row in rows {
            volume.write_record(&[
                row.sender.to_string(),
                row.receiver.to_string(),
                row.bytes.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if let Some(w) = self.records.as_mut() {
            w.flush()?;
        }
        if let Some(w) = self.volume.as_mut() {
            w.flush()?;
        }
        Ok(())
    }
}
