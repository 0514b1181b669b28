//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `round_records.parquet`
//! - `volume_matrix.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{OutputResult, RoundRecordRow, VolumeCellRow};

fn record_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("phase",          DataType::Utf8,   false),
        Field::new("round",          DataType::UInt32, false),
        Field::new("process",        DataType::UInt32, false),
        Field::new("send_to",        DataType::UInt32, false),
        Field::new("send_chunk",     DataType::UInt32, false),
        Field::new("send_label",     DataType::Utf8,   false),
        Field::new("bytes_sent",     DataType::UInt64, false),
        Field::new("recv_from",      DataType::UInt32, false),
        Field::new("recv_chunk",     DataType::UInt32, false),
        Field::new("recv_label",     DataType::Utf8,   false),
        Field::new("bytes_received", DataType::UInt64, false),
        Field::new("data_held",      DataType::Utf8,   false),
    ]))
}

fn volume_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("sender",   DataType::UInt32,  false),
        Field::new("receiver", DataType::UInt32,  false),
        Field::new("bytes",    DataType::Float64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes results to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    records:     Option<ArrowWriter<File>>,
    volume:      Option<ArrowWriter<File>>,
    rec_schema:  Arc<Schema>,
    vol_schema:  Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let rec_schema = record_schema();
        let vol_schema = volume_schema();

        let rec_file = File::create(dir.join("round_records.parquet"))?;
        let records = ArrowWriter::try_new(rec_file, Arc::clone(&rec_schema), Some(snappy_props()))?;

        let vol_file = File::create(dir.join("volume_matrix.parquet"))?;
        let volume = ArrowWriter::try_new(vol_file, Arc::clone(&vol_schema), Some(snappy_props()))?;

        Ok(Self {
            records: Some(records),
            volume:  Some(volume),
            rec_schema,
            vol_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_round_records(&mut self, rows: &[RoundRecordRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.records.as_mut() else {
            return Ok(());
        };

        let mut phases     = StringBuilder::new();
        let mut rounds     = UInt32Builder::new();
        let mut processes  = UInt32Builder::new();
        let mut send_to    = UInt32Builder::new();
        let mut send_chunk = UInt32Builder::new();
        let mut send_label = StringBuilder::new();
        let mut sent       = UInt64Builder::new();
        let mut recv_from  = UInt32Builder::new();
        let mut recv_chunk = UInt32Builder::new();
        let mut recv_label = StringBuilder::new();
        let mut received   = UInt64Builder::new();
        let mut held       = StringBuilder::new();

        for row in rows {
            phases.append_value(row.phase.as_str());
            rounds.append_value(row.round);
            processes.append_value(row.process);
            send_to.append_value(row.send_to);
            send_chunk.append_value(row.send_chunk);
            send_label.append_value(&row.send_label);
            sent.append_value(row.bytes_sent);
            recv_from.append_value(row.recv_from);
            recv_chunk.append_value(row.recv_chunk);
            recv_label.append_value(&row.recv_label);
            received.append_value(row.bytes_received);
            held.append_value(&row.data_held);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.rec_schema),
            vec![
                Arc::new(phases.finish()),
                Arc::new(rounds.finish()),
                Arc::new(processes.finish()),
                Arc::new(send_to.finish()),
                Arc::new(send_chunk.finish()),
                Arc::new(send_label.finish()),
                Arc::new(sent.finish()),
                Arc::new(recv_from.finish()),
                Arc::new(recv_chunk.finish()),
                Arc::new(recv_label.finish()),
                Arc::new(received.finish()),
                Arc::new(held.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_volume(&mut self, rows: &[VolumeCellRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.volume.as_mut() else {
            return Ok(());
        };

        let mut senders   = UInt32Builder::new();
        let mut receivers = UInt32Builder::new();
        let mut bytes     = Float64Builder::new();

        for row in rows {
            senders.append_value(row.sender);
            receivers.append_value(row.receiver);
            bytes.append_value(row.bytes);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.vol_schema),
            vec![
                Arc::new(senders.finish()),
                Arc::new(receivers.finish()),
                Arc::new(bytes.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.records.take() {
            w.close()?;
        }
        if let Some(w) = self.volume.take() {
            w.close()?;
        }
        Ok(())
    }
}
