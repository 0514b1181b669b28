//! Integration tests for cs-output.

#[cfg(test)]
mod csv_tests {
    use cs_core::{Phase, Variant, VectorSize, WorldSize};
    use cs_ring::RingSim;
    use cs_swing::build_volume_matrix;
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::observer::RingOutputObserver;
    use crate::row::{RoundRecordRow, VolumeCellRow};
    use crate::writer::{OutputWriter, write_volume_matrix};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn record_row(process: u32) -> RoundRecordRow {
        RoundRecordRow {
            phase:          Phase::ReduceScatter,
            round:          0,
            process,
            send_to:        process + 1,
            send_chunk:     process,
            send_label:     format!("C{process}[P{process}]"),
            bytes_sent:     512,
            recv_from:      process.saturating_sub(1),
            recv_chunk:     0,
            recv_label:     "C0[P0+P1]".to_owned(),
            bytes_received: 512,
            data_held:      "C0[P0+P1]".to_owned(),
        }
    }

    fn read_all(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("round_records.csv").exists());
        assert!(dir.path().join("volume_matrix.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("round_records.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, crate::csv::ROUND_RECORD_HEADER);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("volume_matrix.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["sender", "receiver", "bytes"]);
    }

    #[test]
    fn csv_record_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_round_records(&[record_row(0), record_row(1)]).unwrap();
        w.finish().unwrap();

        let rows = read_all(dir.path().join("round_records.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "reduce_scatter");
        assert_eq!(&rows[1][2], "1");          // process
        assert_eq!(&rows[1][5], "C1[P1]");     // send_label
        assert_eq!(&rows[1][6], "512");        // bytes_sent
    }

    #[test]
    fn csv_volume_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_volume(&[VolumeCellRow { sender: 2, receiver: 3, bytes: 1800.5 }]).unwrap();
        w.finish().unwrap();

        let rows = read_all(dir.path().join("volume_matrix.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "2");
        assert_eq!(&rows[0][1], "3");
        assert_eq!(&rows[0][2], "1800.5");
    }

    #[test]
    fn csv_round_records_only() {
        let dir = tmp();
        let mut w = CsvWriter::round_records(dir.path()).unwrap();
        w.write_round_records(&[record_row(0)]).unwrap();
        w.write_volume(&[VolumeCellRow { sender: 0, receiver: 1, bytes: 8.0 }]).unwrap();
        w.finish().unwrap();

        assert!(!dir.path().join("volume_matrix.csv").exists());
        assert_eq!(read_all(dir.path().join("round_records.csv")).len(), 1);
    }

    #[test]
    fn csv_volume_only() {
        let dir = tmp();
        let mut w = CsvWriter::volume(dir.path()).unwrap();
        w.write_round_records(&[record_row(0)]).unwrap();
        w.write_volume(&[VolumeCellRow { sender: 0, receiver: 1, bytes: 8.0 }]).unwrap();
        w.finish().unwrap();

        assert!(!dir.path().join("round_records.csv").exists());
        assert_eq!(read_all(dir.path().join("volume_matrix.csv")).len(), 1);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_round_records(&[]).unwrap();
        w.write_volume(&[]).unwrap();
    }

    #[test]
    fn volume_matrix_written_row_major() {
        let world = WorldSize::new(4).unwrap();
        let matrix = build_volume_matrix(world, VectorSize::new(4096).unwrap(), Variant::Bandwidth);

        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        write_volume_matrix(&mut w, &matrix).unwrap();
        w.finish().unwrap();

        let rows = read_all(dir.path().join("volume_matrix.csv"));
        assert_eq!(rows.len(), 16);
        assert_eq!((&rows[0][0], &rows[0][1], &rows[0][2]), ("0", "0", "0"));
        assert_eq!((&rows[1][0], &rows[1][1], &rows[1][2]), ("0", "1", "4096"));
        assert_eq!((&rows[15][0], &rows[15][1]), ("3", "3"));
    }

    #[test]
    fn integration_ring_csv() {
        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = RingOutputObserver::new(writer);
        RingSim::from_raw(4, 4096).unwrap().run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // 2 phases × 3 rounds × 4 processes.
        let rows = read_all(dir.path().join("round_records.csv"));
        assert_eq!(rows.len(), 24);

        let p1 = &rows[1];
        assert_eq!(&p1[0], "reduce_scatter");
        assert_eq!(&p1[2], "1");
        assert_eq!(&p1[3], "2");
        assert_eq!(&p1[5], "C1[P1]");
        assert_eq!(&p1[6], "1024");
        assert_eq!(&p1[7], "0");
        assert_eq!(&p1[9], "C0[P0+P1]");
        assert_eq!(&p1[11], "C0[P0+P1]");

        let last = &rows[23];
        assert_eq!(&last[0], "allgather");
        assert_eq!(&last[11], "C0[P0+P1+P2+P3] C1[P0+P1+P2+P3] C2[P0+P1+P2+P3] C3[P0+P1+P2+P3]");
    }

    #[test]
    fn row_from_record() {
        let schedule = cs_ring::simulate_ring(WorldSize::new(3).unwrap(), VectorSize::new(300).unwrap()).unwrap();
        let row = RoundRecordRow::from(&schedule.reduce_scatter[0][2]);
        assert_eq!(row.process, 2);
        assert_eq!(row.send_to, 0);
        assert_eq!(row.send_chunk, 2);
        assert_eq!(row.recv_from, 1);
        assert_eq!(row.recv_label, "C1[P1+P2]");
        assert_eq!(row.bytes_received, 100);
        assert_eq!(row.data_held, "C1[P1+P2]");
    }
}

// ── Observer error handling ───────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use std::io;

    use cs_ring::RingSim;

    use crate::observer::RingOutputObserver;
    use crate::row::{RoundRecordRow, VolumeCellRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    /// Fails every record write; counts calls.
    #[derive(Default)]
    struct FailingWriter {
        record_calls: usize,
        finished:     bool,
    }

    impl OutputWriter for FailingWriter {
        fn write_round_records(&mut self, _rows: &[RoundRecordRow]) -> OutputResult<()> {
            self.record_calls += 1;
            Err(io::Error::other(format!("write {}", self.record_calls)).into())
        }

        fn write_volume(&mut self, _rows: &[VolumeCellRow]) -> OutputResult<()> {
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn first_error_kept() {
        let mut obs = RingOutputObserver::new(FailingWriter::default());
        RingSim::from_raw(3, 300).unwrap().run(&mut obs).unwrap();

        match obs.take_error() {
            Some(OutputError::Io(e)) => assert_eq!(e.to_string(), "write 1"),
            other => panic!("expected first I/O error, got {other:?}"),
        }
        assert!(obs.take_error().is_none());

        let writer = obs.into_writer();
        assert_eq!(writer.record_calls, 4);
        assert!(writer.finished);
    }

    #[test]
    fn single_process_writes_nothing() {
        let mut obs = RingOutputObserver::new(FailingWriter::default());
        RingSim::from_raw(1, 64).unwrap().run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(obs.writer_mut().record_calls, 0);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use cs_ring::RingSim;
    use tempfile::TempDir;

    use crate::observer::RingOutputObserver;
    use crate::row::VolumeCellRow;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_ring_records() {
        let dir = tmp();
        let mut obs = RingOutputObserver::new(SqliteWriter::new(dir.path()).unwrap());
        RingSim::from_raw(5, 500).unwrap().run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM round_records", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(count, 2 * 4 * 5);

        let label: String = conn.query_row(
            "SELECT recv_label FROM round_records \
             WHERE phase = 'reduce_scatter' AND round = 3 AND process = 0",
            [],
            |r| r.get(0),
        ).unwrap();
        assert_eq!(label, "C1[P0+P1+P2+P3+P4]");
    }

    #[test]
    fn sqlite_volume_cells() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_volume(&[
            VolumeCellRow { sender: 0, receiver: 1, bytes: 7200.0 },
            VolumeCellRow { sender: 1, receiver: 0, bytes: 7200.0 },
        ]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let total: f64 = conn.query_row(
            "SELECT SUM(bytes) FROM volume_matrix", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(total, 14_400.0);
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use arrow::datatypes::DataType;
    use cs_core::{Variant, VectorSize, WorldSize};
    use cs_ring::RingSim;
    use cs_swing::build_volume_matrix;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::TempDir;

    use crate::observer::RingOutputObserver;
    use crate::parquet::ParquetWriter;
    use crate::writer::{OutputWriter, write_volume_matrix};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row_count(path: std::path::PathBuf) -> usize {
        let file = std::fs::File::open(path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file).unwrap().build().unwrap();
        reader.map(|b| b.unwrap().num_rows()).sum()
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("round_records.parquet").exists());
        assert!(dir.path().join("volume_matrix.parquet").exists());
    }

    #[test]
    fn parquet_ring_records() {
        let dir = tmp();
        let mut obs = RingOutputObserver::new(ParquetWriter::new(dir.path()).unwrap());
        RingSim::from_raw(4, 4096).unwrap().run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(row_count(dir.path().join("round_records.parquet")), 24);
    }

    #[test]
    fn parquet_volume_schema() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        let matrix = build_volume_matrix(
            WorldSize::new(8).unwrap(),
            VectorSize::new(1024).unwrap(),
            Variant::Latency,
        );
        write_volume_matrix(&mut w, &matrix).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("volume_matrix.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let bytes = builder.schema().field_with_name("bytes").unwrap().clone();
        assert_eq!(*bytes.data_type(), DataType::Float64);

        assert_eq!(row_count(dir.path().join("volume_matrix.parquet")), 64);
    }
}
