//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `round_records` and `volume_matrix`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, RoundRecordRow, VolumeCellRow};

/// Writes results to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS round_records (
                 phase          TEXT    NOT NULL,
                 round          INTEGER NOT NULL,
                 process        INTEGER NOT NULL,
                 send_to        INTEGER NOT NULL,
                 send_chunk     INTEGER NOT NULL,
                 send_label     TEXT    NOT NULL,
                 bytes_sent     INTEGER NOT NULL,
                 recv_from      INTEGER NOT NULL,
                 recv_chunk     INTEGER NOT NULL,
                 recv_label     TEXT    NOT NULL,
                 bytes_received INTEGER NOT NULL,
                 data_held      TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS volume_matrix (
                 sender   INTEGER NOT NULL,
                 receiver INTEGER NOT NULL,
                 bytes    REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_round_records(&mut self, rows: &[RoundRecordRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO round_records \
                 (phase, round, process, send_to, send_chunk, send_label, bytes_sent, \
                  recv_from, recv_chunk, recv_label, bytes_received, data_held) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.phase.as_str(),
                    row.round,
                    row.process,
                    row.send_to,
                    row.send_chunk,
                    row.send_label,
                    row.bytes_sent,
                    row.recv_from,
                    row.recv_chunk,
                    row.recv_label,
                    row.bytes_received,
                    row.data_held,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_volume(&mut self, rows: &[VolumeCellRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO volume_matrix (sender, receiver, bytes) VALUES (?1, ?2, ?3)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.sender, row.receiver, row.bytes])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
