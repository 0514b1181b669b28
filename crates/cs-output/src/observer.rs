//! `RingOutputObserver<W>` — bridges `RingObserver` to an `OutputWriter`.

use cs_core::{Phase, Round};
use cs_ring::{RingObserver, RoundRecord};

use crate::row::RoundRecordRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`RingObserver`] that writes every round's records to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `RingObserver`
/// methods have no return value.  After the run returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct RingOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> RingOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after the run returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Borrow the inner writer, e.g. to add a volume matrix to the same output.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> RingObserver for RingOutputObserver<W> {
    fn on_round_end(&mut self, _phase: Phase, _round: Round, records: &[RoundRecord]) {
        if records.is_empty() {
            return;
        }
        let rows: Vec<RoundRecordRow> = records.iter().map(RoundRecordRow::from).collect();
        let result = self.writer.write_round_records(&rows);
        self.store_err(result);
    }

    fn on_run_end(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
