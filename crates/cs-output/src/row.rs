//! Flat row types written by output backends.

use cs_core::Phase;
use cs_ring::RoundRecord;

/// One process's view of one ring round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecordRow {
    pub phase:          Phase,
    pub round:          u32,
    pub process:        u32,
    pub send_to:        u32,
    pub send_chunk:     u32,
    /// Chunk label with contributors, e.g. `C1[P0+P1]`.
    pub send_label:     String,
    pub bytes_sent:     u64,
    pub recv_from:      u32,
    pub recv_chunk:     u32,
    pub recv_label:     String,
    pub bytes_received: u64,
    /// Every chunk held after the round, space separated, in index order.
    pub data_held:      String,
}

impl From<&RoundRecord> for RoundRecordRow {
    fn from(rec: &RoundRecord) -> Self {
        let data_held = rec
            .holdings
            .chunks()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            phase:          rec.phase,
            round:          rec.round.0,
            process:        rec.process.0,
            send_to:        rec.send_to.0,
            send_chunk:     rec.send_chunk().0,
            send_label:     rec.sent.to_string(),
            bytes_sent:     rec.bytes_sent,
            recv_from:      rec.recv_from.0,
            recv_chunk:     rec.recv_chunk().0,
            recv_label:     rec.received.to_string(),
            bytes_received: rec.bytes_received,
            data_held,
        }
    }
}

/// Bytes sent from `sender` to `receiver` over a whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeCellRow {
    pub sender:   u32,
    pub receiver: u32,
    pub bytes:    f64,
}
