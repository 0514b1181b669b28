//! Algorithm-selection enums shared by every simulator.

use std::fmt;
use std::str::FromStr;

use crate::CsError;

// ── Variant ───────────────────────────────────────────────────────────────────

/// Which flavour of a logarithmic allreduce to model.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Variant {
    /// Reduce-scatter with halving payloads, then a mirrored allgather.
    Bandwidth,
    /// Every round exchanges the full vector.
    Latency,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Bandwidth, Variant::Latency];

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Bandwidth => "bandwidth",
            Variant::Latency   => "latency",
        }
    }

    /// Title-case label, e.g. `"Bandwidth-Optimal"`.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Bandwidth => "Bandwidth-Optimal",
            Variant::Latency   => "Latency-Optimal",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = CsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bandwidth" => Ok(Variant::Bandwidth),
            "latency"   => Ok(Variant::Latency),
            other       => Err(CsError::UnknownVariant(other.to_owned())),
        }
    }
}

// ── Phase ─────────────────────────────────────────────────────────────────────

/// The phase a round belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    ReduceScatter,
    Allgather,
    /// Latency-optimal rounds: no scatter, the whole vector moves.
    FullExchange,
}

impl Phase {
    /// Stable snake-case identifier used in output files.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::ReduceScatter => "reduce_scatter",
            Phase::Allgather     => "allgather",
            Phase::FullExchange  => "full_exchange",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::ReduceScatter => "Reduce-Scatter",
            Phase::Allgather     => "Allgather",
            Phase::FullExchange  => "Full-Exchange",
        })
    }
}

// ── Algorithm ─────────────────────────────────────────────────────────────────

/// Algorithm family selected by a run configuration.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    Swing,
    RecursiveDoubling,
    Ring,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Swing             => "swing",
            Algorithm::RecursiveDoubling => "recursive_doubling",
            Algorithm::Ring              => "ring",
        }
    }

    /// `true` for the partner-selection families that need a [`Variant`].
    pub fn needs_variant(self) -> bool {
        !matches!(self, Algorithm::Ring)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = CsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "swing"              => Ok(Algorithm::Swing),
            "recursive_doubling" => Ok(Algorithm::RecursiveDoubling),
            "ring"               => Ok(Algorithm::Ring),
            other                => Err(CsError::UnknownAlgorithm(other.to_owned())),
        }
    }
}
