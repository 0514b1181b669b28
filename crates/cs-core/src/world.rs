//! Validated run inputs.
//!
//! Raw inputs arrive as signed integers (from config files, sweeps, or
//! callers) so that out-of-range values are representable and can be
//! rejected.  Once wrapped in [`WorldSize`] / [`VectorSize`] a value is known
//! to be valid, and every simulator takes these types rather than raw
//! integers.

use std::fmt;

use crate::{CsError, CsResult, Rank};

// ── WorldSize ─────────────────────────────────────────────────────────────────

/// Number of participating processes.  Always ≥ 1.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "i64"))]
pub struct WorldSize(u32);

impl WorldSize {
    /// Validate a raw process count.
    ///
    /// Returns [`CsError::InvalidWorldSize`] when `n < 1` or `n` does not
    /// fit in a `u32`.
    pub fn new(n: i64) -> CsResult<Self> {
        match u32::try_from(n) {
            Ok(v) if v >= 1 => Ok(Self(v)),
            _ => Err(CsError::InvalidWorldSize(n)),
        }
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_power_of_two(self) -> bool {
        self.0.is_power_of_two()
    }

    /// All ranks `0..world_size` in ascending order.
    pub fn ranks(self) -> impl DoubleEndedIterator<Item = Rank> + ExactSizeIterator + Clone {
        (0..self.0).map(Rank)
    }

    /// `true` if `rank` is a member of this world.
    #[inline]
    pub fn contains(self, rank: Rank) -> bool {
        rank.0 < self.0
    }

    /// Map any integer onto a rank with mathematical (floored) modulo, so
    /// negative values wrap to the top of the range: `wrap(-1) == P{n-1}`.
    #[inline]
    pub fn wrap(self, value: i64) -> Rank {
        Rank(value.rem_euclid(self.0 as i64) as u32)
    }

    /// Ring successor: `(rank + 1) mod n`.
    #[inline]
    pub fn next(self, rank: Rank) -> Rank {
        self.wrap(rank.0 as i64 + 1)
    }

    /// Ring predecessor: `(rank - 1) mod n`.
    #[inline]
    pub fn prev(self, rank: Rank) -> Rank {
        self.wrap(rank.0 as i64 - 1)
    }
}

impl TryFrom<i64> for WorldSize {
    type Error = CsError;
    fn try_from(n: i64) -> CsResult<Self> {
        Self::new(n)
    }
}

impl From<WorldSize> for i64 {
    fn from(w: WorldSize) -> i64 {
        w.0 as i64
    }
}

impl fmt::Display for WorldSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── VectorSize ────────────────────────────────────────────────────────────────

/// Size in bytes of the vector being reduced.  Always ≥ 0.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "i64"))]
pub struct VectorSize(u64);

impl VectorSize {
    /// Validate a raw byte count.  Negative values yield
    /// [`CsError::InvalidVectorSize`].
    pub fn new(bytes: i64) -> CsResult<Self> {
        u64::try_from(bytes)
            .map(Self)
            .map_err(|_| CsError::InvalidVectorSize(bytes))
    }

    #[inline]
    pub fn bytes(self) -> u64 {
        self.0
    }

    /// Bytes per chunk when the vector is split evenly across `world`.
    ///
    /// Floor division: any remainder is dropped, not redistributed.
    #[inline]
    pub fn per_chunk(self, world: WorldSize) -> u64 {
        self.0 / world.get() as u64
    }
}

impl TryFrom<i64> for VectorSize {
    type Error = CsError;
    fn try_from(n: i64) -> CsResult<Self> {
        Self::new(n)
    }
}

impl From<VectorSize> for i64 {
    fn from(v: VectorSize) -> i64 {
        // Constructed from an i64, so the value always fits.
        v.0 as i64
    }
}

impl fmt::Display for VectorSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} B", self.0)
    }
}
