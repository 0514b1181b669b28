//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub`; prefer
//! the `.index()` helper when indexing into a `Vec`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
///
/// `$prefix` is the short label used by `Display` (`P3`, `C5`, `R0`).
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) = $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// A process identifier in `[0, world_size)`.
    pub struct Rank(u32) = "P";
}

typed_id! {
    /// A 0-based round index within one phase of a schedule.
    pub struct Round(u32) = "R";
}

typed_id! {
    /// Index of a data chunk.  Chunk `i` originally belongs to rank `i`.
    pub struct ChunkIndex(u32) = "C";
}

impl ChunkIndex {
    /// The rank whose original data this chunk represents.
    #[inline]
    pub fn owner(self) -> Rank {
        Rank(self.0)
    }
}

impl Rank {
    /// The chunk index holding this rank's original data.
    #[inline]
    pub fn own_chunk(self) -> ChunkIndex {
        ChunkIndex(self.0)
    }
}
