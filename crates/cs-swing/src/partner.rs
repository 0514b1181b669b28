//! Swing partner selection.
//!
//! At round `s` every even rank talks to `rank + ρ(s)` and every odd rank to
//! `rank - ρ(s)`, where
//!
//! ```text
//! ρ(s) = Σ_{i=0..s} (-2)^i   →   1, -1, 3, -5, 11, -21, …
//! ```
//!
//! ρ(s) is always odd, so on an even-sized world an even rank is always
//! paired with an odd one and the pairing is symmetric.

use cs_core::{Rank, Round, WorldSize};

/// Signed partner offset ρ(s) for round `s`.
///
/// Computed as the alternating sum `+2^0 - 2^1 + 2^2 - …` up to and
/// including `2^s`.
///
/// # Panics
/// Panics if `round.0 >= 63`: the offset no longer fits an `i64`.  Real
/// schedules stop at `round_count(u32::MAX) == 32`.
pub fn distance(round: Round) -> i64 {
    assert!(round.0 < 63, "swing offset for {round} overflows i64");
    (0..=round.0).fold(0i64, |acc, i| {
        if i % 2 == 0 { acc + (1i64 << i) } else { acc - (1i64 << i) }
    })
}

/// Number of ring hops an exchange travels at `round`: δ(s) = |ρ(s)|.
#[inline]
pub fn hop_distance(round: Round) -> u64 {
    distance(round).unsigned_abs()
}

/// The peer `rank` exchanges with at `round` on a world of `world` ranks.
///
/// Wraps with mathematical modulo, so `partner(P1, R1, 16) == P2` and
/// `partner(P0, R1, 16) == P15`.
pub fn partner(rank: Rank, round: Round, world: WorldSize) -> Rank {
    let offset = distance(round);
    let r = rank.0 as i64;
    if rank.0 % 2 == 0 {
        world.wrap(r + offset)
    } else {
        world.wrap(r - offset)
    }
}

/// How many rounds a logarithmic schedule needs: ⌈log2(world)⌉, and 0 for a
/// single process.
pub fn round_count(world: WorldSize) -> u32 {
    let n = world.get();
    if n < 2 {
        return 0;
    }
    // For n > 1: ceil(log2(n)) = 32 - (n-1).leading_zeros()
    u32::BITS - (n - 1).leading_zeros()
}
