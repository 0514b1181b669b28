//! Human-readable byte counts for tables and logs.

use std::fmt;

/// Displays a byte count scaled to B / KB / MB / GB (base 1024) with no
/// decimals: `HumanBytes(2048)` → `2KB`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct HumanBytes(pub u64);

impl fmt::Display for HumanBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

        let mut value = self.0 as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit < UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }
        write!(f, "{:.0}{}", value, UNITS[unit])
    }
}
