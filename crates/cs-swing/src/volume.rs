//! Sender × receiver communication-volume matrices.

use cs_core::{CsResult, Rank, Variant, VectorSize, WorldSize};
use tracing::debug;

use crate::{PartnerScheme, ScheduleStep, Swing, build_schedule};

/// Accumulated bytes sent from each rank (row) to each rank (column).
///
/// Built once per `(world, vector, variant)` and read-only afterwards.
/// Cells are stored row-major in a single `Vec`.
#[derive(Clone, Debug, PartialEq)]
pub struct VolumeMatrix {
    world: WorldSize,
    cells: Vec<f64>,
}

impl VolumeMatrix {
    /// Sum every transfer of `steps` into a fresh matrix.
    ///
    /// Accumulation is pure addition, so the result does not depend on the
    /// order of steps or transfers.
    pub fn from_schedule(world: WorldSize, steps: &[ScheduleStep]) -> Self {
        let n = world.as_usize();
        let mut cells = vec![0.0; n * n];
        for step in steps {
            for &(src, dst) in &step.transfers {
                cells[src.index() * n + dst.index()] += step.payload_bytes;
            }
        }
        Self { world, cells }
    }

    pub fn world_size(&self) -> WorldSize {
        self.world
    }

    /// Bytes sent from `sender` to `receiver`.
    ///
    /// # Panics
    /// Panics if either rank is outside the world.
    #[inline]
    pub fn get(&self, sender: Rank, receiver: Rank) -> f64 {
        self.row(sender)[receiver.index()]
    }

    /// Everything `sender` sent, indexed by receiver.
    pub fn row(&self, sender: Rank) -> &[f64] {
        let n = self.world.as_usize();
        &self.cells[sender.index() * n..(sender.index() + 1) * n]
    }

    /// Rows in sender order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks_exact(self.world.as_usize())
    }

    /// `(sender, receiver, bytes)` for every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Rank, Rank, f64)> + '_ {
        let n = self.world.as_usize();
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &b)| (Rank((i / n) as u32), Rank((i % n) as u32), b))
    }

    pub fn row_sum(&self, sender: Rank) -> f64 {
        self.row(sender).iter().sum()
    }

    pub fn col_sum(&self, receiver: Rank) -> f64 {
        self.rows().map(|row| row[receiver.index()]).sum()
    }

    /// Total bytes moved.
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Largest single cell, or 0 for an all-zero matrix.
    pub fn max(&self) -> f64 {
        self.cells.iter().copied().fold(0.0, f64::max)
    }

    /// `true` if `m[a][b] == m[b][a]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        self.cells()
            .all(|(src, dst, bytes)| self.get(dst, src) == bytes)
    }
}

/// Swing volume matrix for one `(world, vector, variant)` triple.
pub fn build_volume_matrix(world: WorldSize, vector: VectorSize, variant: Variant) -> VolumeMatrix {
    build_volume_matrix_with(&Swing, world, vector, variant)
}

/// Volume matrix for any partner scheme.
pub fn build_volume_matrix_with<S: PartnerScheme + ?Sized>(
    scheme:  &S,
    world:   WorldSize,
    vector:  VectorSize,
    variant: Variant,
) -> VolumeMatrix {
    let steps = build_schedule(scheme, world, vector, variant);
    let matrix = VolumeMatrix::from_schedule(world, &steps);
    debug!(
        scheme = scheme.name(),
        world_size = world.get(),
        %variant,
        total_bytes = matrix.total(),
        "volume matrix built"
    );
    matrix
}

/// Validate raw inputs, then build the Swing volume matrix.
///
/// Rejects `world_size < 1`, `vector_size_bytes < 0`, and unknown variant
/// names before any accumulation happens.
pub fn volume_matrix_from_raw(
    world_size:        i64,
    vector_size_bytes: i64,
    variant:           &str,
) -> CsResult<VolumeMatrix> {
    let world   = WorldSize::new(world_size)?;
    let vector  = VectorSize::new(vector_size_bytes)?;
    let variant = variant.parse::<Variant>()?;
    Ok(build_volume_matrix(world, vector, variant))
}
