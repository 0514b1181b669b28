//! swing_heatmap — sender × receiver traffic for Swing allreduce.
//!
//! Builds the communication-volume matrix for both the bandwidth-optimal and
//! latency-optimal variants and prints each as a text grid.  A recursive
//! doubling matrix over the same inputs is summarised for comparison.

use std::path::Path;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cs_core::{HumanBytes, Rank, Variant, VectorSize, WorldSize};
use cs_output::{CsvWriter, OutputWriter, write_volume_matrix};
use cs_swing::{RecursiveDoubling, VolumeMatrix, build_volume_matrix, build_volume_matrix_with, round_count};

// ── Constants ─────────────────────────────────────────────────────────────────

const NUM_PROCS:    i64   = 16;
const VECTOR_BYTES: i64   = 14_400;
const OUTPUT_DIR:   &str  = "output/swing_heatmap";
const CELL_WIDTH:   usize = 6;

// ── Grid rendering ────────────────────────────────────────────────────────────

fn print_grid(title: &str, matrix: &VolumeMatrix) {
    let world = matrix.world_size();
    println!("{title}");
    print!("{:>5}", "");
    for dst in world.ranks() {
        print!("{:>w$}", dst.to_string(), w = CELL_WIDTH);
    }
    println!("{:>10}", "Sent");

    for src in world.ranks() {
        print!("{:>5}", src.to_string());
        for &bytes in matrix.row(src) {
            let cell = if bytes == 0.0 { ".".to_owned() } else { HumanBytes(bytes as u64).to_string() };
            print!("{cell:>w$}", w = CELL_WIDTH);
        }
        println!("{:>10}", HumanBytes(matrix.row_sum(src) as u64).to_string());
    }
    println!();
}

fn write_matrix(dir: &Path, matrix: &VolumeMatrix) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut writer = CsvWriter::volume(dir)?;
    write_volume_matrix(&mut writer, matrix)?;
    writer.finish()?;
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let world  = WorldSize::new(NUM_PROCS)?;
    let vector = VectorSize::new(VECTOR_BYTES)?;

    println!("=== swing_heatmap — Swing communication volume ===");
    println!(
        "Processes: {}  |  Vector: {}  |  Rounds: {}",
        world,
        HumanBytes(vector.bytes()),
        round_count(world),
    );
    println!();

    for variant in Variant::ALL {
        let matrix = build_volume_matrix(world, vector, variant);
        print_grid(&format!("Swing {} (bytes sent, row → column)", variant.label()), &matrix);

        let rd = build_volume_matrix_with(&RecursiveDoubling, world, vector, variant);
        println!(
            "  total: Swing {}  |  recursive doubling {}  |  busiest link: {} vs {}",
            HumanBytes(matrix.total() as u64),
            HumanBytes(rd.total() as u64),
            HumanBytes(matrix.max() as u64),
            HumanBytes(rd.max() as u64),
        );
        println!(
            "  P0 sends {} and receives {}",
            HumanBytes(matrix.row_sum(Rank(0)) as u64),
            HumanBytes(matrix.col_sum(Rank(0)) as u64),
        );
        println!();

        let dir = Path::new(OUTPUT_DIR).join(variant.as_str());
        write_matrix(&dir, &matrix)?;
        info!(%variant, dir = %dir.display(), cells = world.as_usize().pow(2), "volume matrix written");
    }

    Ok(())
}
