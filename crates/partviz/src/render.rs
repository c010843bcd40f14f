//! # Partition Renderer
//!
//! Writes a [`PartitionGrid`] as indented text:
//!
//! ```text
//! Node 0
//!     Dev 0
//!             0 1 2 3  4 5 6 7
//! ```
//!
//! One line per worker; samples within a batch are joined by one space,
//! batches by two. All cells share one right-justified width.

use std::io::Write;

use crate::{
    errors::PVResult,
    grid::{PartitionGrid, WorkerView, is_sample},
};

/// Indent before a device header.
pub const DEVICE_INDENT: &str = "    ";
/// Indent before a worker line.
pub const WORKER_INDENT: &str = "            ";
/// Separator between samples of one batch.
pub const SAMPLE_SEPARATOR: &str = " ";
/// Separator between batches of one worker.
pub const BATCH_SEPARATOR: &str = "  ";
/// Placeholder printed for padding cells.
pub const PADDING_CELL: &str = "-";

/// Number of decimal digits needed to print `max`.
///
/// `None` (no sample ids at all) and `Some(0)` both yield 1.
pub fn decimal_width(max: Option<i64>) -> usize {
    match max {
        Some(max) if max > 0 => max.ilog10() as usize + 1,
        _ => 1,
    }
}

/// The shared cell width for `grid`.
pub fn cell_width(grid: &PartitionGrid) -> usize {
    decimal_width(grid.max_sample())
}

/// Renders a [`PartitionGrid`] with a fixed cell width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionRenderer {
    width: usize,
}

impl PartitionRenderer {
    /// A renderer with an explicit cell width.
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }

    /// A renderer sized to the largest sample in `grid`.
    pub fn for_grid(grid: &PartitionGrid) -> Self {
        Self::new(cell_width(grid))
    }

    /// The cell width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Format one cell, right-justified.
    pub fn format_cell(
        &self,
        id: i64,
    ) -> String {
        let width = self.width;
        if is_sample(id) {
            format!("{id:>width$}")
        } else {
            format!("{PADDING_CELL:>width$}")
        }
    }

    /// Format one worker's batches as a single line (without indent).
    pub fn format_worker(
        &self,
        worker: &WorkerView<'_>,
    ) -> String {
        worker
            .batches()
            .map(|batch| {
                batch
                    .iter()
                    .map(|&id| self.format_cell(id))
                    .collect::<Vec<_>>()
                    .join(SAMPLE_SEPARATOR)
            })
            .collect::<Vec<_>>()
            .join(BATCH_SEPARATOR)
    }

    /// Write `grid` to `writer`.
    pub fn render(
        &self,
        grid: &PartitionGrid,
        writer: &mut dyn Write,
    ) -> PVResult<()> {
        for (node_idx, node) in grid.nodes().enumerate() {
            writeln!(writer, "Node {node_idx}")?;
            for (device_idx, device) in node.devices().enumerate() {
                writeln!(writer, "{DEVICE_INDENT}Dev {device_idx}")?;
                for worker in device.workers() {
                    writeln!(writer, "{WORKER_INDENT}{}", self.format_worker(&worker))?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }

    /// Render `grid` into a string.
    pub fn render_to_string(
        &self,
        grid: &PartitionGrid,
    ) -> PVResult<String> {
        let mut buf = Vec::new();
        self.render(grid, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
