//! # Partition Layout
//!
//! The sizes shared by every partitioning stage, and the canonical
//! sample assignment both providers start from.
//!
//! The scheme:
//! 1. The dataset is cut into one contiguous row per canonical node. When
//!    there are more physical than canonical nodes, rows are padded (by
//!    repeating their tail) to a multiple of the node ratio.
//! 2. The rows are read slot-major, the first `offset` ids are dropped, and
//!    the rest are dealt round-robin across physical nodes.
//! 3. Each node's ids are padded (tail repeat) to a multiple of the device
//!    count and dealt round-robin across devices.
//! 4. Each device's ids are padded with [`SENTINEL`] to a whole number of
//!    worker batch rounds; workers take turns filling consecutive batches.

use crate::{config::PartitionConfig, errors::PVResult, grid::SENTINEL};

/// Source slot for extending a sequence of `len` ids by `extra` ids.
///
/// The extension repeats the tail of the sequence; sequences shorter
/// than the extension are cycled from the start.
pub fn tail_source(
    len: usize,
    extra: usize,
    k: usize,
) -> usize {
    if len >= extra {
        len - extra + k
    } else {
        k % len
    }
}

/// Rounds `value` up to a multiple of `step`.
pub fn round_up(
    value: usize,
    step: usize,
) -> usize {
    value.div_ceil(step) * step
}

/// Sizes of every partitioning stage for one [`PartitionConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartitionLayout {
    /// The validated configuration.
    pub config: PartitionConfig,

    /// Unpadded samples per canonical row.
    pub row_samples: usize,

    /// Tail padding appended to every canonical row.
    pub row_padding: usize,

    /// Ids skipped at the start of the slot-major stream.
    pub offset: usize,

    /// Ids dealt to each physical node.
    pub node_len: usize,

    /// `node_len` rounded up to a multiple of the device count.
    pub padded_node_len: usize,

    /// Ids dealt to each device.
    pub device_len: usize,

    /// `device_len` rounded up to a whole number of worker batch rounds.
    pub padded_device_len: usize,
}

impl PartitionLayout {
    /// Validate `config` and compute its layout.
    pub fn new(config: &PartitionConfig) -> PVResult<Self> {
        let config = config.validated()?;

        let canonical = config.canonical_nodes;
        let physical = config.physical_nodes;

        let row_samples = config.dataset_size.div_ceil(canonical);
        let row_padding = if canonical < physical {
            let ratio = physical / canonical;
            (ratio - row_samples % ratio) % ratio
        } else {
            0
        };

        let total = canonical * (row_samples + row_padding);

        if config.aligned_offset() != config.offset_in_epoch {
            log::warn!(
                "offset_in_epoch ({}) is not a multiple of physical_nodes ({}); rounding down to {}",
                config.offset_in_epoch,
                physical,
                config.aligned_offset(),
            );
        }
        let offset = config.aligned_offset().min(total);

        let node_len = (total - offset) / physical;
        let padded_node_len = round_up(node_len, config.node_devices);
        let device_len = padded_node_len / config.node_devices;
        let padded_device_len = round_up(
            device_len,
            config.device_workers * config.device_batch_size,
        );

        Ok(Self {
            config,
            row_samples,
            row_padding,
            offset,
            node_len,
            padded_node_len,
            device_len,
            padded_device_len,
        })
    }

    /// Length of a padded canonical row.
    pub fn row_len(&self) -> usize {
        self.row_samples + self.row_padding
    }

    /// Batches each worker receives.
    pub fn batches_per_worker(&self) -> usize {
        self.padded_device_len / (self.config.device_workers * self.config.device_batch_size)
    }

    /// Total length of the flat partition sequence.
    pub fn flat_len(&self) -> usize {
        self.config.stride() * self.batches_per_worker()
    }

    /// First and one-past-last sample of canonical row `row`.
    pub fn row_bounds(
        &self,
        row: usize,
    ) -> (usize, usize) {
        let n = self.config.dataset_size;
        let c = self.config.canonical_nodes;
        (row * n / c, (row + 1) * n / c)
    }

    /// Whether canonical row `row` holds fewer than `row_samples` samples.
    pub fn is_short_row(
        &self,
        row: usize,
    ) -> bool {
        let (start, stop) = self.row_bounds(row);
        stop - start < self.row_samples
    }

    /// The id held by canonical row `row` at `slot`.
    ///
    /// Short rows repeat their second-to-last sample in the last slot;
    /// padding slots repeat the tail of the row. Empty rows (more canonical
    /// nodes than samples) hold only [`SENTINEL`].
    pub fn canonical_id(
        &self,
        row: usize,
        slot: usize,
    ) -> i64 {
        if slot >= self.row_samples {
            let k = slot - self.row_samples;
            return self.canonical_id(row, tail_source(self.row_samples, self.row_padding, k));
        }

        let (start, stop) = self.row_bounds(row);
        if start == stop {
            return SENTINEL;
        }
        let id = (start + slot) as i64;
        if slot + 1 == self.row_samples && self.is_short_row(row) {
            id - 1
        } else {
            id
        }
    }

    /// The id at position `pos` of the slot-major canonical stream,
    /// after the offset is dropped.
    pub fn stream_id(
        &self,
        pos: usize,
    ) -> i64 {
        let flat = self.offset + pos;
        let canonical = self.config.canonical_nodes;
        self.canonical_id(flat % canonical, flat / canonical)
    }

    /// The id at position `pos` of the (padded) sequence of physical node `node`.
    pub fn node_id(
        &self,
        node: usize,
        pos: usize,
    ) -> i64 {
        let pos = if pos >= self.node_len {
            tail_source(
                self.node_len,
                self.padded_node_len - self.node_len,
                pos - self.node_len,
            )
        } else {
            pos
        };
        self.stream_id(pos * self.config.physical_nodes + node)
    }

    /// The id at position `pos` of the (padded) sequence of `device` on `node`.
    pub fn device_id(
        &self,
        node: usize,
        device: usize,
        pos: usize,
    ) -> i64 {
        if pos >= self.device_len {
            SENTINEL
        } else {
            self.node_id(node, pos * self.config.node_devices + device)
        }
    }
}
