//! # Partition Grid
//!
//! [`PartitionGrid`] views a flat partition sequence as a 5-D grid
//! addressed by `(node, device, worker, batch, slot)`.
//!
//! The view is a pure row-major reshape: `grid[n][d][w][b][s]` is flat
//! position `((((n * devices + d) * workers + w) * batches + b) * batch_size + s)`.

use core::ops::Range;

use crate::{
    config::check_positive,
    errors::{PVResult, PartvizError},
};

/// Marks a grid slot with no sample assigned.
pub const SENTINEL: i64 = -1;

/// Is `id` a real sample id (and not padding)?
pub fn is_sample(id: i64) -> bool {
    id >= 0
}

/// A coordinate in a [`PartitionGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCoord {
    /// Physical node index.
    pub node: usize,

    /// Device index within the node.
    pub device: usize,

    /// Worker index within the device.
    pub worker: usize,

    /// Batch index within the worker.
    pub batch: usize,

    /// Sample slot within the batch.
    pub slot: usize,
}

/// Dimensions of a [`PartitionGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    /// Physical nodes.
    pub nodes: usize,

    /// Devices per node.
    pub devices: usize,

    /// Workers per device.
    pub workers: usize,

    /// Batches per worker.
    pub batches: usize,

    /// Samples per batch.
    pub batch_size: usize,
}

impl GridShape {
    /// The dimensions, outermost first.
    pub fn dims(&self) -> [usize; 5] {
        [
            self.nodes,
            self.devices,
            self.workers,
            self.batches,
            self.batch_size,
        ]
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.dims().iter().product()
    }

    /// Does the grid have no cells?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells per node.
    pub fn node_len(&self) -> usize {
        self.devices * self.device_len()
    }

    /// Cells per device.
    pub fn device_len(&self) -> usize {
        self.workers * self.worker_len()
    }

    /// Cells per worker.
    pub fn worker_len(&self) -> usize {
        self.batches * self.batch_size
    }

    /// Does `coord` lie inside the grid?
    pub fn contains(
        &self,
        coord: &GridCoord,
    ) -> bool {
        coord.node < self.nodes
            && coord.device < self.devices
            && coord.worker < self.workers
            && coord.batch < self.batches
            && coord.slot < self.batch_size
    }

    /// Row-major flat position of `coord`.
    pub fn flat_index(
        &self,
        coord: &GridCoord,
    ) -> usize {
        let mut idx = coord.node;
        idx = idx * self.devices + coord.device;
        idx = idx * self.workers + coord.worker;
        idx = idx * self.batches + coord.batch;
        idx * self.batch_size + coord.slot
    }

    /// Inverse of [`GridShape::flat_index`].
    ///
    /// Panics on an empty shape.
    pub fn unravel(
        &self,
        mut idx: usize,
    ) -> GridCoord {
        let slot = idx % self.batch_size;
        idx /= self.batch_size;
        let batch = idx % self.batches;
        idx /= self.batches;
        let worker = idx % self.workers;
        idx /= self.workers;
        let device = idx % self.devices;
        GridCoord {
            node: idx / self.devices,
            device,
            worker,
            batch,
            slot,
        }
    }
}

/// A flat partition sequence viewed as a 5-D grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionGrid {
    ids: Vec<i64>,
    shape: GridShape,
}

impl PartitionGrid {
    /// Reshape a flat sequence onto the execution hierarchy.
    ///
    /// The batch count is inferred as `ids.len() / stride`, where
    /// `stride = nodes * devices * workers * batch_size`.
    ///
    /// # Errors
    /// * [`PartvizError::InvalidConfig`] if any dimension is zero.
    /// * [`PartvizError::ShapeMismatch`] if `ids.len()` is not a multiple of the stride.
    pub fn reshape(
        ids: Vec<i64>,
        nodes: usize,
        devices: usize,
        workers: usize,
        batch_size: usize,
    ) -> PVResult<Self> {
        let stride = check_positive("physical_nodes", nodes)?
            * check_positive("node_devices", devices)?
            * check_positive("device_workers", workers)?
            * check_positive("device_batch_size", batch_size)?;

        if ids.len() % stride != 0 {
            return Err(PartvizError::ShapeMismatch {
                len: ids.len(),
                stride,
            });
        }

        let shape = GridShape {
            nodes,
            devices,
            workers,
            batches: ids.len() / stride,
            batch_size,
        };
        Ok(Self { ids, shape })
    }

    /// The grid dimensions.
    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    /// The cell at `coord`, if it lies inside the grid.
    pub fn get(
        &self,
        coord: &GridCoord,
    ) -> Option<i64> {
        if self.shape.contains(coord) {
            Some(self.ids[self.shape.flat_index(coord)])
        } else {
            None
        }
    }

    /// Flatten back into the original sequence.
    pub fn into_flat(self) -> Vec<i64> {
        self.ids
    }

    /// The largest sample id in the grid, ignoring padding.
    pub fn max_sample(&self) -> Option<i64> {
        self.ids.iter().copied().filter(|&id| is_sample(id)).max()
    }

    /// Number of padding cells.
    pub fn padding_count(&self) -> usize {
        self.ids.iter().filter(|&&id| !is_sample(id)).count()
    }

    /// Iterate over the nodes.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeView<'_>> {
        let shape = &self.shape;
        sections(&self.ids, shape.nodes, shape.node_len()).map(move |ids| NodeView { shape, ids })
    }
}

/// Splits `ids` into `count` consecutive sections of `len` cells.
fn sections(
    ids: &[i64],
    count: usize,
    len: usize,
) -> impl ExactSizeIterator<Item = &[i64]> {
    (0..count).map(move |idx| &ids[span(idx, len)])
}

fn span(
    idx: usize,
    len: usize,
) -> Range<usize> {
    idx * len..(idx + 1) * len
}

/// One node of a [`PartitionGrid`].
#[derive(Clone, Copy, Debug)]
pub struct NodeView<'a> {
    shape: &'a GridShape,
    ids: &'a [i64],
}

impl<'a> NodeView<'a> {
    /// Iterate over the node's devices.
    pub fn devices(&self) -> impl ExactSizeIterator<Item = DeviceView<'a>> + use<'a> {
        let shape = self.shape;
        sections(self.ids, shape.devices, shape.device_len())
            .map(move |ids| DeviceView { shape, ids })
    }
}

/// One device of a [`PartitionGrid`].
#[derive(Clone, Copy, Debug)]
pub struct DeviceView<'a> {
    shape: &'a GridShape,
    ids: &'a [i64],
}

impl<'a> DeviceView<'a> {
    /// Iterate over the device's workers.
    pub fn workers(&self) -> impl ExactSizeIterator<Item = WorkerView<'a>> + use<'a> {
        let shape = self.shape;
        sections(self.ids, shape.workers, shape.worker_len())
            .map(move |ids| WorkerView { shape, ids })
    }
}

/// One worker of a [`PartitionGrid`].
#[derive(Clone, Copy, Debug)]
pub struct WorkerView<'a> {
    shape: &'a GridShape,
    ids: &'a [i64],
}

impl<'a> WorkerView<'a> {
    /// Iterate over the worker's batches.
    pub fn batches(&self) -> impl ExactSizeIterator<Item = &'a [i64]> + use<'a> {
        sections(self.ids, self.shape.batches, self.shape.batch_size)
    }
}
