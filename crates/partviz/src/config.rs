//! # Partition Configuration
//!
//! [`PartitionConfig`] carries every knob of a partitioning run:
//! the dataset size, the execution hierarchy, and the selected
//! [`PartitionAlgorithm`].

use crate::{
    errors::{PVResult, PartvizError},
    partitions::PartitionAlgorithm,
};

/// Default dataset size.
pub const DEFAULT_DATASET_SIZE: usize = 678;
/// Default per-device batch size.
pub const DEFAULT_DEVICE_BATCH_SIZE: usize = 7;
/// Default canonical node count.
pub const DEFAULT_CANONICAL_NODES: usize = 6;
/// Default physical node count.
pub const DEFAULT_PHYSICAL_NODES: usize = 3;
/// Default devices per node.
pub const DEFAULT_NODE_DEVICES: usize = 4;
/// Default workers per device.
pub const DEFAULT_DEVICE_WORKERS: usize = 5;

/// Options for a partitioning run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartitionConfig {
    /// Which partition provider to run.
    pub algorithm: PartitionAlgorithm,

    /// Number of samples in the dataset.
    pub dataset_size: usize,

    /// Samples per batch, per device.
    pub device_batch_size: usize,

    /// Number of samples already seen this epoch.
    pub offset_in_epoch: usize,

    /// Logical node count the assignment is based on.
    pub canonical_nodes: usize,

    /// Physical node count.
    pub physical_nodes: usize,

    /// Devices per physical node.
    pub node_devices: usize,

    /// Dataloader workers per device.
    pub device_workers: usize,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            algorithm: PartitionAlgorithm::default(),
            dataset_size: DEFAULT_DATASET_SIZE,
            device_batch_size: DEFAULT_DEVICE_BATCH_SIZE,
            offset_in_epoch: 0,
            canonical_nodes: DEFAULT_CANONICAL_NODES,
            physical_nodes: DEFAULT_PHYSICAL_NODES,
            node_devices: DEFAULT_NODE_DEVICES,
            device_workers: DEFAULT_DEVICE_WORKERS,
        }
    }
}

impl PartitionConfig {
    /// Set the algorithm.
    pub fn with_algorithm(
        mut self,
        algorithm: PartitionAlgorithm,
    ) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the dataset size.
    pub fn with_dataset_size(
        mut self,
        dataset_size: usize,
    ) -> Self {
        self.dataset_size = dataset_size;
        self
    }

    /// Set the per-device batch size.
    pub fn with_device_batch_size(
        mut self,
        device_batch_size: usize,
    ) -> Self {
        self.device_batch_size = device_batch_size;
        self
    }

    /// Set the offset in epoch.
    pub fn with_offset_in_epoch(
        mut self,
        offset_in_epoch: usize,
    ) -> Self {
        self.offset_in_epoch = offset_in_epoch;
        self
    }

    /// Set the canonical node count.
    pub fn with_canonical_nodes(
        mut self,
        canonical_nodes: usize,
    ) -> Self {
        self.canonical_nodes = canonical_nodes;
        self
    }

    /// Set the physical node count.
    pub fn with_physical_nodes(
        mut self,
        physical_nodes: usize,
    ) -> Self {
        self.physical_nodes = physical_nodes;
        self
    }

    /// Set the devices per node.
    pub fn with_node_devices(
        mut self,
        node_devices: usize,
    ) -> Self {
        self.node_devices = node_devices;
        self
    }

    /// Set the workers per device.
    pub fn with_device_workers(
        mut self,
        device_workers: usize,
    ) -> Self {
        self.device_workers = device_workers;
        self
    }

    /// The number of ids in one batch layer of the grid.
    ///
    /// `physical_nodes * node_devices * device_workers * device_batch_size`.
    pub fn stride(&self) -> usize {
        self.physical_nodes * self.node_devices * self.device_workers * self.device_batch_size
    }

    /// The epoch offset, rounded down to a multiple of `physical_nodes`.
    ///
    /// Unaligned when `physical_nodes` is zero.
    pub fn aligned_offset(&self) -> usize {
        let excess = self
            .offset_in_epoch
            .checked_rem(self.physical_nodes)
            .unwrap_or(0);
        self.offset_in_epoch - excess
    }

    /// Validates the configuration.
    ///
    /// Every hierarchy size must be non-zero; and the canonical and physical
    /// node counts must divide one another.
    pub fn validate(&self) -> PVResult<()> {
        for (field, value) in [
            ("canonical_nodes", self.canonical_nodes),
            ("physical_nodes", self.physical_nodes),
            ("node_devices", self.node_devices),
            ("device_workers", self.device_workers),
            ("device_batch_size", self.device_batch_size),
        ] {
            check_positive(field, value)?;
        }

        let (canonical, physical) = (self.canonical_nodes, self.physical_nodes);
        if canonical % physical != 0 && physical % canonical != 0 {
            return Err(PartvizError::NodeRatio {
                canonical,
                physical,
            });
        }

        Ok(())
    }

    /// Validates and returns the configuration.
    pub fn validated(self) -> PVResult<Self> {
        self.validate()?;
        Ok(self)
    }
}

/// Validates that a hierarchy size is non-zero.
pub fn check_positive(
    field: &'static str,
    value: usize,
) -> PVResult<usize> {
    if value == 0 {
        Err(PartvizError::InvalidConfig {
            field,
            reason: "must be >= 1".to_string(),
        })
    } else {
        Ok(value)
    }
}
