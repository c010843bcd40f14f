//! # Fast Partitioner

use crate::{
    config::PartitionConfig,
    errors::PVResult,
    grid::GridShape,
    partitions::{PartitionLayout, PartitionProvider},
};

/// Computes every output id directly from its grid coordinate.
///
/// No intermediate stage is materialized; each cell walks the stages
/// backwards through [`PartitionLayout::device_id`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FastPartitioner;

impl PartitionProvider for FastPartitioner {
    fn partition(
        &self,
        config: &PartitionConfig,
    ) -> PVResult<Vec<i64>> {
        let layout = PartitionLayout::new(config)?;
        let config = &layout.config;

        let shape = GridShape {
            nodes: config.physical_nodes,
            devices: config.node_devices,
            workers: config.device_workers,
            batches: layout.batches_per_worker(),
            batch_size: config.device_batch_size,
        };

        Ok((0..shape.len())
            .map(|idx| {
                let coord = shape.unravel(idx);
                let pos = (coord.batch * shape.workers + coord.worker) * shape.batch_size + coord.slot;
                layout.device_id(coord.node, coord.device, pos)
            })
            .collect())
    }
}
