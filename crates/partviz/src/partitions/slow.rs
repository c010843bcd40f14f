//! # Slow Partitioner

use crate::{
    config::PartitionConfig,
    errors::PVResult,
    grid::SENTINEL,
    partitions::{PartitionLayout, PartitionProvider, round_up, tail_source},
};

/// Builds every partitioning stage as explicit nested sequences.
///
/// Useful as a cross-check of [`FastPartitioner`](crate::partitions::FastPartitioner);
/// it allocates each intermediate stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct SlowPartitioner;

impl PartitionProvider for SlowPartitioner {
    fn partition(
        &self,
        config: &PartitionConfig,
    ) -> PVResult<Vec<i64>> {
        let layout = PartitionLayout::new(config)?;
        let config = &layout.config;

        let rows = canonical_rows(&layout);
        let stream = slot_major(&rows, layout.row_len());
        let stream = &stream[layout.offset..];

        let nodes = deal(stream, config.physical_nodes);

        let round = config.device_workers * config.device_batch_size;
        let mut ids = Vec::with_capacity(layout.flat_len());
        for mut node in nodes {
            let node_len = round_up(node.len(), config.node_devices);
            extend_with_tail(&mut node, node_len);

            for mut device in deal(&node, config.node_devices) {
                device.resize(round_up(device.len(), round), SENTINEL);

                for worker in split_workers(&device, config.device_workers, config.device_batch_size)
                {
                    ids.extend(worker.into_iter().flatten());
                }
            }
        }

        Ok(ids)
    }
}

/// One padded row of sample ids per canonical node.
fn canonical_rows(layout: &PartitionLayout) -> Vec<Vec<i64>> {
    (0..layout.config.canonical_nodes)
        .map(|row| {
            let (start, stop) = layout.row_bounds(row);
            let mut ids: Vec<i64> = if start == stop {
                vec![SENTINEL; layout.row_samples]
            } else {
                (start..start + layout.row_samples)
                    .map(|id| id as i64)
                    .collect()
            };

            if start < stop
                && stop - start < layout.row_samples
                && let Some(last) = ids.last_mut()
            {
                *last -= 1;
            }

            extend_with_tail(&mut ids, layout.row_len());
            ids
        })
        .collect()
}

/// Pads `ids` to `len` by repeating its tail.
fn extend_with_tail(
    ids: &mut Vec<i64>,
    len: usize,
) {
    let base = ids.len();
    let extra = len - base;
    for k in 0..extra {
        let id = ids[tail_source(base, extra, k)];
        ids.push(id);
    }
}

/// Reads equal-length rows slot by slot.
fn slot_major(
    rows: &[Vec<i64>],
    row_len: usize,
) -> Vec<i64> {
    let mut ids = Vec::with_capacity(rows.len() * row_len);
    for slot in 0..row_len {
        ids.extend(rows.iter().map(|row| row[slot]));
    }
    ids
}

/// Deals `ids` round-robin into `parts` sequences.
fn deal(
    ids: &[i64],
    parts: usize,
) -> Vec<Vec<i64>> {
    let mut out = vec![Vec::with_capacity(ids.len() / parts); parts];
    for (pos, &id) in ids.iter().enumerate() {
        out[pos % parts].push(id);
    }
    out
}

/// Hands consecutive batches of `ids` to `workers` in turn.
///
/// Returns `[worker][batch][slot]`.
fn split_workers(
    ids: &[i64],
    workers: usize,
    batch_size: usize,
) -> Vec<Vec<Vec<i64>>> {
    let mut out = vec![Vec::new(); workers];
    for (batch_idx, batch) in ids.chunks(batch_size).enumerate() {
        out[batch_idx % workers].push(batch.to_vec());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal() {
        assert_eq!(
            deal(&[0, 1, 2, 3, 4, 5], 2),
            vec![vec![0, 2, 4], vec![1, 3, 5]]
        );
    }

    #[test]
    fn test_extend_with_tail() {
        let mut ids = vec![0, 1, 2, 3, 4, 5];
        extend_with_tail(&mut ids, 8);
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5, 4, 5]);

        let mut ids = vec![7];
        extend_with_tail(&mut ids, 3);
        assert_eq!(ids, vec![7, 7, 7]);
    }

    #[test]
    fn test_node_padding() {
        let config = PartitionConfig::default()
            .with_dataset_size(6)
            .with_canonical_nodes(1)
            .with_physical_nodes(1)
            .with_node_devices(4)
            .with_device_workers(1)
            .with_device_batch_size(2);
        assert_eq!(
            SlowPartitioner.partition(&config).unwrap(),
            vec![0, 4, 1, 5, 2, 4, 3, 5]
        );
    }

    #[test]
    fn test_empty_rows_are_padding() {
        let config = PartitionConfig::default()
            .with_dataset_size(4)
            .with_canonical_nodes(6)
            .with_physical_nodes(1)
            .with_node_devices(1)
            .with_device_workers(1)
            .with_device_batch_size(6);
        let layout = PartitionLayout::new(&config).unwrap();
        assert_eq!(
            canonical_rows(&layout),
            vec![
                vec![SENTINEL],
                vec![0],
                vec![1],
                vec![SENTINEL],
                vec![2],
                vec![3]
            ]
        );
    }

    #[test]
    fn test_split_workers() {
        let ids: Vec<i64> = (0..8).collect();
        assert_eq!(
            split_workers(&ids, 2, 2),
            vec![vec![vec![0, 1], vec![4, 5]], vec![vec![2, 3], vec![6, 7]]]
        );
    }
}
