#![allow(missing_docs)]

use partviz::{
    GridCoord,
    PartitionAlgorithm,
    PartitionConfig,
    PartitionGrid,
    PartitionRenderer,
    PartvizError,
    SENTINEL,
    partition_grid,
    show_partitions,
};

fn render(grid: &PartitionGrid) -> String {
    PartitionRenderer::for_grid(grid)
        .render_to_string(grid)
        .unwrap()
}

#[test]
fn two_batches_on_one_worker() {
    let ids: Vec<i64> = (0..8).collect();
    let grid = PartitionGrid::reshape(ids.clone(), 1, 1, 1, 4).unwrap();

    assert_eq!(grid.shape().dims(), [1, 1, 1, 2, 4]);
    let coord = GridCoord {
        node: 0,
        device: 0,
        worker: 0,
        batch: 1,
        slot: 0,
    };
    assert_eq!(grid.get(&coord), Some(4));

    let text = render(&grid);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["Node 0", "    Dev 0", "            0 1 2 3  4 5 6 7"]);

    assert_eq!(grid.into_flat(), ids);
}

#[test]
fn padding_renders_as_dash() {
    let grid = PartitionGrid::reshape(vec![0, 1, 2, SENTINEL], 1, 1, 1, 4).unwrap();
    let text = render(&grid);
    assert_eq!(text.lines().last(), Some("            0 1 2 -"));
}

#[test]
fn malformed_sequence_is_rejected() {
    match PartitionGrid::reshape(vec![0; 7], 1, 1, 1, 4) {
        Err(PartvizError::ShapeMismatch { len, stride }) => {
            assert_eq!((len, stride), (7, 4));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn default_run() {
    let config = PartitionConfig::default();
    let mut out = Vec::new();
    show_partitions(&config, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let (p, d, w) = (3, 4, 5);
    assert_eq!(text.lines().count(), p + p * d + p * d * w);
    assert_eq!(text.lines().filter(|l| l.starts_with("Node ")).count(), p);
    assert_eq!(text.lines().filter(|l| l.starts_with("    Dev ")).count(), p * d);

    // 2 batches of 7 three-digit cells per worker line.
    let worker_line = text.lines().nth(2).unwrap();
    assert_eq!(worker_line.len(), 12 + 2 * (7 * 3 + 6) + 2);
}

#[test]
fn algorithms_render_identically() {
    let config = PartitionConfig::default()
        .with_dataset_size(1000)
        .with_canonical_nodes(2)
        .with_physical_nodes(4)
        .with_node_devices(2)
        .with_device_workers(3)
        .with_device_batch_size(5)
        .with_offset_in_epoch(13);

    let fast = partition_grid(&config.with_algorithm(PartitionAlgorithm::Fast)).unwrap();
    let slow = partition_grid(&config.with_algorithm(PartitionAlgorithm::Slow)).unwrap();
    assert_eq!(fast, slow);
    assert_eq!(render(&fast), render(&slow));
}

#[test]
fn unknown_algorithm() {
    assert!(matches!(
        PartitionAlgorithm::from_key("quick"),
        Err(PartvizError::UnknownAlgorithm(_))
    ));
}
