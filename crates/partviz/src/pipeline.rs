//! # Partition Pipeline
//!
//! Provider, then reshape, then render.

use std::io::Write;

use crate::{
    config::PartitionConfig,
    errors::PVResult,
    grid::PartitionGrid,
    render::PartitionRenderer,
};

/// Run the configured provider and reshape its output.
pub fn partition_grid(config: &PartitionConfig) -> PVResult<PartitionGrid> {
    config.validate()?;

    log::info!(
        "Partitioning {} samples with the {} algorithm",
        config.dataset_size,
        config.algorithm
    );
    let ids = config.algorithm.partition(config)?;

    let grid = PartitionGrid::reshape(
        ids,
        config.physical_nodes,
        config.node_devices,
        config.device_workers,
        config.device_batch_size,
    )?;
    log::debug!(
        "Grid shape: {:?}; {} padding cells",
        grid.shape().dims(),
        grid.padding_count()
    );

    Ok(grid)
}

/// Partition, reshape, and render to `writer`.
pub fn show_partitions(
    config: &PartitionConfig,
    writer: &mut dyn Write,
) -> PVResult<()> {
    let grid = partition_grid(config)?;

    if grid.max_sample().is_none() {
        log::warn!("The grid holds no sample ids; rendering with a cell width of 1");
    }

    let renderer = PartitionRenderer::for_grid(&grid);
    log::debug!("Cell width: {}", renderer.width());
    renderer.render(&grid, writer)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::partitions::PartitionAlgorithm;

    /// Collects warnings from every test thread.
    struct WarningLog {
        messages: Mutex<Vec<String>>,
    }

    impl log::Log for WarningLog {
        fn enabled(
            &self,
            metadata: &log::Metadata,
        ) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(
            &self,
            record: &log::Record,
        ) {
            if self.enabled(record.metadata()) {
                self.messages.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static WARNINGS: WarningLog = WarningLog {
        messages: Mutex::new(Vec::new()),
    };

    #[test]
    fn test_default_grid() {
        let grid = partition_grid(&PartitionConfig::default()).unwrap();
        assert_eq!(grid.shape().dims(), [3, 4, 5, 2, 7]);
        assert_eq!(grid.max_sample(), Some(677));
    }

    #[test]
    fn test_show_partitions() {
        let config = PartitionConfig::default()
            .with_algorithm(PartitionAlgorithm::Slow)
            .with_dataset_size(8)
            .with_canonical_nodes(1)
            .with_physical_nodes(1)
            .with_node_devices(1)
            .with_device_workers(1)
            .with_device_batch_size(4);

        let mut buf = Vec::new();
        show_partitions(&config, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Node 0\n    Dev 0\n            0 1 2 3  4 5 6 7\n"
        );
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config = PartitionConfig::default().with_physical_nodes(4);
        let mut buf = Vec::new();
        assert!(show_partitions(&config, &mut buf).is_err());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_all_padding_warns() {
        let _ = log::set_logger(&WARNINGS);
        log::set_max_level(log::LevelFilter::Warn);

        let empty = PartitionConfig::default()
            .with_dataset_size(0)
            .with_canonical_nodes(2)
            .with_physical_nodes(2)
            .with_node_devices(1)
            .with_device_workers(1)
            .with_device_batch_size(1);
        let mut buf = Vec::new();
        show_partitions(&empty, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Node 0\n    Dev 0\n            \nNode 1\n    Dev 0\n            \n"
        );

        let messages = WARNINGS.messages.lock().unwrap();
        assert!(
            messages
                .iter()
                .any(|m| m.contains("holds no sample ids")),
            "{messages:?}"
        );
    }
}
