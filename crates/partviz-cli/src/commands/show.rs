use partviz::{
    PartitionAlgorithm,
    PartitionConfig,
    config::{
        DEFAULT_CANONICAL_NODES,
        DEFAULT_DATASET_SIZE,
        DEFAULT_DEVICE_BATCH_SIZE,
        DEFAULT_DEVICE_WORKERS,
        DEFAULT_NODE_DEVICES,
        DEFAULT_PHYSICAL_NODES,
    },
};

use crate::{input_output::OutputArgs, logging::LogArgs};

/// Partitioning parameters.
#[derive(clap::Args, Debug)]
pub struct PartitionArgs {
    /// Partitioning algorithm: "fast" or "slow".
    #[arg(
        short,
        long,
        visible_alias = "version",
        default_value = "fast",
        value_parser = PartitionAlgorithm::from_key,
    )]
    algorithm: PartitionAlgorithm,

    /// Number of samples in the dataset.
    #[arg(short = 'n', long, default_value_t = DEFAULT_DATASET_SIZE)]
    dataset_size: usize,

    /// Samples per batch, per device.
    #[arg(short = 'b', long, default_value_t = DEFAULT_DEVICE_BATCH_SIZE)]
    device_batch_size: usize,

    /// Samples already seen this epoch.
    #[arg(short = 'o', long, default_value_t = 0)]
    offset_in_epoch: usize,

    /// Canonical node count.
    #[arg(short = 'c', long, default_value_t = DEFAULT_CANONICAL_NODES)]
    canonical_nodes: usize,

    /// Physical node count.
    #[arg(short = 'p', long, default_value_t = DEFAULT_PHYSICAL_NODES)]
    physical_nodes: usize,

    /// Devices per node.
    #[arg(short = 'd', long, default_value_t = DEFAULT_NODE_DEVICES)]
    node_devices: usize,

    /// Workers per device.
    #[arg(short = 'w', long, default_value_t = DEFAULT_DEVICE_WORKERS)]
    device_workers: usize,
}

impl PartitionArgs {
    /// Build the validated [`PartitionConfig`].
    pub fn config(&self) -> partviz::PVResult<PartitionConfig> {
        PartitionConfig::default()
            .with_algorithm(self.algorithm)
            .with_dataset_size(self.dataset_size)
            .with_device_batch_size(self.device_batch_size)
            .with_offset_in_epoch(self.offset_in_epoch)
            .with_canonical_nodes(self.canonical_nodes)
            .with_physical_nodes(self.physical_nodes)
            .with_node_devices(self.node_devices)
            .with_device_workers(self.device_workers)
            .validated()
    }
}

/// Args for the show command.
#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    partition: PartitionArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl ShowArgs {
    /// Run the show command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let config = self.partition.config()?;
        log::debug!("{config:?}");

        if let Some(path) = &self.output.output {
            log::info!("output: {}", path);
        }
        let mut writer = self.output.open_writer()?;
        partviz::show_partitions(&config, &mut writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(clap::Parser, Debug)]
    struct TestArgs {
        #[command(flatten)]
        partition: PartitionArgs,
    }

    #[test]
    fn test_defaults() {
        let args = TestArgs::parse_from(["partviz"]);
        assert_eq!(args.partition.config().unwrap(), PartitionConfig::default());
    }

    #[test]
    fn test_short_flags() {
        let args = TestArgs::parse_from([
            "partviz", "-a", "slow", "-n", "100", "-b", "4", "-o", "2", "-c", "2", "-p", "4",
            "-d", "2", "-w", "3",
        ]);
        let config = args.partition.config().unwrap();
        assert_eq!(
            config,
            PartitionConfig {
                algorithm: PartitionAlgorithm::Slow,
                dataset_size: 100,
                device_batch_size: 4,
                offset_in_epoch: 2,
                canonical_nodes: 2,
                physical_nodes: 4,
                node_devices: 2,
                device_workers: 3,
            }
        );
    }

    #[test]
    fn test_version_alias() {
        let args = TestArgs::parse_from(["partviz", "--version", "slow"]);
        assert_eq!(args.partition.algorithm, PartitionAlgorithm::Slow);
    }

    #[test]
    fn test_unknown_algorithm() {
        assert!(TestArgs::try_parse_from(["partviz", "--algorithm", "medium"]).is_err());
    }

    #[test]
    fn test_invalid_hierarchy() {
        let args = TestArgs::parse_from(["partviz", "-w", "0"]);
        assert!(args.partition.config().is_err());
    }
}
