use std::io::Write;

use partviz::PartitionAlgorithm;
use strum::IntoEnumIterator;

/// Args for the algorithm listing command.
#[derive(clap::Args, Debug)]
pub struct AlgorithmsArgs {}

impl AlgorithmsArgs {
    /// Run the algorithm listing command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        write_listing(&mut std::io::stdout().lock())?;
        Ok(())
    }
}

/// Write one line per algorithm: key, default marker, description.
fn write_listing(writer: &mut dyn Write) -> std::io::Result<()> {
    for algorithm in PartitionAlgorithm::iter() {
        let default = if algorithm == PartitionAlgorithm::default() {
            " (default)"
        } else {
            ""
        };
        writeln!(
            writer,
            "\"{}\"{} - {}",
            algorithm.key(),
            default,
            algorithm.description()
        )?;
    }
    writer.flush()
}
