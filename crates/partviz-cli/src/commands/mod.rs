mod algorithms;
mod show;

/// Subcommands for partviz
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render a partitioning as an indented grid.
    Show(show::ShowArgs),

    /// List the available partitioning algorithms.
    Algorithms(algorithms::AlgorithmsArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Show(cmd) => cmd.run(),
            Commands::Algorithms(cmd) => cmd.run(),
        }
    }
}
