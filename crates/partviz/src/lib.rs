//! # `partviz` Sample Partition Visualizer
//!
//! Shows how a dataset's sample ids are split across a distributed
//! data-loading hierarchy:
//! physical nodes, devices per node, workers per device, batches per
//! worker, and samples per batch.
//!
//! See:
//! * [`partitions`] for the partition providers, selected by [`PartitionAlgorithm`].
//! * [`grid`] to view a flat id sequence as a [`PartitionGrid`].
//! * [`render`] to print a grid as aligned, indented text.
//!
//! ## Example
//!
//! ```rust
//! use partviz::{PartitionConfig, PartitionGrid, PartitionRenderer};
//!
//! let grid = PartitionGrid::reshape((0..8).collect(), 1, 1, 1, 4).unwrap();
//! let text = PartitionRenderer::for_grid(&grid)
//!     .render_to_string(&grid)
//!     .unwrap();
//! assert_eq!(text, "Node 0\n    Dev 0\n            0 1 2 3  4 5 6 7\n");
//!
//! let config = PartitionConfig::default();
//! let grid = partviz::partition_grid(&config).unwrap();
//! assert_eq!(grid.shape().batches, 2);
//! ```
//!
//! Padding slots hold [`SENTINEL`] (`-1`) and render as `-`.
#![warn(missing_docs)]

pub mod config;
pub mod errors;
pub mod grid;
pub mod partitions;
pub mod pipeline;
pub mod render;

#[doc(inline)]
pub use config::PartitionConfig;
#[doc(inline)]
pub use errors::{PVResult, PartvizError};
#[doc(inline)]
pub use grid::{GridCoord, GridShape, PartitionGrid, SENTINEL};
#[doc(inline)]
pub use partitions::{PartitionAlgorithm, PartitionProvider};
#[doc(inline)]
pub use pipeline::{partition_grid, show_partitions};
#[doc(inline)]
pub use render::PartitionRenderer;
