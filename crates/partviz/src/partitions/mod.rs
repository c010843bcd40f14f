//! # Partition Providers
//!
//! A [`PartitionProvider`] computes the flat sample id assignment for a
//! [`PartitionConfig`]; the sequence is laid out in
//! `(node, device, worker, batch, slot)` row-major order, and
//! reshapes onto a [`crate::PartitionGrid`].
//!
//! Providers are selected by [`PartitionAlgorithm`].

mod algorithm;
mod fast;
mod layout;
mod slow;

#[doc(inline)]
pub use algorithm::*;
#[doc(inline)]
pub use fast::*;
#[doc(inline)]
pub use layout::*;
#[doc(inline)]
pub use slow::*;

use crate::{config::PartitionConfig, errors::PVResult};

/// Computes the flat partition sequence for a configuration.
pub trait PartitionProvider {
    /// Compute the flat partition sequence.
    ///
    /// The result length is a multiple of [`PartitionConfig::stride`].
    fn partition(
        &self,
        config: &PartitionConfig,
    ) -> PVResult<Vec<i64>>;
}
