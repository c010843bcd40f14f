//! # Partition Algorithm Selector

use core::str::FromStr;

use crate::{
    config::PartitionConfig,
    errors::{PVResult, PartvizError},
    partitions::{FastPartitioner, PartitionProvider, SlowPartitioner},
};

/// The available [`PartitionProvider`] implementations.
///
/// Parsed from the lowercase keys `"fast"` and `"slow"`.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum PartitionAlgorithm {
    /// [`FastPartitioner`]; closed-form per-element index arithmetic.
    #[default]
    Fast,

    /// [`SlowPartitioner`]; materializes every intermediate stage.
    Slow,
}

impl PartitionAlgorithm {
    /// Parse an algorithm key.
    pub fn from_key(key: &str) -> PVResult<Self> {
        Self::from_str(key).map_err(|_| PartvizError::UnknownAlgorithm(key.to_string()))
    }

    /// The key this algorithm is selected by.
    pub fn key(&self) -> &'static str {
        self.into()
    }

    /// A one-line description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Fast => "computes each grid cell directly from its coordinate",
            Self::Slow => "builds each partitioning stage as nested sequences",
        }
    }

    /// Build the selected [`PartitionProvider`].
    pub fn provider(&self) -> Box<dyn PartitionProvider> {
        match self {
            Self::Fast => Box::new(FastPartitioner),
            Self::Slow => Box::new(SlowPartitioner),
        }
    }

    /// Run the selected provider.
    pub fn partition(
        &self,
        config: &PartitionConfig,
    ) -> PVResult<Vec<i64>> {
        self.provider().partition(config)
    }
}
