//! # Error Types

/// Errors from partviz operations.
#[derive(Debug, thiserror::Error)]
pub enum PartvizError {
    /// The partitioning algorithm key is not one of the known variants.
    #[error("unknown partitioning algorithm: {0:?}")]
    UnknownAlgorithm(String),

    /// A configuration field is out of range.
    #[error("invalid {field}: {reason}")]
    InvalidConfig {
        /// The offending field.
        field: &'static str,

        /// Why the value was rejected.
        reason: String,
    },

    /// Canonical and physical node counts must divide one another.
    #[error(
        "canonical nodes ({canonical}) and physical nodes ({physical}) must be evenly divisible by one another"
    )]
    NodeRatio {
        /// The canonical node count.
        canonical: usize,

        /// The physical node count.
        physical: usize,
    },

    /// The flat sequence cannot be reshaped onto the hierarchy.
    #[error("cannot reshape {len} ids into rows of stride {stride}")]
    ShapeMismatch {
        /// Length of the flat sequence.
        len: usize,

        /// `nodes * devices * workers * batch_size`.
        stride: usize,
    },

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Rendered text was not UTF-8.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for partviz operations.
pub type PVResult<T> = core::result::Result<T, PartvizError>;
