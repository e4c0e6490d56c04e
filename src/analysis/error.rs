//! Error types for the RDF pipeline.
//!
//! Every variant reflects a caller configuration problem. Nothing here is
//! transient, so callers get the error immediately with no partial result.

use std::fmt;

use thiserror::Error;

/// Which of the two correlated subsets an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subset {
    A,
    B,
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subset::A => write!(f, "A"),
            Subset::B => write!(f, "B"),
        }
    }
}

/// Errors that can occur while labeling molecules or computing an RDF.
#[derive(Debug, Error)]
pub enum Error {
    /// A bond references a particle index outside the point set.
    #[error("invalid topology: bond ({i}, {j}) references a particle outside 0..{point_count}")]
    InvalidTopology {
        /// First bonded index.
        i: usize,
        /// Second bonded index.
        j: usize,
        /// Number of particles in the point set.
        point_count: usize,
    },

    /// A type selector matched no particles.
    #[error("selection {subset} matches no particles")]
    EmptySelection {
        /// The offending subset.
        subset: Subset,
    },

    /// Malformed radius or bin configuration.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// Bonded exclusion requested without usable molecule labels.
    #[error("bonded exclusion requires molecule labels: {0}")]
    MissingLabels(String),

    /// The frame range selected no frames.
    #[error("no frames to process")]
    NoFrames,

    /// A frame disagrees with the particle count the run was set up for.
    #[error("frame {frame} is inconsistent: {detail}")]
    InconsistentFrame {
        /// Position of the frame in the input sequence.
        frame: usize,
        /// Description of the mismatch.
        detail: String,
    },

    /// Failed to parse an RDF configuration TOML.
    #[error("failed to parse RDF configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl Error {
    pub fn invalid_topology(i: usize, j: usize, point_count: usize) -> Self {
        Self::InvalidTopology { i, j, point_count }
    }

    pub fn invalid_range(details: impl Into<String>) -> Self {
        Self::InvalidRange(details.into())
    }

    pub fn missing_labels(details: impl Into<String>) -> Self {
        Self::MissingLabels(details.into())
    }

    pub fn inconsistent_frame(frame: usize, details: impl Into<String>) -> Self {
        Self::InconsistentFrame {
            frame,
            detail: details.into(),
        }
    }
}
