use thiserror::Error;

/// Errors reported by the clustering entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// More clusters were requested than there are points to draw them from.
    #[error("invalid cluster count: requested {requested} clusters for {points} points")]
    InvalidClusterCount { requested: usize, points: usize },

    /// The point set or configuration is malformed (empty data, zero
    /// clusters, zero-dimension points, or mismatched dimensionality).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
