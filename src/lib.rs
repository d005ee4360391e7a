//! K-means clustering (Lloyd's algorithm) over dense `f64` point sets.
//!
//! Initial centers are sampled from the data through a caller-supplied
//! random source (or passed in explicitly for reproducible runs), then
//! refined by alternating nearest-center assignment and per-cluster mean
//! updates until the total center displacement drops to the configured
//! tolerance or an iteration cap is reached. A cluster that attracts no
//! points is dropped permanently; every cluster carries a stable id so a
//! shrunken result is observable in the output.

pub mod centers;
pub mod error;
pub mod k_means;

pub use centers::CenterSet;
pub use error::{Error, Result};
pub use k_means::{assign, kmeans, kmeans_from, recompute_centers, KMeansConfig, KMeansFit};
