use rand::Rng;

use crate::centers::CenterSet;
use crate::error::{Error, Result};

/// Configuration options for k-means clustering.
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters to find.
    pub k: usize,
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Convergence tolerance. If the total movement of all centers between
    /// two consecutive iterations falls to this value or below, the
    /// algorithm stops early.
    pub tolerance: f64,
}

impl KMeansConfig {
    /// Create a new config with default values for max_iterations (10000) and tolerance (1e-3).
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: 10_000,
            tolerance: 1e-3,
        }
    }

    /// Customize the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Customize the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Result of a k-means run.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// The final centers, ordered by position.
    pub centers: Vec<Vec<f64>>,
    /// Stable id of the cluster at each center position. A strict subset of
    /// `0..k` when clusters collapsed during the run.
    pub cluster_ids: Vec<usize>,
    /// For each input point, the position in `centers` of its nearest center.
    pub labels: Vec<usize>,
    /// Number of update iterations performed.
    pub iterations: usize,
    /// Whether the center displacement fell to the tolerance before the
    /// iteration cap was reached.
    pub converged: bool,
}

/// Runs k-means clustering on the provided dataset, sampling the initial
/// centers from `data` through the supplied random source.
///
/// Centers are refined by alternating nearest-center assignment and
/// per-cluster mean updates until the total center displacement drops to
/// `config.tolerance` or `config.max_iterations` is reached. A cluster that
/// attracts no points is dropped permanently, so the result may hold fewer
/// than `config.k` centers; `KMeansFit::cluster_ids` records which of the
/// initial clusters survived. Reaching the iteration cap is not an error:
/// the run returns the best centers found with `converged = false`.
///
/// Runs are deterministic given a fixed seed for `rng`; for a fixed initial
/// center set use [`kmeans_from`].
///
/// # Arguments
///
/// - `data`: the point set, one `Vec<f64>` per point, all the same length.
/// - `config`: cluster count, iteration cap, and convergence tolerance.
/// - `rng`: random source used only for the initial sampling.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if `data` is empty, points have zero or
///   mismatched dimensions, or `config.k` is zero.
/// - [`Error::InvalidClusterCount`] if `config.k` exceeds the number of
///   points.
///
/// # Example
///
/// ```
/// use lloyd::{kmeans, KMeansConfig};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let data = vec![
///     vec![1.0, 2.0],
///     vec![1.5, 1.8],
///     vec![5.0, 8.0],
///     vec![8.0, 8.0],
/// ];
///
/// let mut rng = ChaCha20Rng::seed_from_u64(42);
/// let fit = kmeans(&data, &KMeansConfig::new(2), &mut rng)?;
///
/// assert_eq!(fit.labels.len(), 4);
/// assert!(fit.centers.len() <= 2);
/// # Ok::<(), lloyd::Error>(())
/// ```
pub fn kmeans<R: Rng + ?Sized>(
    data: &[Vec<f64>],
    config: &KMeansConfig,
    rng: &mut R,
) -> Result<KMeansFit> {
    validate(data, config.k)?;
    let centers = CenterSet::sample(data, config.k, rng);
    Ok(lloyd(data, centers, config))
}

/// Runs k-means clustering from an explicit initial center set instead of a
/// random sample. The cluster count is `initial.len()`; `config.k` is not
/// consulted.
///
/// Everything downstream of initialization is a pure function of the inputs,
/// so repeated calls with the same arguments produce identical fits. This is
/// the entry point for reproducible runs.
///
/// # Errors
///
/// Same conditions as [`kmeans`], with `initial.len()` as the cluster count;
/// additionally [`Error::InvalidInput`] if an initial center's dimension
/// does not match the data.
pub fn kmeans_from(
    data: &[Vec<f64>],
    initial: &[Vec<f64>],
    config: &KMeansConfig,
) -> Result<KMeansFit> {
    validate(data, initial.len())?;
    let dim = data[0].len();
    if let Some(center) = initial.iter().find(|center| center.len() != dim) {
        return Err(Error::InvalidInput(format!(
            "initial center has dimension {}, data has dimension {}",
            center.len(),
            dim
        )));
    }
    Ok(lloyd(data, CenterSet::from_centers(initial.to_vec()), config))
}

/// Assign each point to its nearest center, by Euclidean distance.
///
/// Returns one label per point: the position of the nearest center in
/// `centers`. Ties break to the lowest position. Pure and deterministic.
///
/// # Panics
///
/// If `centers` is empty or the dimensions of `data` and `centers` disagree.
pub fn assign(data: &[Vec<f64>], centers: &CenterSet) -> Vec<usize> {
    data.iter()
        .map(|point| {
            let mut best = 0;
            let mut best_dist = distance_sq(point, centers.center(0));
            for position in 1..centers.len() {
                let dist = distance_sq(point, centers.center(position));
                if dist < best_dist {
                    best_dist = dist;
                    best = position;
                }
            }
            best
        })
        .collect()
}

/// One update step: assign every point to its nearest center, then replace
/// each center with the mean of the points assigned to it.
///
/// A center position that received no points is dropped together with its
/// stable id, shrinking the set for all subsequent iterations; the drop is
/// logged at warn level since it changes the shape of the final result.
/// Survivors keep their relative order, so labels computed against the new
/// set line up with increasing positions.
///
/// # Panics
///
/// If `data` is empty or the dimensions of `data` and `centers` disagree.
pub fn recompute_centers(data: &[Vec<f64>], centers: &CenterSet) -> CenterSet {
    let labels = assign(data, centers);
    let dim = data[0].len();

    let mut sums = vec![vec![0.0; dim]; centers.len()];
    let mut counts = vec![0_usize; centers.len()];
    for (point, &label) in data.iter().zip(&labels) {
        counts[label] += 1;
        for (sum, x) in sums[label].iter_mut().zip(point) {
            *sum += x;
        }
    }

    let mut ids = Vec::with_capacity(centers.len());
    let mut moved = Vec::with_capacity(centers.len());
    for (position, (sum, count)) in sums.into_iter().zip(counts).enumerate() {
        let id = centers.ids()[position];
        if count == 0 {
            log::warn!("cluster {id} received no points and was dropped");
            continue;
        }
        ids.push(id);
        moved.push(sum.into_iter().map(|s| s / count as f64).collect());
    }
    CenterSet::from_parts(ids, moved)
}

/// The fixed-point loop shared by both entry points. Inputs are validated.
fn lloyd(data: &[Vec<f64>], mut centers: CenterSet, config: &KMeansConfig) -> KMeansFit {
    let mut iterations = 0;
    let mut delta = f64::INFINITY;

    while delta > config.tolerance && iterations < config.max_iterations {
        let moved = recompute_centers(data, &centers);
        // A collapse leaves the two sets with different id lists; their
        // displacement is undefined, so keep iterating instead of testing
        // convergence against it.
        delta = centers.displacement(&moved).unwrap_or(f64::INFINITY);
        centers = moved;
        iterations += 1;
    }

    let converged = delta <= config.tolerance;
    if !converged {
        log::debug!(
            "iteration cap {} reached with displacement {delta:.6}",
            config.max_iterations
        );
    }
    log::debug!("k-means finished after {iterations} iterations");

    let labels = assign(data, &centers);
    KMeansFit {
        cluster_ids: centers.ids().to_vec(),
        labels,
        iterations,
        converged,
        centers: centers.into_matrix(),
    }
}

fn validate(data: &[Vec<f64>], k: usize) -> Result<()> {
    if data.is_empty() {
        return Err(Error::InvalidInput("empty point set".into()));
    }
    let dim = data[0].len();
    if dim == 0 {
        return Err(Error::InvalidInput(
            "points must have at least one dimension".into(),
        ));
    }
    if let Some((i, point)) = data.iter().enumerate().find(|(_, point)| point.len() != dim) {
        return Err(Error::InvalidInput(format!(
            "point {i} has dimension {}, expected {dim}",
            point.len()
        )));
    }
    if k == 0 {
        return Err(Error::InvalidInput("cluster count must be at least 1".into()));
    }
    if k > data.len() {
        return Err(Error::InvalidClusterCount {
            requested: k,
            points: data.len(),
        });
    }
    Ok(())
}

/// Compute the squared Euclidean distance between two points of the same dimension.
/// Using squared distance to avoid unnecessary sqrt computations during comparisons.
fn distance_sq(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .fold(0.0, |acc, (&x, &y)| acc + (x - y).powi(2))
}
