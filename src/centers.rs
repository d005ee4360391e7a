use rand::Rng;

/// An ordered set of cluster centers, each paired with a stable cluster id.
///
/// Ids are assigned once at initialization (`0..k`) and removed when a
/// cluster collapses, i.e. receives no points during an update. A removed id
/// is never reused, so the id list of a finished run records exactly which
/// of the initial clusters survived.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterSet {
    ids: Vec<usize>,
    centers: Vec<Vec<f64>>,
}

impl CenterSet {
    /// Initialize `k` centers by drawing points from `data` uniformly at
    /// random, with replacement. Duplicate centers are possible; a
    /// duplicated center attracts no points in the first update (ties break
    /// to the lower position) and is dropped there.
    ///
    /// Callers must ensure `1 <= k <= data.len()`; the public entry points
    /// in [`crate::k_means`] validate this before sampling.
    pub fn sample<R: Rng + ?Sized>(data: &[Vec<f64>], k: usize, rng: &mut R) -> Self {
        let centers = (0..k)
            .map(|_| data[rng.gen_range(0..data.len())].clone())
            .collect();
        Self {
            ids: (0..k).collect(),
            centers,
        }
    }

    /// Build a center set from explicit center vectors, with ids `0..len`.
    ///
    /// This is the injection seam for reproducible runs: tests pass a fixed
    /// initial set here instead of sampling.
    pub fn from_centers(centers: Vec<Vec<f64>>) -> Self {
        Self {
            ids: (0..centers.len()).collect(),
            centers,
        }
    }

    pub(crate) fn from_parts(ids: Vec<usize>, centers: Vec<Vec<f64>>) -> Self {
        debug_assert_eq!(ids.len(), centers.len());
        Self { ids, centers }
    }

    /// Number of centers currently in the set.
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Dimensionality of the centers.
    pub fn dim(&self) -> usize {
        self.centers.first().map_or(0, Vec::len)
    }

    /// Stable cluster ids, ordered by center position.
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// The center vectors, ordered by position.
    pub fn centers(&self) -> &[Vec<f64>] {
        &self.centers
    }

    /// The center vector at `position`.
    pub fn center(&self, position: usize) -> &[f64] {
        &self.centers[position]
    }

    /// Euclidean norm of the flattened difference between this set and
    /// `moved`, or `None` when the two sets do not carry the same ids.
    ///
    /// A differing id list means a cluster collapsed between the two
    /// states; the matrices have different shapes and the displacement is
    /// not defined. The run loop treats that as "not yet converged".
    pub fn displacement(&self, moved: &CenterSet) -> Option<f64> {
        if self.ids != moved.ids {
            return None;
        }
        let sum: f64 = self
            .centers
            .iter()
            .zip(&moved.centers)
            .flat_map(|(a, b)| a.iter().zip(b).map(|(x, y)| (x - y).powi(2)))
            .sum();
        Some(sum.sqrt())
    }

    /// Consume the set, returning the bare center matrix.
    pub fn into_matrix(self) -> Vec<Vec<f64>> {
        self.centers
    }
}
