//! hyper_optimizer::types — compressed sufficient statistics.
//!
//! A Dirichlet-multinomial fixed point only needs, for every component `k`,
//! how many groups observed `k` exactly `n` times, and how many groups have
//! total `n`. Both are stored as ascending `(count, multiplicity)` runs with
//! zero counts dropped, since `ψ(x + 0) − ψ(x) = 0`.
use ndarray::ArrayView2;

/// Ascending run-length encoding `(count, multiplicity)` of positive counts.
pub type CountHistogram = Vec<(usize, usize)>;

/// Compressed sufficient statistics of a groups × components count matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirichletStats {
    /// One histogram per component (column).
    pub component_hists: Vec<CountHistogram>,
    /// Histogram of group (row) totals.
    pub total_hist: CountHistogram,
}

impl DirichletStats {
    /// Build statistics from a count matrix whose rows are groups and whose
    /// columns are components.
    pub fn from_rows(counts: ArrayView2<'_, usize>) -> DirichletStats {
        let component_hists = counts
            .columns()
            .into_iter()
            .map(|col| encode(col.iter().copied().collect()))
            .collect();
        let total_hist = encode(counts.rows().into_iter().map(|row| row.sum()).collect());
        DirichletStats { component_hists, total_hist }
    }

    pub fn num_components(&self) -> usize {
        self.component_hists.len()
    }

    /// `true` when no group has a positive total.
    pub fn is_empty(&self) -> bool {
        self.total_hist.is_empty()
    }

    /// Merge all component histograms into one, as needed by a symmetric prior.
    pub fn pooled(&self) -> CountHistogram {
        encode_runs(self.component_hists.iter().flatten().copied().collect())
    }
}

fn encode(counts: Vec<usize>) -> CountHistogram {
    encode_runs(counts.into_iter().map(|c| (c, 1)).collect())
}

fn encode_runs(mut runs: Vec<(usize, usize)>) -> CountHistogram {
    runs.retain(|&(count, mult)| count > 0 && mult > 0);
    runs.sort_unstable_by_key(|&(count, _)| count);
    let mut out: CountHistogram = Vec::with_capacity(runs.len());
    for (count, mult) in runs {
        match out.last_mut() {
            Some(last) if last.0 == count => last.1 += mult,
            _ => out.push((count, mult)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Verify histogram construction on a small documents × topics matrix.
    //
    // Given
    // -----
    // - counts = [[4, 0], [0, 3], [4, 1]] (3 groups, 2 components).
    //
    // Expect
    // ------
    // - component 0: {4: 2}; component 1: {1: 1, 3: 1};
    //   totals: {3: 1, 4: 1, 5: 1}.
    fn from_rows_builds_component_and_total_histograms() {
        // Arrange
        let counts = array![[4_usize, 0], [0, 3], [4, 1]];

        // Act
        let stats = DirichletStats::from_rows(counts.view());

        // Assert
        assert_eq!(stats.num_components(), 2);
        assert_eq!(stats.component_hists[0], vec![(4, 2)]);
        assert_eq!(stats.component_hists[1], vec![(1, 1), (3, 1)]);
        assert_eq!(stats.total_hist, vec![(3, 1), (4, 1), (5, 1)]);
        assert!(!stats.is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Verify that pooling merges equal counts across components.
    fn pooled_merges_equal_counts() {
        let counts = array![[2_usize, 2, 0], [1, 0, 2]];

        let stats = DirichletStats::from_rows(counts.view());

        assert_eq!(stats.pooled(), vec![(1, 1), (2, 3)]);
        assert_eq!(stats.total_hist, vec![(3, 1), (4, 1)]);
    }

    #[test]
    // Purpose
    // -------
    // An all-zero matrix yields empty statistics.
    fn all_zero_counts_are_empty() {
        let counts = ndarray::Array2::<usize>::zeros((3, 4));
        let stats = DirichletStats::from_rows(counts.view());
        assert!(stats.is_empty());
        assert!(stats.component_hists.iter().all(|h| h.is_empty()));
    }
}
