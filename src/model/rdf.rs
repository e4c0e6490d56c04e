use serde::Serialize;

/// Pair counts for one processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameCounts {
    /// Position of the frame in the input sequence.
    pub frame_index: usize,
    /// Pairs returned by the neighbor search.
    pub pairs_found: u64,
    /// Pairs left after removing intramolecular pairs.
    pub pairs_retained: u64,
}

impl FrameCounts {
    /// Fraction of pairs kept after exclusion, or 1 when the frame had no pairs.
    pub fn retained_fraction(&self) -> f64 {
        if self.pairs_found == 0 {
            1.0
        } else {
            self.pairs_retained as f64 / self.pairs_found as f64
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RdfResult {
    pub bin_edges: Vec<f64>,
    pub bin_centers: Vec<f64>,
    /// g(r) at each bin center.
    pub rdf: Vec<f64>,
    /// Mean number of partners within the outer edge of each bin.
    pub n_r: Vec<f64>,
    /// Raw histogram before normalization.
    pub pair_counts: Vec<u64>,
    /// Retained / found pair ratio, applied by callers as a multiplicative correction.
    pub normalization: f64,
    pub frame_counts: Vec<FrameCounts>,
    pub frames_processed: usize,
}

impl RdfResult {
    /// `(bin_center, g_r)` pairs in bin order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.bin_centers
            .iter()
            .copied()
            .zip(self.rdf.iter().copied())
    }

    /// g(r) with the normalization factor applied.
    pub fn corrected_rdf(&self) -> Vec<f64> {
        self.rdf.iter().map(|g| g * self.normalization).collect()
    }

    pub fn total_pairs(&self) -> u64 {
        self.pair_counts.iter().sum()
    }
}
