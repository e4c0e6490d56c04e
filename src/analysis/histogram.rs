//! Fixed-width histogram of pair distances.
//!
//! Per-frame histograms share one binning and are summed bin by bin, so the
//! accumulated counts do not depend on the order frames are merged in.

use std::f64::consts::PI;

use super::config::validate_range;
use super::error::Error;

/// Fixed-width radial histogram over `[r_min, r_max)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialHistogram {
    r_min: f64,
    r_max: f64,
    bin_width: f64,
    counts: Vec<u64>,
}

impl RadialHistogram {
    pub fn new(r_min: f64, r_max: f64, bins: usize) -> Result<Self, Error> {
        validate_range(r_min, r_max, bins)?;
        Ok(Self {
            r_min,
            r_max,
            bin_width: (r_max - r_min) / bins as f64,
            counts: vec![0; bins],
        })
    }

    /// A zeroed histogram with the same binning.
    pub fn empty_like(&self) -> Self {
        Self {
            counts: vec![0; self.counts.len()],
            ..*self
        }
    }

    #[inline]
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Bin holding distance `r`, or `None` outside `[r_min, r_max)`.
    pub fn bin_index(&self, r: f64) -> Option<usize> {
        if r.is_nan() || r < self.r_min || r >= self.r_max {
            return None;
        }
        let bin = ((r - self.r_min) / self.bin_width).floor() as usize;
        // r just below r_max can round up to the bin count
        Some(bin.min(self.counts.len() - 1))
    }

    /// Counts one pair at distance `r`. Returns `false` if `r` is out of range.
    pub fn add(&mut self, r: f64) -> bool {
        match self.bin_index(r) {
            Some(bin) => {
                self.counts[bin] += 1;
                true
            }
            None => false,
        }
    }

    /// Adds another histogram bin by bin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if the two histograms have different binning.
    pub fn merge(&mut self, other: &RadialHistogram) -> Result<(), Error> {
        if self.r_min != other.r_min || self.r_max != other.r_max || self.bins() != other.bins()
        {
            return Err(Error::invalid_range(format!(
                "cannot merge histograms over [{}, {}) x {} and [{}, {}) x {}",
                self.r_min,
                self.r_max,
                self.bins(),
                other.r_min,
                other.r_max,
                other.bins()
            )));
        }
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += theirs;
        }
        Ok(())
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `bins + 1` bin boundaries from `r_min` to `r_max`.
    pub fn bin_edges(&self) -> Vec<f64> {
        (0..=self.bins())
            .map(|k| self.r_min + k as f64 * self.bin_width)
            .collect()
    }

    pub fn bin_centers(&self) -> Vec<f64> {
        (0..self.bins())
            .map(|k| self.r_min + (k as f64 + 0.5) * self.bin_width)
            .collect()
    }

    /// Volume of the spherical shell covered by each bin.
    pub fn shell_volumes(&self) -> Vec<f64> {
        self.bin_edges()
            .windows(2)
            .map(|w| 4.0 / 3.0 * PI * (w[1].powi(3) - w[0].powi(3)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn binning_follows_floor_rule() {
        let h = RadialHistogram::new(0.0, 6.0, 60).unwrap();
        assert!(approx_eq(h.bin_width(), 0.1, 1e-15));
        assert_eq!(h.bin_index(0.0), Some(0));
        assert_eq!(h.bin_index(0.05), Some(0));
        assert_eq!(h.bin_index(3.05), Some(30));
        assert_eq!(h.bin_index(5.999_999), Some(59));
    }

    #[test]
    fn out_of_range_is_discarded() {
        let mut h = RadialHistogram::new(1.0, 2.0, 4).unwrap();
        assert!(!h.add(0.999));
        assert!(!h.add(2.0));
        assert!(!h.add(f64::NAN));
        assert!(h.add(1.0));
        assert!(h.add(1.99));
        assert_eq!(h.counts(), &[1, 0, 0, 1]);
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn value_just_below_r_max_lands_in_last_bin() {
        let r_max = 0.3;
        let mut h = RadialHistogram::new(0.0, r_max, 3).unwrap();
        let below = f64::from_bits(r_max.to_bits() - 1);
        assert!(h.add(below));
        assert_eq!(h.counts()[2], 1);
    }

    #[test]
    fn merge_sums_elementwise() {
        let mut a = RadialHistogram::new(0.0, 3.0, 3).unwrap();
        let mut b = RadialHistogram::new(0.0, 3.0, 3).unwrap();
        a.add(0.5);
        a.add(2.5);
        b.add(2.5);
        b.add(1.5);
        a.merge(&b).unwrap();
        assert_eq!(a.counts(), &[1, 1, 2]);

        let zero = a.empty_like();
        assert_eq!(zero.counts(), &[0, 0, 0]);
        assert_eq!(zero.bin_edges(), a.bin_edges());
    }

    #[test]
    fn merge_rejects_mismatched_binning() {
        let mut a = RadialHistogram::new(0.0, 3.0, 3).unwrap();
        let b = RadialHistogram::new(0.0, 3.0, 4).unwrap();
        assert!(matches!(a.merge(&b), Err(Error::InvalidRange(_))));
    }

    #[test]
    fn edges_centers_and_shells() {
        let h = RadialHistogram::new(1.0, 3.0, 2).unwrap();
        assert_eq!(h.bin_edges(), vec![1.0, 2.0, 3.0]);
        assert_eq!(h.bin_centers(), vec![1.5, 2.5]);
        let shells = h.shell_volumes();
        assert!(approx_eq(shells[0], 4.0 / 3.0 * PI * 7.0, 1e-12));
        assert!(approx_eq(shells[1], 4.0 / 3.0 * PI * 19.0, 1e-12));
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        assert!(RadialHistogram::new(2.0, 2.0, 10).is_err());
        assert!(RadialHistogram::new(0.0, 2.0, 0).is_err());
    }
}
