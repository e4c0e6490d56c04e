//! Configuration types for RDF computation.
//!
//! [`RdfConfig`] controls the radial range, binning, bonded exclusion,
//! normalization mode, and the slice of the trajectory to process. It has a
//! code default and can also be read from TOML, where every key is optional:
//!
//! ```toml
//! r_min = 0.0
//! r_max = 6.0
//! bins = 60
//! exclude_bonded = true
//! normalization = "last-frame"
//!
//! [frames]
//! start = 10
//! stop = 200
//! ```

use serde::{Deserialize, Serialize};

use super::error::Error;
use crate::model::sim_box::SimBox;

/// How the retained-pair ratio is reduced over frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationMode {
    /// Ratio from the final processed frame only.
    #[default]
    LastFrame,
    /// Total retained pairs over total found pairs across all processed frames.
    Averaged,
}

/// Half-open `[start, stop)` range of frame positions. `stop = None` runs to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameRange {
    pub start: usize,
    pub stop: Option<usize>,
}

impl FrameRange {
    pub fn new(start: usize, stop: Option<usize>) -> Self {
        Self { start, stop }
    }

    /// Number of frames to take after skipping `start`, if bounded.
    pub fn len(&self) -> Option<usize> {
        self.stop.map(|stop| stop.saturating_sub(self.start))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }
}

/// Main configuration for [`compute`](super::compute).
///
/// # Examples
///
/// ```
/// use rdf_forge::{NormalizationMode, RdfConfig};
///
/// let config = RdfConfig {
///     r_max: Some(6.0),
///     bins: 60,
///     exclude_bonded: true,
///     ..Default::default()
/// };
/// assert_eq!(config.normalization, NormalizationMode::LastFrame);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RdfConfig {
    /// Inner edge of the first bin.
    pub r_min: f64,

    /// Outer edge of the last bin.
    ///
    /// If `None`, uses [`SimBox::default_r_max`] of the first processed frame.
    pub r_max: Option<f64>,

    /// Number of histogram bins.
    pub bins: usize,

    /// Drop pairs whose two particles belong to the same molecule.
    pub exclude_bonded: bool,

    pub normalization: NormalizationMode,

    pub frames: FrameRange,
}

impl Default for RdfConfig {
    fn default() -> Self {
        Self {
            r_min: 0.0,
            r_max: None,
            bins: 100,
            exclude_bonded: false,
            normalization: NormalizationMode::LastFrame,
            frames: FrameRange::default(),
        }
    }
}

impl RdfConfig {
    /// Parses a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let config: RdfConfig = toml::from_str(text)?;
        Ok(config)
    }

    /// Resolves the cutoff for a box and checks the radial range.
    pub fn resolve_r_max(&self, sim_box: &SimBox) -> Result<f64, Error> {
        let r_max = self.r_max.unwrap_or_else(|| sim_box.default_r_max());
        validate_range(self.r_min, r_max, self.bins)?;
        Ok(r_max)
    }
}

pub(crate) fn validate_range(r_min: f64, r_max: f64, bins: usize) -> Result<(), Error> {
    if !r_min.is_finite() || r_min < 0.0 {
        return Err(Error::invalid_range(format!(
            "r_min must be finite and non-negative, got {r_min}"
        )));
    }
    if !r_max.is_finite() || r_max <= r_min {
        return Err(Error::invalid_range(format!(
            "r_max must be finite and greater than r_min ({r_min}), got {r_max}"
        )));
    }
    if bins < 1 {
        return Err(Error::invalid_range("at least one bin is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = RdfConfig::default();
        assert_eq!(config.r_min, 0.0);
        assert!(config.r_max.is_none());
        assert_eq!(config.bins, 100);
        assert!(!config.exclude_bonded);
        assert_eq!(config.normalization, NormalizationMode::LastFrame);
        assert_eq!(config.frames, FrameRange::new(0, None));
    }

    #[test]
    fn parse_full_toml() {
        let config = RdfConfig::from_toml_str(
            r#"
            r_min = 0.5
            r_max = 6.0
            bins = 60
            exclude_bonded = true
            normalization = "averaged"

            [frames]
            start = 10
            stop = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.r_min, 0.5);
        assert_eq!(config.r_max, Some(6.0));
        assert_eq!(config.bins, 60);
        assert!(config.exclude_bonded);
        assert_eq!(config.normalization, NormalizationMode::Averaged);
        assert_eq!(config.frames.len(), Some(10));
    }

    #[test]
    fn parse_partial_toml_uses_defaults() {
        let config = RdfConfig::from_toml_str("exclude_bonded = true").unwrap();
        assert!(config.exclude_bonded);
        assert_eq!(config.bins, 100);
        assert!(config.r_max.is_none());
    }

    #[test]
    fn parse_rejects_unknown_mode() {
        let err = RdfConfig::from_toml_str(r#"normalization = "median""#).unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn resolve_default_cutoff_from_box() {
        let config = RdfConfig::default();
        let r_max = config.resolve_r_max(&SimBox::cube(10.0)).unwrap();
        assert!(r_max < 5.0);
        assert!(r_max > 4.999_999);
    }

    #[test]
    fn resolve_rejects_bad_ranges() {
        let b = SimBox::cube(10.0);
        let inverted = RdfConfig {
            r_min: 3.0,
            r_max: Some(2.0),
            ..Default::default()
        };
        assert!(matches!(inverted.resolve_r_max(&b), Err(Error::InvalidRange(_))));

        let no_bins = RdfConfig {
            r_max: Some(2.0),
            bins: 0,
            ..Default::default()
        };
        assert!(matches!(no_bins.resolve_r_max(&b), Err(Error::InvalidRange(_))));

        let negative = RdfConfig {
            r_min: -1.0,
            r_max: Some(2.0),
            ..Default::default()
        };
        assert!(matches!(negative.resolve_r_max(&b), Err(Error::InvalidRange(_))));
    }

    #[test]
    fn frame_range_lengths() {
        assert_eq!(FrameRange::new(3, None).len(), None);
        assert_eq!(FrameRange::new(3, Some(2)).len(), Some(0));
        assert!(FrameRange::new(5, Some(5)).is_empty());
        assert!(!FrameRange::default().is_empty());
    }
}
