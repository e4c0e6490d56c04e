//! Intermolecular pair correlation over a sequence of frames.
//!
//! Each frame is reduced independently: select both subsets, run the
//! periodic neighbor search, drop intramolecular pairs, and histogram what
//! survives. Per-frame histograms are merged into one accumulator, which is
//! normalized to g(r) after the last frame.

use log::{debug, info, warn};

use super::config::{NormalizationMode, RdfConfig, validate_range};
use super::error::{Error, Subset};
use super::histogram::RadialHistogram;
use super::molecules::MoleculeLabels;
use super::spatial;
use crate::model::frame::{Frame, Selection};
use crate::model::rdf::{FrameCounts, RdfResult};
use crate::model::sim_box::SimBox;

/// Computes the A–B radial distribution function over `frames`.
///
/// Equal selections give a same-type RDF in which each unordered pair is
/// counted once. With `config.exclude_bonded`, pairs whose two particles
/// share a molecule label are dropped before histogramming.
///
/// # Errors
///
/// - [`Error::EmptySelection`] if either selection matches no particles
/// - [`Error::InvalidRange`] for a malformed radial range or bin count
/// - [`Error::MissingLabels`] if bonded exclusion is requested without labels
///   covering every particle
/// - [`Error::NoFrames`] if the frame range selects nothing
/// - [`Error::InconsistentFrame`] if a frame's particle count differs from
///   the selection masks
pub fn compute<'a, I>(
    frames: I,
    selection_a: &Selection,
    selection_b: &Selection,
    config: &RdfConfig,
    labels: Option<&MoleculeLabels>,
) -> Result<RdfResult, Error>
where
    I: IntoIterator<Item = &'a Frame>,
{
    if selection_a.count() == 0 {
        return Err(Error::EmptySelection { subset: Subset::A });
    }
    if selection_b.count() == 0 {
        return Err(Error::EmptySelection { subset: Subset::B });
    }
    if let Some(r_max) = config.r_max {
        validate_range(config.r_min, r_max, config.bins)?;
    }

    let labels = if config.exclude_bonded {
        let labels = labels.ok_or_else(|| Error::missing_labels("no labels were supplied"))?;
        let needed = selection_a.len().max(selection_b.len());
        if labels.len() < needed {
            return Err(Error::missing_labels(format!(
                "{} labels supplied for {} particles",
                labels.len(),
                needed
            )));
        }
        Some(labels)
    } else {
        None
    };

    let range = config.frames;
    let mut frames = frames
        .into_iter()
        .enumerate()
        .skip(range.start)
        .take(range.len().unwrap_or(usize::MAX));

    let Some((first_index, first)) = frames.next() else {
        return Err(Error::NoFrames);
    };

    let mut correlator = Correlator::new(first, selection_a, selection_b, config, labels)?;
    correlator.process(first_index, first)?;
    for (frame_index, frame) in frames {
        correlator.process(frame_index, frame)?;
    }

    Ok(correlator.finish(config))
}

struct Correlator<'l> {
    particle_count: usize,
    a_indices: Vec<usize>,
    b_indices: Vec<usize>,
    same_selection: bool,
    labels: Option<&'l MoleculeLabels>,
    r_max: f64,
    reference_box: SimBox,
    histogram: RadialHistogram,
    frame_counts: Vec<FrameCounts>,
}

impl<'l> Correlator<'l> {
    fn new(
        first: &Frame,
        selection_a: &Selection,
        selection_b: &Selection,
        config: &RdfConfig,
        labels: Option<&'l MoleculeLabels>,
    ) -> Result<Self, Error> {
        if selection_a.len() != selection_b.len() {
            return Err(Error::inconsistent_frame(
                0,
                format!(
                    "selection masks differ in length ({} vs {})",
                    selection_a.len(),
                    selection_b.len()
                ),
            ));
        }
        let r_max = config.resolve_r_max(&first.sim_box)?;
        let histogram = RadialHistogram::new(config.r_min, r_max, config.bins)?;

        let widths = first.sim_box.perpendicular_widths();
        let min_width = widths[0].min(widths[1]).min(widths[2]);
        if r_max > 0.5 * min_width {
            warn!(
                "r_max = {r_max} exceeds half the narrowest box width ({}); only the nearest image of each pair is counted",
                0.5 * min_width
            );
        }

        Ok(Self {
            particle_count: selection_a.len(),
            a_indices: selection_a.indices(),
            b_indices: selection_b.indices(),
            same_selection: selection_a == selection_b,
            labels,
            r_max,
            reference_box: first.sim_box,
            histogram,
            frame_counts: Vec::new(),
        })
    }

    fn check_frame(&self, frame_index: usize, frame: &Frame) -> Result<(), Error> {
        if frame.particle_count() != self.particle_count {
            return Err(Error::inconsistent_frame(
                frame_index,
                format!(
                    "selections cover {} particles but the frame has {}",
                    self.particle_count,
                    frame.particle_count()
                ),
            ));
        }
        if !frame.sim_box.is_valid() {
            return Err(Error::inconsistent_frame(
                frame_index,
                format!("invalid box {:?}", frame.sim_box),
            ));
        }
        if frame.sim_box != self.reference_box {
            warn!(
                "frame {frame_index} box {:?} differs from the first frame; normalizing with the first frame's volume",
                frame.sim_box
            );
        }
        Ok(())
    }

    fn process(&mut self, frame_index: usize, frame: &Frame) -> Result<(), Error> {
        self.check_frame(frame_index, frame)?;

        let a_positions: Vec<[f64; 3]> =
            self.a_indices.iter().map(|&i| frame.positions[i]).collect();
        let b_positions: Vec<[f64; 3]> = if self.same_selection {
            a_positions.clone()
        } else {
            self.b_indices.iter().map(|&i| frame.positions[i]).collect()
        };

        let pairs = spatial::query(
            &frame.sim_box,
            &b_positions,
            &a_positions,
            self.r_max,
            self.same_selection,
        )?;

        let mut frame_histogram = self.histogram.empty_like();
        let mut counts = FrameCounts {
            frame_index,
            pairs_found: pairs.len() as u64,
            pairs_retained: 0,
        };

        for pair in &pairs {
            let a = self.a_indices[pair.query_index];
            let b = self.b_indices[pair.point_index];
            if self.labels.is_some_and(|labels| labels.same_molecule(a, b)) {
                continue;
            }
            counts.pairs_retained += 1;
            frame_histogram.add(pair.distance);
        }

        self.histogram.merge(&frame_histogram)?;
        debug!(
            "frame {frame_index}: {} pairs found, {} retained",
            counts.pairs_found, counts.pairs_retained
        );
        self.frame_counts.push(counts);
        Ok(())
    }

    fn finish(self, config: &RdfConfig) -> RdfResult {
        let frames = self.frame_counts.len() as f64;
        let n_a = self.a_indices.len() as f64;
        let n_b = self.b_indices.len() as f64;
        let volume = self.reference_box.volume();

        // Unordered pairs for a same-type RDF, ordered (A, B) pairs otherwise.
        let (pair_norm, partners_per_pair) = if self.same_selection {
            (n_a * (n_a - 1.0) / 2.0, 2.0)
        } else {
            (n_a * n_b, 1.0)
        };

        let counts = self.histogram.counts();
        let rdf: Vec<f64> = counts
            .iter()
            .zip(self.histogram.shell_volumes())
            .map(|(&count, shell)| {
                if pair_norm > 0.0 {
                    count as f64 * volume / (frames * pair_norm * shell)
                } else {
                    0.0
                }
            })
            .collect();

        let mut cumulative = 0u64;
        let n_r: Vec<f64> = counts
            .iter()
            .map(|&count| {
                cumulative += count;
                cumulative as f64 * partners_per_pair / (frames * n_a)
            })
            .collect();

        let normalization = if config.exclude_bonded {
            retained_ratio(&self.frame_counts, config.normalization)
        } else {
            1.0
        };

        info!(
            "RDF over {} frames: {} pairs histogrammed, normalization {normalization:.6}",
            self.frame_counts.len(),
            self.histogram.total()
        );

        RdfResult {
            bin_edges: self.histogram.bin_edges(),
            bin_centers: self.histogram.bin_centers(),
            rdf,
            n_r,
            pair_counts: counts.to_vec(),
            normalization,
            frames_processed: self.frame_counts.len(),
            frame_counts: self.frame_counts,
        }
    }
}

fn retained_ratio(frame_counts: &[FrameCounts], mode: NormalizationMode) -> f64 {
    match mode {
        NormalizationMode::LastFrame => frame_counts
            .last()
            .map(FrameCounts::retained_fraction)
            .unwrap_or(1.0),
        NormalizationMode::Averaged => {
            let found: u64 = frame_counts.iter().map(|c| c.pairs_found).sum();
            let retained: u64 = frame_counts.iter().map(|c| c.pairs_retained).sum();
            if found == 0 {
                1.0
            } else {
                retained as f64 / found as f64
            }
        }
    }
}
