//! A pure Rust library for intermolecular radial distribution functions.
//! It labels bonded molecules, searches periodic neighbors with a cell list,
//! and accumulates g(r) across trajectory frames while leaving out pairs
//! that belong to the same molecule.
//!
//! # Features
//!
//! - **Molecule perception** — Connected components of the bond graph, one
//!   label per particle
//! - **Periodic neighbor search** — Cell list in fractional coordinates for
//!   orthorhombic and triclinic boxes under the minimum-image convention
//! - **Intermolecular RDF** — Streaming histogram over frames with optional
//!   bonded-pair exclusion and a retained-pair normalization factor
//! - **TOML configuration** — Radial range, binning, and frame range from a
//!   config file or code defaults
//!
//! # Quick Start
//!
//! The main entry points are [`label`], which turns a bond list into
//! [`MoleculeLabels`], and [`compute`], which reduces a sequence of
//! [`Frame`]s into an [`RdfResult`]:
//!
//! ```
//! use rdf_forge::{Frame, MoleculeLabels, RdfConfig, RdfError, Selection, SimBox};
//! use rdf_forge::compute;
//!
//! // Two diatomic molecules and one free particle in a 10 Å cube
//! let mut frame = Frame::new(SimBox::cube(10.0));
//! frame.add_particle("X", [1.0, 1.0, 1.0]);
//! frame.add_particle("X", [2.0, 1.0, 1.0]);
//! frame.add_particle("X", [1.0, 4.0, 1.0]);
//! frame.add_particle("X", [2.0, 4.0, 1.0]);
//! frame.add_particle("X", [1.5, 2.5, 3.0]);
//! frame.add_bond(0, 1);
//! frame.add_bond(2, 3);
//!
//! let labels = MoleculeLabels::from_frame(&frame)?;
//! assert_eq!(labels.molecule_count(), 3);
//!
//! let x = Selection::of_type(&frame, "X");
//! let config = RdfConfig {
//!     r_max: Some(4.9),
//!     bins: 49,
//!     exclude_bonded: true,
//!     ..Default::default()
//! };
//! let rdf = compute([&frame], &x, &x, &config, Some(&labels))?;
//!
//! // Ten unordered pairs lie within the cutoff; the two bonded ones are dropped
//! assert_eq!(rdf.frame_counts[0].pairs_found, 10);
//! assert_eq!(rdf.frame_counts[0].pairs_retained, 8);
//! assert!((rdf.normalization - 0.8).abs() < 1e-12);
//! assert_eq!(rdf.total_pairs(), 8);
//! # Ok::<(), RdfError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`label`] — Molecule labels from a bond list
//! - [`query`] / [`PeriodicGrid`] — Periodic neighbor search
//! - [`compute`] — Intermolecular RDF over frames
//! - [`RdfConfig`] — Radial range, bins, exclusion, and frame range
//!
//! # Data Types
//!
//! ## Input Structures
//!
//! - [`SimBox`] — Periodic cell with edge lengths and tilt factors
//! - [`Frame`] — Positions, particle types, and bonds of one snapshot
//! - [`Bond`] — Unordered pair of bonded particle indices
//! - [`Selection`] — Boolean mask choosing the A or B subset
//!
//! ## Output Structures
//!
//! - [`RdfResult`] — Bin edges and centers, g(r), n(r), raw counts, and the
//!   normalization factor
//! - [`FrameCounts`] — Pairs found and retained in each frame
//! - [`NeighborPair`] — One result of a neighbor query
//! - [`RadialHistogram`] — Raw pair-distance histogram

mod analysis;
mod model;

pub use model::frame::{Bond, Frame, Selection};
pub use model::rdf::{FrameCounts, RdfResult};
pub use model::sim_box::SimBox;

pub use analysis::{
    FrameRange, MoleculeLabels, NeighborPair, NormalizationMode, PeriodicGrid, RadialHistogram,
    RdfConfig, Subset, compute, label, query,
};

pub use analysis::Error as RdfError;
