//! Plain data types shared by the analysis pipeline.
//!
//! - [`sim_box`] – Periodic triclinic cell with minimum-image geometry.
//! - [`frame`] – Trajectory snapshots, bonds, and particle selections.
//! - [`rdf`] – Finished radial distribution functions and per-frame pair counts.
//!
//! Inputs ([`Frame`]) and outputs ([`RdfResult`]) are kept apart so the
//! [`crate::analysis`] stages can reduce one into the other without touching
//! caller-owned data.
//!
//! [`Frame`]: frame::Frame
//! [`RdfResult`]: rdf::RdfResult

pub mod frame;
pub mod rdf;
pub mod sim_box;
