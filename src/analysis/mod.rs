mod config;
mod correlator;
mod error;
mod histogram;
mod molecules;
mod spatial;

pub use config::{FrameRange, NormalizationMode, RdfConfig};
pub use correlator::compute;
pub use error::{Error, Subset};
pub use histogram::RadialHistogram;
pub use molecules::{MoleculeLabels, label};
pub use spatial::{NeighborPair, PeriodicGrid, query};
