//! Simulation-facing data: the per-tick world snapshot and the collaborator trait.

mod simulation;
mod snapshot;

pub use simulation::Simulation;
pub use snapshot::{Food, Organism, SnapshotError, Validation, WorldSnapshot};
