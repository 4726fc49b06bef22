//! Electromagnetic injection scenarios for BBN constraints.
//!
//! Decay and annihilation source terms, and abundance propagation through
//! an external nuclear network with a buffered propagator.

pub mod annihilation;
mod checks;
pub mod cosmology;
pub mod decay;
pub mod scan;
pub mod scenario;
pub mod solver;
pub mod spectrum;

#[cfg(test)]
mod testing;

pub use cosmology::{Cosmology, RadiationCosmology, TabulatedCosmology};
pub use scenario::{Physics, Scenario};
pub use solver::{InjectionSource, MatrixGenerator, NuclearReactor};
