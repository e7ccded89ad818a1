//! Edelbaum low-thrust transfer calculator.
//!
//! The guidance law and its closed-form cost live in [`lowthrust`]; the remaining crates
//! supply vector primitives, circular-orbit helpers, case manifests and exporters so that
//! front-ends (CLI, propagators, notebooks) share one implementation.

pub use edelbaum_config as config;
pub use edelbaum_core as core;
pub use edelbaum_export as export;
pub use edelbaum_lowthrust as lowthrust;
pub use edelbaum_orbits as orbits;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
