//! jarviz-core
//!
//! Core library for enumerating the classes of Java archives and collecting
//! method-to-method couplings across them.
//!
//! This crate defines the data model, the isolated archive scopes used to
//! enumerate classes, the coupling filter and collector, and the
//! configuration that ties them together.
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! multiple frontends (CLI, report generators, etc.).

pub mod config;
pub mod model;
pub mod services;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
