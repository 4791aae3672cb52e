//! # Steering library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to
//! access items defined inside the steering executable crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Global data store for the executable
pub mod data_store;

/// Parameters for the steering executable
pub mod params;

/// Simulated equipment - joints that integrate their velocity demands and control seats
pub mod sim;

/// Steering control module - converts operator input into joint velocity demands
pub mod steer_ctrl;
