//! # Communications interface crate.
//!
//! Provides the boundary types shared between the steering controller and
//! whatever feeds it: operator input frames, telecommands and runtime
//! commands.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Runtime command list parsing
pub mod cmd;

/// Definitions for equipment (like the control seat)
pub mod eqpt;

pub mod tc;
