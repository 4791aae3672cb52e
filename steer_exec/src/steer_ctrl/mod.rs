//! Steering control module
//!
//! Converts the operator's input from a control seat into target velocities
//! for the joints (hinges, rotors or pistons) of an articulated vehicle.
//!
//! # Architecture
//!
//! Each control cycle:
//!     - The ramp filter of every axis in use is advanced with that axis's
//!       raw input.
//!     - Every actuator computes its velocity from its axis's input, the
//!       advanced filter and its joint's live position, and writes it to the
//!       joint.
//!     - The lifecycle state (`Setup`, `On`, `WindDown`, `Off`) is updated.
//!
//! Binding to the joints and seat happens on the low-rate supervisory cycle
//! (see `util::module::Supervised`), retrying until it succeeds.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod actuator;
mod axis;
mod bind;
mod config;
mod joint;
mod messages;
mod params;
mod ramp;
mod state;
mod status;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use actuator::*;
pub use axis::*;
pub use bind::*;
pub use config::*;
pub use joint::*;
pub use messages::*;
pub use params::*;
pub use ramp::*;
pub use state::*;
pub use status::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// How many cycles an input must be held to reach full speed, and how many
/// cycles it takes to coast back down after release.
pub const RAMP_CEILING: u32 = 30;

/// The minimum fraction of an actuator's speed allowed by the safe limit.
pub const SAFE_LIMIT_MIN_SPEED_FRAC: f64 = 0.1;

/// Gain applied to the deviation from centre when straightening.
pub const STRAIGHTEN_GAIN: f64 = 10.0;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during SteerCtrl initialisation.
#[derive(Debug, thiserror::Error)]
pub enum SteerCtrlError {
    #[error("Could not load the SteerCtrl parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Invalid SteerCtrl parameter: {0}")]
    InvalidParam(String),
}
