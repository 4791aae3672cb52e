//! Simulated equipment
//!
//! Stands in for the vehicle when running the controller outside a game
//! world. Joints integrate their commanded velocity each step and stop at
//! their limits, seats replay scripted operator input.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod joint;
mod params;
mod scene;
mod seat;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use joint::*;
pub use params::*;
pub use scene::*;
pub use seat::*;
