//! Equipment interfaces used by SteerCtrl
//!
//! The controller never owns the joints and seats it drives, they belong to
//! the scene (the game world, a simulation, or hardware drivers). It holds
//! shared handles and only ever reads position/velocity and writes velocity.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::seat::SeatInput;
use std::{cell::RefCell, rc::Rc};
use util::maths;

// ---------------------------------------------------------------------------
// TYPES
// ---------------------------------------------------------------------------

/// Shared handle to a joint owned by the scene.
pub type JointRef = Rc<RefCell<dyn Joint>>;

/// Shared handle to a control seat owned by the scene.
pub type SeatRef = Rc<RefCell<dyn Seat>>;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The range of motion of a joint and where it currently is within it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Travel {
    /// A hinge or rotor.
    ///
    /// Units: radians
    Rotational {
        low_rad: f64,
        high_rad: f64,
        angle_rad: f64,
    },

    /// A piston.
    ///
    /// Units: meters
    Linear {
        low_m: f64,
        high_m: f64,
        offset_m: f64,
    },
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A physical joint the controller can drive.
pub trait Joint {
    /// The joint's name, used for tag matching and status display.
    fn name(&self) -> String;

    /// Current range of motion and position.
    fn travel(&self) -> Travel;

    /// Current actual velocity in native units per second.
    fn velocity(&self) -> f64;

    /// Set the velocity the joint shall move at, in native units per second.
    fn set_velocity(&mut self, velocity: f64);

    /// Free-form configuration text stored with the joint.
    fn custom_data(&self) -> String;

    /// Replace the configuration text stored with the joint.
    fn set_custom_data(&mut self, data: &str);
}

/// A control seat an operator can sit in.
pub trait Seat {
    /// The seat's name, used for tag matching and status display.
    fn name(&self) -> String;

    /// The current input frame, including whether it is occupied.
    fn input(&self) -> SeatInput;
}

/// Provides the equipment available for binding.
pub trait Scene {
    /// All joints on the vehicle.
    fn joints(&self) -> Vec<JointRef>;

    /// All control seats on the vehicle.
    fn seats(&self) -> Vec<SeatRef>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Travel {
    /// The current position in native units.
    pub fn position(&self) -> f64 {
        match *self {
            Travel::Rotational { angle_rad, .. } => angle_rad,
            Travel::Linear { offset_m, .. } => offset_m,
        }
    }

    /// The `(low, high)` limits in native units.
    pub fn limits(&self) -> (f64, f64) {
        match *self {
            Travel::Rotational { low_rad, high_rad, .. } => (low_rad, high_rad),
            Travel::Linear { low_m, high_m, .. } => (low_m, high_m),
        }
    }

    /// The position as a fraction of the range of motion, 0 at the low limit
    /// and 1 at the high limit.
    ///
    /// `None` if the range is degenerate or unbounded, e.g. an unlimited
    /// rotor.
    pub fn normalised_position(&self) -> Option<f64> {
        maths::normalise(self.limits(), self.position())
    }

    /// Signed distance from `centre`.
    ///
    /// Rotational joints give this as a fraction of their full range, linear
    /// joints as a raw offset. Rotational joints without a usable range fall
    /// back to radians. A centre outside the range is measured from the
    /// nearest limit.
    pub fn deviation(&self, centre: f64) -> f64 {
        let (low, high) = self.limits();
        let centre = if low <= high {
            maths::clamp(&centre, &low, &high)
        }
        else {
            centre
        };

        match *self {
            Travel::Rotational { low_rad, high_rad, angle_rad } => {
                let span = high_rad - low_rad;
                if span.is_finite() && span > 0.0 {
                    (angle_rad - centre) / span
                }
                else {
                    angle_rad - centre
                }
            },
            Travel::Linear { offset_m, .. } => offset_m - centre,
        }
    }

    /// Short name of the joint type.
    pub fn kind(&self) -> &'static str {
        match self {
            Travel::Rotational { .. } => "rotational",
            Travel::Linear { .. } => "linear",
        }
    }
}
