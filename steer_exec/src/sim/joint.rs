//! Simulated joints

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{JointKind, SimJointParams};
use crate::steer_ctrl::{Joint, Travel};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A joint which moves at its commanded velocity until it reaches a limit.
#[derive(Debug, Clone)]
pub struct SimJoint {
    name: String,
    kind: JointKind,

    low: f64,
    high: f64,
    position: f64,

    /// Velocity last commanded.
    target_velocity: f64,

    /// Velocity achieved over the last step.
    velocity: f64,

    custom_data: String,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimJoint {
    /// A hinge or rotor, limits and position in radians.
    pub fn rotational(name: &str, low_rad: f64, high_rad: f64, angle_rad: f64) -> Self {
        Self::new(name, JointKind::Rotational, low_rad, high_rad, angle_rad)
    }

    /// A piston, limits and position in meters.
    pub fn linear(name: &str, low_m: f64, high_m: f64, offset_m: f64) -> Self {
        Self::new(name, JointKind::Linear, low_m, high_m, offset_m)
    }

    pub fn from_params(params: &SimJointParams) -> Self {
        Self::new(&params.name, params.kind, params.low, params.high, params.position)
            .with_custom_data(&params.custom_data)
    }

    fn new(name: &str, kind: JointKind, low: f64, high: f64, position: f64) -> Self {
        Self {
            name: String::from(name),
            kind,
            low,
            high,
            position,
            target_velocity: 0.0,
            velocity: 0.0,
            custom_data: String::new(),
        }
    }

    /// Set the persisted configuration text.
    pub fn with_custom_data(mut self, data: &str) -> Self {
        self.custom_data = String::from(data);
        self
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target_velocity(&self) -> f64 {
        self.target_velocity
    }

    /// Advance the joint by `dt` seconds.
    ///
    /// The joint stops dead at a limit.
    pub fn step(&mut self, dt: f64) {
        if !(dt > 0.0) {
            return
        }

        let mut next = self.position + self.target_velocity * dt;
        if self.low <= self.high {
            next = next.max(self.low).min(self.high);
        }

        self.velocity = (next - self.position) / dt;
        self.position = next;
    }
}

impl Joint for SimJoint {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn travel(&self) -> Travel {
        match self.kind {
            JointKind::Rotational => Travel::Rotational {
                low_rad: self.low,
                high_rad: self.high,
                angle_rad: self.position,
            },
            JointKind::Linear => Travel::Linear {
                low_m: self.low,
                high_m: self.high,
                offset_m: self.position,
            },
        }
    }

    fn velocity(&self) -> f64 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: f64) {
        self.target_velocity = velocity;
    }

    fn custom_data(&self) -> String {
        self.custom_data.clone()
    }

    fn set_custom_data(&mut self, data: &str) {
        self.custom_data = String::from(data);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_step_integrates() {
        let mut j = SimJoint::linear("Piston", 0.0, 2.0, 1.0);
        j.set_velocity(0.5);
        j.step(0.5);

        assert_eq!(j.position(), 1.25);
        assert_eq!(j.velocity(), 0.5);
        assert_eq!(j.travel().normalised_position(), Some(0.625));
    }

    #[test]
    fn test_step_stops_at_limit() {
        let mut j = SimJoint::rotational("Hinge", -1.0, 1.0, 0.9);
        j.set_velocity(1.0);
        j.step(0.5);

        assert_eq!(j.position(), 1.0);
        assert!((j.velocity() - 0.2).abs() < 1e-12);

        j.step(0.5);
        assert_eq!(j.velocity(), 0.0);
        assert_eq!(j.target_velocity(), 1.0);
    }

    #[test]
    fn test_unlimited_rotor() {
        let mut j = SimJoint::rotational(
            "Rotor", std::f64::NEG_INFINITY, std::f64::INFINITY, 0.0
        );
        j.set_velocity(-2.0);
        j.step(1.0);

        assert_eq!(j.position(), -2.0);
        assert_eq!(j.travel().normalised_position(), None);
    }
}
