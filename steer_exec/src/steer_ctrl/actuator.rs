//! Actuators and their velocity law

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;
use serde::Serialize;
use util::maths::clamp;

use super::{
    ActuatorConfig, Axis, JointRef, RampFilter, SessionDefaults, Travel,
    SAFE_LIMIT_MIN_SPEED_FRAC, STRAIGHTEN_GAIN,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Safe limit policy of an actuator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SafeLimit {
    /// Whether the actuator slows down near the end of its travel.
    pub enabled: bool,

    /// Fraction of travel after which slowing begins, in (0, 1).
    pub margin: f64,
}

/// A joint driven by the controller.
///
/// Holds the joint's configuration resolved against the session defaults.
/// The resolved values are a copy, changes to the defaults only reach the
/// actuator through `apply_defaults`.
pub struct Actuator {
    name: String,
    joint: JointRef,
    config: ActuatorConfig,

    direction: f64,
    auto_straighten: bool,
    max_speed: f64,
    safe_limit: SafeLimit,
    straighten_deadband: f64,

    /// The velocity demanded on the last update.
    last_velocity: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Actuator {
    /// Create a new actuator driving `joint`.
    pub fn new(
        name: String,
        joint: JointRef,
        config: ActuatorConfig,
        defaults: &SessionDefaults
    ) -> Self {
        let mut act = Self {
            name,
            joint,
            config,
            direction: 1.0,
            auto_straighten: defaults.auto_straighten,
            max_speed: defaults.max_speed,
            safe_limit: SafeLimit {
                enabled: defaults.safe_limit,
                margin: defaults.safe_limit_margin,
            },
            straighten_deadband: defaults.straighten_deadband,
            last_velocity: 0.0,
        };

        act.apply_defaults(defaults);

        act
    }

    /// Resolve the configuration against (new) session defaults.
    ///
    /// Settings the configuration overrides are unaffected.
    pub fn apply_defaults(&mut self, defaults: &SessionDefaults) {
        let cfg = &self.config;

        self.direction = match cfg.direction {
            Some(d) if d < 0 => -1.0,
            _ => 1.0
        };
        self.auto_straighten = cfg.auto_straighten.unwrap_or(defaults.auto_straighten);
        self.max_speed = cfg.speed.unwrap_or(defaults.max_speed);
        self.safe_limit = SafeLimit {
            enabled: cfg.safe_limit.unwrap_or(defaults.safe_limit),
            margin: cfg.safe_limit_margin
                .filter(|m| super::is_valid_margin(*m))
                .unwrap_or(defaults.safe_limit_margin),
        };
        self.straighten_deadband = defaults.straighten_deadband;
    }

    /// Compute this cycle's velocity and write it to the joint.
    ///
    /// `filter` must already have been advanced for this cycle.
    pub fn update(&mut self, raw_input: f64, filter: &RampFilter) -> f64 {
        let travel = self.joint.borrow().travel();
        let velocity = self.calc_velocity(&travel, raw_input, filter);

        self.joint.borrow_mut().set_velocity(velocity);
        self.last_velocity = velocity;

        trace!("{}: input {:.3}, velocity {:.4}", self.name, raw_input, velocity);

        velocity
    }

    /// Set the joint's velocity to zero.
    pub fn stop(&mut self) {
        self.joint.borrow_mut().set_velocity(0.0);
        self.last_velocity = 0.0;
    }

    /// The velocity law.
    ///
    /// Depends only on its arguments and the actuator's resolved settings.
    pub fn calc_velocity(&self, travel: &Travel, raw_input: f64, filter: &RampFilter) -> f64 {
        let input = if raw_input.is_finite() {
            clamp(&raw_input, &-1.0, &1.0)
        }
        else {
            0.0
        };

        if input == 0.0 {
            if self.auto_straighten {
                return self.straighten_velocity(travel, filter)
            }
            return 0.0
        }

        let limited_speed = self.limited_speed(travel, input);

        if input > 0.0 {
            self.direction * -limited_speed * filter.positive_frac() * input
        }
        else {
            self.direction * -limited_speed * filter.negative_frac() * input
        }
    }

    /// Speed available when moving in the direction commanded by `input`.
    ///
    /// Full speed until the joint has covered `margin` of its travel towards
    /// the limit it is approaching, then falling linearly to
    /// `SAFE_LIMIT_MIN_SPEED_FRAC` of full speed at the limit.
    pub fn limited_speed(&self, travel: &Travel, input: f64) -> f64 {
        if !self.safe_limit.enabled {
            return self.max_speed
        }

        let position = match travel.normalised_position() {
            Some(p) => p,
            None => return self.max_speed
        };

        // Positive input moves the joint down when not inverted
        let towards_high = self.direction * input < 0.0;
        let travelled = if towards_high { position } else { 1.0 - position };

        let scale = (1.0 - travelled) / (1.0 - self.safe_limit.margin);

        self.max_speed * clamp(&scale, &SAFE_LIMIT_MIN_SPEED_FRAC, &1.0)
    }

    /// Velocity returning the joint to its centre once input is released.
    ///
    /// Suppressed while the axis is still coasting down, then ramps in over
    /// the same number of cycles as manual steering.
    fn straighten_velocity(&self, travel: &Travel, filter: &RampFilter) -> f64 {
        let deviation = travel.deviation(self.config.centre);

        if !deviation.is_finite() || deviation.abs() < self.straighten_deadband {
            return 0.0
        }

        let ramp_down = 1.0 - filter.held_frac();

        -self.max_speed * ramp_down * clamp(&(STRAIGHTEN_GAIN * deviation), &-1.0, &1.0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn axis(&self) -> Axis {
        self.config.axis
    }

    pub fn config(&self) -> &ActuatorConfig {
        &self.config
    }

    pub fn joint(&self) -> &JointRef {
        &self.joint
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn auto_straighten(&self) -> bool {
        self.auto_straighten
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn safe_limit(&self) -> SafeLimit {
        self.safe_limit
    }

    pub fn last_velocity(&self) -> f64 {
        self.last_velocity
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sim::SimJoint;
    use std::{cell::RefCell, rc::Rc};

    fn linear_actuator(config: ActuatorConfig, defaults: &SessionDefaults) -> Actuator {
        let joint: JointRef = Rc::new(RefCell::new(
            SimJoint::linear("Piston #steer", 0.0, 1.0, 0.5)
        ));
        Actuator::new(String::from("Piston #steer"), joint, config, defaults)
    }

    fn held_filter(ticks: u32, positive: bool) -> RampFilter {
        let mut f = RampFilter::default();
        for _ in 0..ticks {
            f.update(if positive { 1.0 } else { -1.0 });
        }
        f
    }

    fn linear_travel(offset_m: f64) -> Travel {
        Travel::Linear { low_m: 0.0, high_m: 1.0, offset_m }
    }

    #[test]
    fn test_resolves_defaults() {
        let defaults = SessionDefaults::default();
        let act = linear_actuator(
            ActuatorConfig {
                direction: Some(-1),
                speed: Some(3.0),
                safe_limit_margin: Some(0.5),
                ..Default::default()
            },
            &defaults
        );

        assert_eq!(act.direction(), -1.0);
        assert_eq!(act.max_speed(), 3.0);
        assert_eq!(act.auto_straighten(), defaults.auto_straighten);
        assert_eq!(act.safe_limit().enabled, defaults.safe_limit);
        assert_eq!(act.safe_limit().margin, 0.5);
    }

    #[test]
    fn test_apply_defaults_keeps_overrides() {
        let mut defaults = SessionDefaults::default();
        let mut follows = linear_actuator(ActuatorConfig::default(), &defaults);
        let mut pinned = linear_actuator(
            ActuatorConfig {
                auto_straighten: Some(true),
                ..Default::default()
            },
            &defaults
        );

        defaults.auto_straighten = false;

        // Copies aren't live until re-applied
        assert!(follows.auto_straighten());

        follows.apply_defaults(&defaults);
        pinned.apply_defaults(&defaults);
        assert!(!follows.auto_straighten());
        assert!(pinned.auto_straighten());
    }

    #[test]
    fn test_ramped_velocity() {
        let defaults = SessionDefaults {
            max_speed: 2.0,
            ..Default::default()
        };
        let act = linear_actuator(ActuatorConfig::default(), &defaults);
        let travel = linear_travel(0.5);

        let half = held_filter(15, true);
        assert_eq!(act.calc_velocity(&travel, 1.0, &half), -1.0);

        let full = held_filter(30, false);
        assert_eq!(act.calc_velocity(&travel, -1.0, &full), 2.0);
        assert_eq!(act.calc_velocity(&travel, -0.5, &full), 1.0);

        // Input is clamped to [-1, 1]
        assert_eq!(act.calc_velocity(&travel, -5.0, &full), 2.0);
    }

    #[test]
    fn test_zero_input_without_straighten() {
        let defaults = SessionDefaults {
            auto_straighten: false,
            ..Default::default()
        };
        let act = linear_actuator(ActuatorConfig::default(), &defaults);
        let travel = linear_travel(0.9);

        let mut f = held_filter(30, true);
        for _ in 0..2 {
            f.update(0.0);
            assert_eq!(act.calc_velocity(&travel, 0.0, &f), 0.0);
        }
    }

    #[test]
    fn test_direction_symmetry() {
        let cases = [
            (1.0, true, 0.5),
            (0.3, true, 0.95),
            (-1.0, false, 0.05),
            (-0.7, false, 0.8),
        ];

        for &safe_limit in &[false, true] {
            let defaults = SessionDefaults {
                safe_limit,
                ..Default::default()
            };
            let normal = linear_actuator(ActuatorConfig::default(), &defaults);
            let inverted = linear_actuator(
                ActuatorConfig { direction: Some(-1), ..Default::default() },
                &defaults
            );

            for &(input, positive, pos) in &cases {
                // Inverted joints approach the opposite limit, so with safe
                // limits on only positions outside both margins compare
                if safe_limit && (pos < 0.2 || pos > 0.8) {
                    continue
                }

                let travel = linear_travel(pos);
                let f = held_filter(20, positive);
                let v = normal.calc_velocity(&travel, input, &f);
                let vi = inverted.calc_velocity(&travel, input, &f);

                assert!(v != 0.0);
                assert_eq!(v, -vi);
            }
        }
    }

    #[test]
    fn test_safe_limit_deceleration() {
        let defaults = SessionDefaults {
            max_speed: 1.0,
            safe_limit: true,
            safe_limit_margin: 0.8,
            ..Default::default()
        };
        let act = linear_actuator(ActuatorConfig::default(), &defaults);

        // Negative input moves a non-inverted joint towards its high limit
        let mut last = std::f64::INFINITY;
        for i in 0..=100 {
            let pos = i as f64 / 100.0;
            let speed = act.limited_speed(&linear_travel(pos), -1.0);

            assert!(speed <= last);
            assert!(speed >= 0.1);

            if pos <= 0.8 {
                assert!((speed - 1.0).abs() < 1e-9);
            }
            last = speed;
        }
        assert!((act.limited_speed(&linear_travel(1.0), -1.0) - 0.1).abs() < 1e-12);
        assert!((act.limited_speed(&linear_travel(0.9), -1.0) - 0.5).abs() < 1e-9);

        // Moving away from a limit is never slowed
        assert_eq!(act.limited_speed(&linear_travel(1.0), 1.0), 1.0);

        // Positive input moves it towards its low limit
        let mut last = std::f64::INFINITY;
        for i in (0..=100).rev() {
            let pos = i as f64 / 100.0;
            let speed = act.limited_speed(&linear_travel(pos), 1.0);

            assert!(speed <= last);
            assert!(speed >= 0.1);

            if pos >= 0.2 {
                assert!((speed - 1.0).abs() < 1e-9);
            }
            last = speed;
        }
        assert!((act.limited_speed(&linear_travel(0.0), 1.0) - 0.1).abs() < 1e-12);
        assert!((act.limited_speed(&linear_travel(0.1), 1.0) - 0.5).abs() < 1e-9);
        assert_eq!(act.limited_speed(&linear_travel(0.0), -1.0), 1.0);
    }

    #[test]
    fn test_safe_limit_inverted() {
        let defaults = SessionDefaults {
            max_speed: 1.0,
            safe_limit: true,
            safe_limit_margin: 0.8,
            ..Default::default()
        };
        let act = linear_actuator(
            ActuatorConfig { direction: Some(-1), ..Default::default() },
            &defaults
        );

        // Inverted, positive input moves it towards its high limit
        let mut last = std::f64::INFINITY;
        for i in 0..=100 {
            let pos = i as f64 / 100.0;
            let speed = act.limited_speed(&linear_travel(pos), 1.0);

            assert!(speed <= last);
            assert!(speed >= 0.1);
            last = speed;
        }
        assert!((act.limited_speed(&linear_travel(1.0), 1.0) - 0.1).abs() < 1e-12);
        assert!((act.limited_speed(&linear_travel(0.9), 1.0) - 0.5).abs() < 1e-9);
        assert!((act.limited_speed(&linear_travel(0.0), -1.0) - 0.1).abs() < 1e-12);
        assert_eq!(act.limited_speed(&linear_travel(0.0), 1.0), 1.0);

        // Velocity near the high limit with full input
        let f = held_filter(30, true);
        let v = act.calc_velocity(&linear_travel(1.0), 1.0, &f);
        assert!((v - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_safe_limit_degenerate_range() {
        let defaults = SessionDefaults {
            safe_limit: true,
            ..Default::default()
        };
        let act = linear_actuator(ActuatorConfig::default(), &defaults);
        let travel = Travel::Linear { low_m: 2.0, high_m: 2.0, offset_m: 2.0 };

        assert_eq!(act.limited_speed(&travel, -1.0), defaults.max_speed);
        assert_eq!(act.limited_speed(&travel, 1.0), defaults.max_speed);
    }

    #[test]
    fn test_straighten_velocity() {
        let defaults = SessionDefaults::default();
        let act = linear_actuator(ActuatorConfig::default(), &defaults);
        let rest = RampFilter::default();

        // Saturated far from centre, drives back from both sides
        assert_eq!(act.calc_velocity(&linear_travel(0.5), 0.0, &rest), -1.0);
        assert_eq!(
            act.calc_velocity(&Travel::Linear { low_m: -1.0, high_m: 1.0, offset_m: -0.5 }, 0.0, &rest),
            1.0
        );

        // Proportional near centre
        assert!((act.calc_velocity(&linear_travel(0.05), 0.0, &rest) + 0.5).abs() < 1e-12);

        // Inside the deadband
        assert_eq!(act.calc_velocity(&linear_travel(0.0), 0.0, &rest), 0.0);
        assert_eq!(act.calc_velocity(&linear_travel(0.5e-4), 0.0, &rest), 0.0);

        // Suppressed just after release
        let mut f = held_filter(30, true);
        f.update(0.0);
        let v = act.calc_velocity(&linear_travel(0.5), 0.0, &f);
        assert!((v + 1.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_update_writes_joint() {
        let defaults = SessionDefaults::default();
        let joint = Rc::new(RefCell::new(SimJoint::linear("Piston", 0.0, 1.0, 0.5)));
        let joint_ref: JointRef = joint.clone();
        let mut act = Actuator::new(String::from("Piston"), joint_ref, ActuatorConfig::default(), &defaults);

        let v = act.update(0.0, &RampFilter::default());
        assert_eq!(v, -1.0);
        assert_eq!(act.last_velocity(), -1.0);
        assert_eq!(joint.borrow().target_velocity(), -1.0);

        act.stop();
        assert_eq!(joint.borrow().target_velocity(), 0.0);
    }
}
