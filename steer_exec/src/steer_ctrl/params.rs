//! Parameters structure for SteerCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use super::SteerCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Steering control.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Params {

    // ---- SETUP ----

    /// Text in a block name marking it as one the controller should use.
    /// Prefixing it with a minus sign (e.g. `-#steer`) inverts a joint.
    pub tag: String,

    /// Number of supervisory periods to wait between failed setup attempts.
    pub setup_retry_periods: u32,

    // ---- MESSAGES ----

    /// How long a status message is shown for.
    ///
    /// Units: cycles
    pub msg_lifetime_cycles: u64,

    /// Maximum number of messages held at once, older messages are dropped.
    pub max_msgs: usize,

    // ---- DEFAULTS ----

    /// Defaults for actuators which don't override them.
    pub defaults: SessionDefaults,
}

/// Settings shared by all actuators unless their own configuration overrides
/// them.
///
/// Each actuator resolves its own copy of these when it is built, or when
/// the defaults are changed by a runtime command.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionDefaults {
    /// Speed of a joint at full input.
    ///
    /// Units: radians/second for rotational joints, meters/second for linear
    pub max_speed: f64,

    /// Whether joints return to their centre when input is released.
    pub auto_straighten: bool,

    /// Whether joints slow down as they approach the end of their travel.
    pub safe_limit: bool,

    /// Fraction of travel (towards the approached limit) after which the safe
    /// limit begins to slow the joint down. Must be in (0, 1).
    pub safe_limit_margin: f64,

    /// Deviation from centre below which straightening stops.
    ///
    /// Units: fraction of travel for rotational joints, meters for linear
    pub straighten_deadband: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            tag: String::from("#steer"),
            setup_retry_periods: 5,
            msg_lifetime_cycles: 600,
            max_msgs: 8,
            defaults: SessionDefaults::default(),
        }
    }
}

impl Params {
    /// Check the parameters are usable.
    pub fn validate(&self) -> Result<(), SteerCtrlError> {
        if self.tag.trim().is_empty() {
            return Err(SteerCtrlError::InvalidParam(String::from(
                "tag must not be empty"
            )))
        }

        if self.max_msgs == 0 {
            return Err(SteerCtrlError::InvalidParam(String::from(
                "max_msgs must be at least 1"
            )))
        }

        self.defaults.validate()
    }
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            max_speed: 1.0,
            auto_straighten: true,
            safe_limit: false,
            safe_limit_margin: 0.8,
            straighten_deadband: 1e-4,
        }
    }
}

impl SessionDefaults {
    /// Check the defaults are usable.
    pub fn validate(&self) -> Result<(), SteerCtrlError> {
        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(SteerCtrlError::InvalidParam(format!(
                "max_speed must be finite and non-negative, found {}",
                self.max_speed
            )))
        }

        if !is_valid_margin(self.safe_limit_margin) {
            return Err(SteerCtrlError::InvalidParam(format!(
                "safe_limit_margin must be in (0, 1), found {}",
                self.safe_limit_margin
            )))
        }

        if !self.straighten_deadband.is_finite() || self.straighten_deadband < 0.0 {
            return Err(SteerCtrlError::InvalidParam(format!(
                "straighten_deadband must be finite and non-negative, found {}",
                self.straighten_deadband
            )))
        }

        Ok(())
    }
}

/// Whether a safe limit margin lies strictly between 0 and 1.
pub(crate) fn is_valid_margin(margin: f64) -> bool {
    margin > 0.0 && margin < 1.0
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        assert!(Params::default().validate().is_ok());
    }

    #[test]
    fn test_params_from_toml() {
        let params: Params = util::params::load_str(r##"
            tag = "#hinge"

            [defaults]
            max_speed = 0.5
            safe_limit = true
        "##).unwrap();

        assert_eq!(params.tag, "#hinge");
        assert_eq!(params.setup_retry_periods, 5);
        assert_eq!(params.defaults.max_speed, 0.5);
        assert!(params.defaults.safe_limit);
        assert!(params.defaults.auto_straighten);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_invalid_params() {
        let mut params = Params::default();
        params.defaults.safe_limit_margin = 1.0;
        assert!(params.validate().is_err());

        let mut params = Params::default();
        params.defaults.max_speed = -1.0;
        assert!(params.validate().is_err());

        let mut params = Params::default();
        params.tag = String::from("  ");
        assert!(params.validate().is_err());
    }
}
