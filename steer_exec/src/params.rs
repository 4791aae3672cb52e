//! # Steering Executable Parameters
//!
//! This module provides parameters for the steering executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use crate::sim::SceneParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SteerExecParams {

    /// Number of control cycles per second of simulated time.
    pub cycle_frequency_hz: f64,

    /// Number of control cycles in one low-rate (supervisory) period.
    pub low_rate_divisor: u64,

    /// Number of consecutive cycle overruns after which a warning is raised
    /// every cycle rather than just once.
    #[serde(default = "default_overrun_warn_limit")]
    pub overrun_warn_limit: u64,

    /// The simulated vehicle.
    pub scene: SceneParams,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SteerExecParams {
    /// Length of one control cycle.
    ///
    /// Units: seconds
    pub fn cycle_period_s(&self) -> f64 {
        1.0 / self.cycle_frequency_hz
    }

    /// Check the parameters are usable, returning a description of the first
    /// problem found.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.cycle_frequency_hz.is_finite() && self.cycle_frequency_hz > 0.0) {
            return Err(format!(
                "cycle_frequency_hz must be positive, found {}",
                self.cycle_frequency_hz
            ))
        }

        if self.low_rate_divisor == 0 {
            return Err(String::from("low_rate_divisor must be at least 1"))
        }

        Ok(())
    }
}

fn default_overrun_warn_limit() -> u64 {
    10
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_exec_params() {
        let params: SteerExecParams = util::params::load_str(r#"
            cycle_frequency_hz = 60.0
            low_rate_divisor = 100

            [[scene.joints]]
            name = "Hinge #steer"
            kind = "rotational"
            low = -0.7
            high = 0.7
            position = 0.0

            [[scene.seats]]
            name = "Cockpit"
        "#).unwrap();

        assert!(params.validate().is_ok());
        assert_eq!(params.overrun_warn_limit, 10);
        assert_eq!(params.scene.joints.len(), 1);
        assert!((params.cycle_period_s() - 1.0 / 60.0).abs() < 1e-15);
    }

    #[test]
    fn test_invalid_exec_params() {
        let params: SteerExecParams = util::params::load_str(
            "cycle_frequency_hz = 0.0\nlow_rate_divisor = 100\n[scene]\n"
        ).unwrap();
        assert!(params.validate().is_err());
    }
}
