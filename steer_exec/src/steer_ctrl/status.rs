//! SteerCtrl status reporting

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use std::fmt;

use super::{Actuator, Axis, CtrlState};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Status of SteerCtrl at the end of a cycle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusReport {
    pub state: CtrlState,

    /// Number of bound actuators.
    pub num_actuators: usize,

    /// Name of the control seat, if bound.
    pub seat_name: Option<String>,

    /// Why the last setup attempt failed.
    pub setup_error: Option<String>,

    /// Supervisory periods until the next setup attempt.
    pub setup_retry_in: u32,

    /// The current auto-straighten default.
    pub auto_straighten: bool,

    pub actuators: Vec<ActuatorStatus>,

    /// Current operator messages, oldest first.
    pub messages: Vec<String>,
}

/// Status of a single actuator.
#[derive(Debug, Clone, Serialize)]
pub struct ActuatorStatus {
    pub name: String,
    pub axis: Axis,

    /// "rotational" or "linear".
    pub kind: &'static str,

    /// Position within the joint's travel, `None` if the travel is degenerate.
    ///
    /// Units: percent
    pub position_pct: Option<f64>,

    /// The joint's actual velocity.
    pub velocity: f64,

    /// The velocity demanded on the last cycle.
    pub target_velocity: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ActuatorStatus {
    pub fn from_actuator(act: &Actuator) -> Self {
        let joint = act.joint().borrow();
        let travel = joint.travel();

        Self {
            name: String::from(act.name()),
            axis: act.axis(),
            kind: travel.kind(),
            position_pct: travel.normalised_position().map(|p| p * 100.0),
            velocity: joint.velocity(),
            target_velocity: act.last_velocity(),
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Hinge Steering ==")?;

        match self.state {
            CtrlState::Setup => {
                match &self.setup_error {
                    Some(e) => {
                        writeln!(f, "Setup failed.\n\n{}\n", e)?;
                        if self.setup_retry_in > 0 {
                            writeln!(f, "Retrying in {} periods.", self.setup_retry_in)?;
                        }
                        else {
                            writeln!(f, "Retrying setup...")?;
                        }
                    },
                    None => writeln!(f, "Running setup...")?
                }
            },
            state => {
                writeln!(f, "Setup complete. Steering {}.", state)?;
                writeln!(f, "Hinges: {}.", self.num_actuators)?;
                if let Some(seat) = &self.seat_name {
                    writeln!(f, "Selected control seat: {}", seat)?;
                }
                writeln!(
                    f,
                    "Auto-straighten: {}",
                    if self.auto_straighten { "on" } else { "off" }
                )?;

                for a in self.actuators.iter() {
                    match a.position_pct {
                        Some(p) => writeln!(
                            f, "  {} [{}]: {:5.1}%, {:+.3}/s",
                            a.name, a.axis, p, a.velocity
                        )?,
                        None => writeln!(
                            f, "  {} [{}]: ---, {:+.3}/s",
                            a.name, a.axis, a.velocity
                        )?
                    }
                }
            }
        }

        if !self.messages.is_empty() {
            writeln!(f)?;
            for m in self.messages.iter() {
                writeln!(f, "{}", m)?;
            }
        }

        Ok(())
    }
}
