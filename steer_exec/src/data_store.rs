//! # Data Store

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use util::archive::{ArchiveError, Archived, Archiver};

use crate::steer_ctrl;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u64,

    /// True if this cycle falls on a low-rate (supervisory) boundary
    pub is_low_rate_cycle: bool,

    /// Simulation elapsed time
    pub sim_time_s: f64,

    // SteerCtrl
    pub steer_ctrl: steer_ctrl::SteerCtrl,
    pub steer_ctrl_input: steer_ctrl::InputData,
    pub steer_ctrl_output: steer_ctrl::OutputData,
    pub steer_ctrl_status_rpt: steer_ctrl::StatusReport,

    /// Per-cycle actuator archive
    pub arch_steer_ctrl: Archiver,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

/// One actuator on one cycle, as written to the archive.
#[derive(Debug, Clone, Serialize)]
pub struct ActuatorRecord {
    pub cycle: u64,
    pub sim_time_s: f64,
    pub state: String,
    pub actuator: String,
    pub position_pct: Option<f64>,
    pub velocity: f64,
    pub target_velocity: f64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle, sets
    /// the low-rate cycle flag and advances the simulated clock.
    pub fn cycle_start(&mut self, low_rate_divisor: u64, cycle_frequency_hz: f64) {
        self.is_low_rate_cycle =
            low_rate_divisor > 0 && self.num_cycles % low_rate_divisor == 0;

        self.steer_ctrl_input = steer_ctrl::InputData::default();
        self.steer_ctrl_output = steer_ctrl::OutputData::default();
        self.steer_ctrl_status_rpt = steer_ctrl::StatusReport::default();

        self.sim_time_s = util::time::cycles_to_seconds(
            self.num_cycles, cycle_frequency_hz
        );

        util::logger::set_cycle(self.num_cycles);
    }

    /// Perform actions required at the end of a cycle.
    pub fn cycle_end(&mut self) {
        self.num_cycles += 1;
    }

    /// Build this cycle's archive records from the status report.
    pub fn actuator_records(&self) -> Vec<ActuatorRecord> {
        let rpt = &self.steer_ctrl_status_rpt;

        rpt.actuators
            .iter()
            .map(|a| ActuatorRecord {
                cycle: self.num_cycles,
                sim_time_s: self.sim_time_s,
                state: rpt.state.to_string(),
                actuator: a.name.clone(),
                position_pct: a.position_pct,
                velocity: a.velocity,
                target_velocity: a.target_velocity,
            })
            .collect()
    }
}

impl Archived for DataStore {
    fn write(&mut self) -> Result<(), ArchiveError> {
        for record in self.actuator_records() {
            self.arch_steer_ctrl.serialise(record)?;
        }

        Ok(())
    }
}
