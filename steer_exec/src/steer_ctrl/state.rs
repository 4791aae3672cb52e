//! Implementations for the SteerCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::cmd::{parse_cmd_list, RuntimeCmd};
use log::{debug, info, trace, warn};
use serde::Serialize;
use std::{convert::Infallible, fmt};

// Internal
use super::{
    bind, ActuatorStatus, BindError, Binding, MsgQueue, Params, RampBank,
    Scene, SessionDefaults, StatusReport, SteerCtrlError,
};
use util::{
    module::{State, Supervised},
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Steering control module state
pub struct SteerCtrl {
    pub(crate) params: Params,

    /// Current session defaults, initially those from the parameters.
    defaults: SessionDefaults,

    state: CtrlState,

    binding: Option<Binding>,

    ramps: RampBank,

    /// Supervisory periods until setup is next attempted.
    setup_retry_in: u32,

    /// Reason the last setup attempt failed.
    setup_error: Option<BindError>,

    msgs: MsgQueue,

    /// Number of cycles processed.
    num_cycles: u64,
}

/// Input data to Steering Control.
#[derive(Debug, Clone, Default)]
pub struct InputData {
    /// Comma-separated runtime commands to execute this cycle, if any.
    pub cmd_list: Option<String>,
}

/// Output of one cycle of Steering Control.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutputData {
    /// State at the end of the cycle.
    pub state: CtrlState,

    /// Velocity written to each actuator this cycle, in binding order.
    ///
    /// Empty if no actuators were updated.
    pub velocities: Vec<f64>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The lifecycle state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CtrlState {
    /// Not bound yet, nothing is driven.
    Setup,

    /// The operator is seated and actuators are driven.
    On,

    /// Idle until the operator sits down.
    Off,

    /// The operator has left, actuators are driven until they all stop.
    WindDown,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for CtrlState {
    fn default() -> Self {
        CtrlState::Setup
    }
}

impl fmt::Display for CtrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CtrlState::Setup => "setup",
            CtrlState::On => "on",
            CtrlState::Off => "off",
            CtrlState::WindDown => "winding down",
        };
        write!(f, "{}", s)
    }
}

impl Default for SteerCtrl {
    fn default() -> Self {
        let params = Params::default();

        Self {
            defaults: params.defaults,
            state: CtrlState::Setup,
            binding: None,
            ramps: RampBank::default(),
            setup_retry_in: 0,
            setup_error: None,
            msgs: MsgQueue::new(params.msg_lifetime_cycles, params.max_msgs),
            num_cycles: 0,
            params,
        }
    }
}

impl State for SteerCtrl {
    type InitData = &'static str;
    type InitError = SteerCtrlError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the SteerCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session)
        -> Result<(), Self::InitError>
    {
        let params: Params = params::load(init_data)?;

        *self = Self::new(params)?;

        info!("SteerCtrl initialised, name tag \"{}\"", self.params.tag);

        Ok(())
    }

    /// Perform cyclic processing of Steering Control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        self.msgs.prune(self.num_cycles);

        if let Some(ref list) = input_data.cmd_list {
            self.exec_cmd_list(list);
        }

        let velocities = self.tick();

        trace!("SteerCtrl {}: {:?}", self.state, velocities);

        let output = OutputData {
            state: self.state,
            velocities,
        };
        let report = self.status_report();

        self.num_cycles += 1;

        Ok((output, report))
    }
}

impl Supervised for SteerCtrl {
    type Context = dyn Scene;

    /// Attempt setup if it is due.
    ///
    /// The first attempt is made immediately, failed attempts are retried
    /// every `setup_retry_periods` calls.
    fn supervise(&mut self, scene: &dyn Scene) {
        if self.state != CtrlState::Setup {
            return
        }

        if self.setup_retry_in > 0 {
            self.setup_retry_in -= 1;
            return
        }

        match bind(scene, &self.params.tag, &self.defaults) {
            Ok(binding) => {
                self.ramps.set_in_use(binding.axes());
                self.setup_error = None;
                self.msgs.push(self.num_cycles, format!(
                    "Setup complete, {} hinge(s)",
                    binding.actuators.len()
                ));
                self.binding = Some(binding);
                self.set_state(CtrlState::On);
            },
            Err(e) => {
                warn!("SteerCtrl setup failed: {}", e);
                self.setup_retry_in = self.params.setup_retry_periods;
                self.setup_error = Some(e);
            }
        }
    }
}

impl SteerCtrl {
    /// Create a new controller with the given parameters.
    pub fn new(params: Params) -> Result<Self, SteerCtrlError> {
        params.validate()?;

        Ok(Self {
            defaults: params.defaults,
            msgs: MsgQueue::new(params.msg_lifetime_cycles, params.max_msgs),
            params,
            ..Default::default()
        })
    }

    pub fn state(&self) -> CtrlState {
        self.state
    }

    pub fn defaults(&self) -> &SessionDefaults {
        &self.defaults
    }

    pub fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    pub fn ramps(&self) -> &RampBank {
        &self.ramps
    }

    pub fn messages(&self) -> &MsgQueue {
        &self.msgs
    }

    /// Build the status report for the current cycle.
    pub fn status_report(&self) -> StatusReport {
        let (num_actuators, seat_name, actuators) = match &self.binding {
            Some(b) => (
                b.actuators.len(),
                Some(b.seat_name.clone()),
                b.actuators.iter().map(ActuatorStatus::from_actuator).collect()
            ),
            None => (0, None, Vec::new())
        };

        StatusReport {
            state: self.state,
            num_actuators,
            seat_name,
            setup_error: self.setup_error.as_ref().map(|e| e.to_string()),
            setup_retry_in: self.setup_retry_in,
            auto_straighten: self.defaults.auto_straighten,
            actuators,
            messages: self.msgs.iter().map(String::from).collect(),
        }
    }

    /// Execute a runtime command list.
    ///
    /// Bad commands are reported without stopping the rest of the list.
    pub fn exec_cmd_list(&mut self, list: &str) {
        debug!("SteerCtrl command list: \"{}\"", list);

        for cmd in parse_cmd_list(list) {
            match cmd {
                Ok(RuntimeCmd::Straighten(switch)) => {
                    self.defaults.auto_straighten = switch.apply(self.defaults.auto_straighten);

                    if let Some(ref mut b) = self.binding {
                        for act in b.actuators.iter_mut() {
                            act.apply_defaults(&self.defaults);
                        }
                    }

                    let msg = format!(
                        "Auto-straighten {}",
                        if self.defaults.auto_straighten { "on" } else { "off" }
                    );
                    info!("{}", msg);
                    self.msgs.push(self.num_cycles, msg);
                },
                Ok(RuntimeCmd::Setup) => {
                    if let Some(mut b) = self.binding.take() {
                        for act in b.actuators.iter_mut() {
                            act.stop();
                        }
                    }

                    self.setup_retry_in = 0;
                    self.setup_error = None;
                    self.set_state(CtrlState::Setup);
                    self.msgs.push(self.num_cycles, "Running setup...");
                },
                Err(e) => {
                    warn!("{}", e);
                    self.msgs.push(self.num_cycles, e.to_string());
                }
            }
        }
    }

    /// Run one control tick, returning the velocities written this tick.
    fn tick(&mut self) -> Vec<f64> {
        if self.state == CtrlState::Setup {
            return Vec::new()
        }

        let input = match &self.binding {
            Some(b) => b.seat.borrow().input(),
            None => return Vec::new()
        };

        match (self.state, input.occupied) {
            (CtrlState::Off, false) => return Vec::new(),
            (CtrlState::Off, true) | (CtrlState::WindDown, true) => {
                self.set_state(CtrlState::On)
            },
            (CtrlState::On, false) => self.set_state(CtrlState::WindDown),
            _ => ()
        }

        // An empty seat reads as all zero whatever it reports
        let input = input.effective();

        // All filters are advanced before any actuator reads one
        self.ramps.update(&input);

        let ramps = &self.ramps;
        let velocities: Vec<f64> = match self.binding {
            Some(ref mut b) => b.actuators
                .iter_mut()
                .map(|act| {
                    let axis = act.axis();
                    act.update(axis.read(&input), ramps.get(axis))
                })
                .collect(),
            None => Vec::new()
        };

        if self.state == CtrlState::WindDown && velocities.iter().all(|v| *v == 0.0) {
            self.set_state(CtrlState::Off);
        }

        velocities
    }

    fn set_state(&mut self, state: CtrlState) {
        if state != self.state {
            info!("SteerCtrl {} -> {}", self.state, state);
            self.state = state;
        }
    }
}
