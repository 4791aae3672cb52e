//! Module interfaces
//!
//! Control modules in `steer_exec` implement `State`, which splits a module
//! into one-off initialisation from a parameter file and a `proc` call made
//! once every control cycle. Modules which also need slower housekeeping,
//! such as retrying equipment discovery, implement `Supervised` as well. The
//! executable calls `supervise` on its low-rate cycle, before that cycle's
//! `proc`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A cyclically processed control module.
pub trait State {
    /// Data needed to initialise, usually a parameter file path.
    type InitData;
    /// Error raised if initialisation fails.
    type InitError;

    /// Data consumed by each cycle.
    type InputData;
    /// Data produced by each cycle.
    type OutputData;
    /// Report on the module's status after each cycle.
    type StatusReport;
    /// Error raised by a cycle. Modules which cannot fail use
    /// `std::convert::Infallible`.
    type ProcError;

    /// Initialise the module, replacing any existing state.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>;

    /// Process one control cycle.
    ///
    /// Returns the cycle's output and the module's status report.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}

/// Low-rate supervisory processing.
pub trait Supervised {
    /// What the supervisor needs access to, e.g. the equipment to discover.
    type Context: ?Sized;

    /// Perform one supervisory step.
    fn supervise(&mut self, context: &Self::Context);
}
