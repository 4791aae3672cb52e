//! Simulated control seats

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::seat::SeatInput;

use crate::steer_ctrl::Seat;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A seat whose input is set from outside, e.g. by a script.
#[derive(Debug, Clone)]
pub struct SimSeat {
    name: String,
    input: SeatInput,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimSeat {
    /// Create an empty seat.
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            input: SeatInput::unoccupied(),
        }
    }

    pub fn set_input(&mut self, input: SeatInput) {
        self.input = input;
    }
}

impl Seat for SimSeat {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn input(&self) -> SeatInput {
        self.input
    }
}
