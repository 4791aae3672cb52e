//! # Control Seat Equipment

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A snapshot of the operator's input from a control seat.
///
/// All channels are normalised to approximately `[-1, 1]`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SeatInput {
    /// Whether an operator is sitting in (controlling from) the seat.
    pub occupied: bool,

    /// Strafe/turn input, positive to the right.
    pub lateral: f64,

    /// Forward/back input, positive forward.
    pub longitudinal: f64,

    /// Up/down input, positive up.
    pub vertical: f64,

    /// Roll input, positive clockwise.
    pub roll: f64,

    /// Yaw (mouse/stick horizontal) input, positive right.
    pub yaw: f64,

    /// Pitch (mouse/stick vertical) input, positive up.
    pub pitch: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SeatInput {
    /// An empty seat with no input on any channel.
    pub fn unoccupied() -> Self {
        Self::default()
    }

    /// The input the controller shall act on.
    ///
    /// When no operator is present every channel reads exactly zero,
    /// regardless of any stale values left in the frame.
    pub fn effective(&self) -> Self {
        if self.occupied {
            *self
        } else {
            Self::unoccupied()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_effective_input() {
        let stale = SeatInput {
            occupied: false,
            lateral: 1.0,
            pitch: -0.5,
            ..Default::default()
        };
        assert_eq!(stale.effective(), SeatInput::unoccupied());

        let live = SeatInput {
            occupied: true,
            lateral: 1.0,
            ..Default::default()
        };
        assert_eq!(live.effective(), live);
    }

    #[test]
    fn test_partial_json() {
        let input: SeatInput =
            serde_json::from_str(r#"{"occupied": true, "lateral": -1.0}"#).unwrap();
        assert!(input.occupied);
        assert_eq!(input.lateral, -1.0);
        assert_eq!(input.yaw, 0.0);
    }
}
