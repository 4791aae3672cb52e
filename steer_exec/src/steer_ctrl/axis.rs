//! Logical control axes

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::seat::SeatInput;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of logical control axes, including `Axis::None`.
pub const NUM_AXES: usize = 7;

/// Reads one seat channel.
type AxisAccessor = fn(&SeatInput) -> f64;

/// Accessor for each axis, in the order of the `Axis` discriminants.
const AXIS_TABLE: [(Axis, AxisAccessor); NUM_AXES] = [
    (Axis::Turn, read_lateral),
    (Axis::Forward, read_longitudinal),
    (Axis::Roll, read_roll),
    (Axis::Up, read_vertical),
    (Axis::Yaw, read_yaw),
    (Axis::Pitch, read_pitch),
    (Axis::None, read_none),
];

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The operator input channel which drives an actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Strafe left/right (A/D)
    Turn,
    /// Forward/back (W/S)
    Forward,
    /// Roll (Q/E)
    Roll,
    /// Up/down (space/C)
    Up,
    /// Yaw (mouse or stick horizontal)
    Yaw,
    /// Pitch (mouse or stick vertical)
    Pitch,
    /// No live input, the actuator only straightens.
    None,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; NUM_AXES] = [
        Axis::Turn,
        Axis::Forward,
        Axis::Roll,
        Axis::Up,
        Axis::Yaw,
        Axis::Pitch,
        Axis::None,
    ];

    /// Index of this axis into per-axis arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Read this axis's raw input from a seat input frame.
    pub fn read(self, input: &SeatInput) -> f64 {
        (AXIS_TABLE[self.index()].1)(input)
    }

    /// Whether the axis carries live operator input.
    pub fn is_live(self) -> bool {
        self != Axis::None
    }
}

impl Default for Axis {
    fn default() -> Self {
        Axis::Turn
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Axis::Turn => "turn",
            Axis::Forward => "forward",
            Axis::Roll => "roll",
            Axis::Up => "up",
            Axis::Yaw => "yaw",
            Axis::Pitch => "pitch",
            Axis::None => "none",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn read_lateral(input: &SeatInput) -> f64 {
    input.lateral
}

fn read_longitudinal(input: &SeatInput) -> f64 {
    input.longitudinal
}

fn read_roll(input: &SeatInput) -> f64 {
    input.roll
}

fn read_vertical(input: &SeatInput) -> f64 {
    input.vertical
}

fn read_yaw(input: &SeatInput) -> f64 {
    input.yaw
}

fn read_pitch(input: &SeatInput) -> f64 {
    input.pitch
}

fn read_none(_: &SeatInput) -> f64 {
    0.0
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_table_order() {
        for (i, (axis, _)) in AXIS_TABLE.iter().enumerate() {
            assert_eq!(axis.index(), i);
            assert_eq!(Axis::ALL[i], *axis);
        }
    }

    #[test]
    fn test_read_axes() {
        let input = SeatInput {
            occupied: true,
            lateral: 0.1,
            longitudinal: 0.2,
            vertical: 0.3,
            roll: 0.4,
            yaw: 0.5,
            pitch: 0.6,
        };

        assert_eq!(Axis::Turn.read(&input), 0.1);
        assert_eq!(Axis::Forward.read(&input), 0.2);
        assert_eq!(Axis::Up.read(&input), 0.3);
        assert_eq!(Axis::Roll.read(&input), 0.4);
        assert_eq!(Axis::Yaw.read(&input), 0.5);
        assert_eq!(Axis::Pitch.read(&input), 0.6);
        assert_eq!(Axis::None.read(&input), 0.0);
    }
}
