//! Ramp filters
//!
//! A ramp filter counts how many cycles its axis has been held in each
//! direction. The counts are used to ease actuators up to speed over
//! `RAMP_CEILING` cycles, and to coast them back down at the same rate when
//! the input is released.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::seat::SeatInput;
use serde::Serialize;

use super::{Axis, NUM_AXES, RAMP_CEILING};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Held-direction counters for one axis.
///
/// At most one of the two counters is non-zero at any time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RampFilter {
    held_positive: u32,
    held_negative: u32,
}

/// One ramp filter per axis, plus which axes actuators are bound to.
///
/// Filters persist for the whole session, so rebinding keeps their counts.
#[derive(Debug, Default, Clone)]
pub struct RampBank {
    filters: [RampFilter; NUM_AXES],
    in_use: [bool; NUM_AXES],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RampFilter {
    /// Advance the filter by one cycle with the axis's raw input.
    pub fn update(&mut self, raw_input: f64) {
        if raw_input > 0.0 {
            self.held_positive = (self.held_positive + 1).min(RAMP_CEILING);
            self.held_negative = 0;
        }
        else if raw_input < 0.0 {
            self.held_negative = (self.held_negative + 1).min(RAMP_CEILING);
            self.held_positive = 0;
        }
        else {
            self.held_positive = self.held_positive.saturating_sub(1);
            self.held_negative = self.held_negative.saturating_sub(1);
        }
    }

    /// Cycles the input has been positive.
    pub fn held_positive(&self) -> u32 {
        self.held_positive
    }

    /// Cycles the input has been negative.
    pub fn held_negative(&self) -> u32 {
        self.held_negative
    }

    /// Positive hold as a fraction of the ceiling, in [0, 1].
    pub fn positive_frac(&self) -> f64 {
        self.held_positive as f64 / RAMP_CEILING as f64
    }

    /// Negative hold as a fraction of the ceiling, in [0, 1].
    pub fn negative_frac(&self) -> f64 {
        self.held_negative as f64 / RAMP_CEILING as f64
    }

    /// Combined hold as a fraction of the ceiling, in [0, 1].
    pub fn held_frac(&self) -> f64 {
        (self.held_positive + self.held_negative) as f64 / RAMP_CEILING as f64
    }

    /// True if neither direction is held.
    pub fn is_at_rest(&self) -> bool {
        self.held_positive == 0 && self.held_negative == 0
    }
}

impl RampBank {
    /// Mark which axes are in use. Axes without live input are never marked.
    pub fn set_in_use<I>(&mut self, axes: I)
    where
        I: IntoIterator<Item = Axis>
    {
        self.in_use = [false; NUM_AXES];

        for axis in axes {
            if axis.is_live() {
                self.in_use[axis.index()] = true;
            }
        }
    }

    /// Whether the filter for the axis is updated each cycle.
    pub fn is_in_use(&self, axis: Axis) -> bool {
        self.in_use[axis.index()]
    }

    /// Advance the filter of every axis in use.
    ///
    /// Must be called once per cycle before any actuator reads a filter.
    pub fn update(&mut self, input: &SeatInput) {
        for axis in Axis::ALL.iter() {
            if self.in_use[axis.index()] {
                self.filters[axis.index()].update(axis.read(input));
            }
        }
    }

    /// Get the filter for an axis.
    pub fn get(&self, axis: Axis) -> &RampFilter {
        &self.filters[axis.index()]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ramp_up_saturates() {
        let mut f = RampFilter::default();
        let mut last = 0;

        for _ in 0..(2 * RAMP_CEILING) {
            f.update(0.7);
            assert!(f.held_positive() >= last);
            assert!(f.held_positive() <= RAMP_CEILING);
            assert_eq!(f.held_negative(), 0);
            last = f.held_positive();
        }

        assert_eq!(f.held_positive(), RAMP_CEILING);
        assert_eq!(f.positive_frac(), 1.0);
    }

    #[test]
    fn test_release_decays() {
        let mut f = RampFilter::default();
        for _ in 0..10 {
            f.update(-1.0);
        }
        assert_eq!(f.held_negative(), 10);

        let mut last = f.held_negative();
        for _ in 0..20 {
            f.update(0.0);
            assert!(f.held_negative() <= last);
            last = f.held_negative();
        }

        assert!(f.is_at_rest());
    }

    #[test]
    fn test_direction_change_resets_opposite() {
        let mut f = RampFilter::default();
        for _ in 0..5 {
            f.update(1.0);
        }

        f.update(-0.2);
        assert_eq!(f.held_positive(), 0);
        assert_eq!(f.held_negative(), 1);

        // Alternating input never leaves both counters set
        for i in 0..50 {
            f.update(if i % 3 == 0 { 1.0 } else if i % 3 == 1 { -1.0 } else { 0.0 });
            assert!(f.held_positive() == 0 || f.held_negative() == 0);
        }
    }

    #[test]
    fn test_nan_input_decays() {
        let mut f = RampFilter::default();
        f.update(1.0);
        f.update(std::f64::NAN);
        assert!(f.is_at_rest());
    }

    #[test]
    fn test_bank_updates_only_axes_in_use() {
        let mut bank = RampBank::default();
        bank.set_in_use(vec![Axis::Turn, Axis::None, Axis::Turn]);

        assert!(bank.is_in_use(Axis::Turn));
        assert!(!bank.is_in_use(Axis::None));
        assert!(!bank.is_in_use(Axis::Pitch));

        let input = SeatInput {
            occupied: true,
            lateral: 1.0,
            pitch: 1.0,
            ..Default::default()
        };
        bank.update(&input);

        assert_eq!(bank.get(Axis::Turn).held_positive(), 1);
        assert!(bank.get(Axis::Pitch).is_at_rest());
        assert!(bank.get(Axis::None).is_at_rest());
    }
}
