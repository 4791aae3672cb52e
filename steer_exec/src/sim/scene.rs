//! Simulated scene holding a vehicle's equipment

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::seat::SeatInput;
use log::warn;
use std::{cell::RefCell, rc::Rc};

use super::{SceneParams, SimJoint, SimSeat};
use crate::steer_ctrl::{JointRef, Scene, Seat, SeatRef};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A set of simulated joints and seats.
///
/// The scene owns the equipment, the controller only holds shared handles
/// to it.
#[derive(Default)]
pub struct SimScene {
    joints: Vec<Rc<RefCell<SimJoint>>>,
    seats: Vec<Rc<RefCell<SimSeat>>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimScene {
    /// Build a scene from its parameters.
    pub fn from_params(params: &SceneParams) -> Self {
        let mut scene = Self::default();

        for j in params.joints.iter() {
            scene.add_joint(SimJoint::from_params(j));
        }
        for s in params.seats.iter() {
            scene.add_seat(&s.name);
        }

        scene
    }

    /// Add a joint, returning a handle to it.
    pub fn add_joint(&mut self, joint: SimJoint) -> Rc<RefCell<SimJoint>> {
        let joint = Rc::new(RefCell::new(joint));
        self.joints.push(joint.clone());
        joint
    }

    /// Add an empty seat, returning a handle to it.
    pub fn add_seat(&mut self, name: &str) -> Rc<RefCell<SimSeat>> {
        let seat = Rc::new(RefCell::new(SimSeat::new(name)));
        self.seats.push(seat.clone());
        seat
    }

    /// Set the input of every seat called `name`.
    ///
    /// Returns false if there is no such seat.
    pub fn set_seat_input(&mut self, name: &str, input: SeatInput) -> bool {
        let mut found = false;

        for s in self.seats.iter() {
            if s.borrow().name() == name {
                s.borrow_mut().set_input(input);
                found = true;
            }
        }

        if !found {
            warn!("No seat called \"{}\" in the scene", name);
        }

        found
    }

    /// Set the input of the first seat, if there is one.
    pub fn set_first_seat_input(&mut self, input: SeatInput) -> bool {
        match self.seats.first() {
            Some(s) => {
                s.borrow_mut().set_input(input);
                true
            },
            None => false
        }
    }

    /// Advance every joint by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        for j in self.joints.iter() {
            j.borrow_mut().step(dt);
        }
    }

    pub fn num_joints(&self) -> usize {
        self.joints.len()
    }
}

impl Scene for SimScene {
    fn joints(&self) -> Vec<JointRef> {
        self.joints.iter().map(|j| -> JointRef { j.clone() }).collect()
    }

    fn seats(&self) -> Vec<SeatRef> {
        self.seats.iter().map(|s| -> SeatRef { s.clone() }).collect()
    }
}
