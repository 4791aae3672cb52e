//! Binding of actuators and the control seat to the scene's equipment

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, info, warn};
use thiserror::Error;

use super::{
    complete_from_name, config_from_name, parse_config, write_config, Actuator,
    Axis, JointRef, Scene, SeatRef, SessionDefaults,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The equipment the controller has been bound to.
pub struct Binding {
    pub actuators: Vec<Actuator>,
    pub seat: SeatRef,
    pub seat_name: String,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Reasons binding can fail. All are recoverable by changing the scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    #[error("No hinges detected.")]
    NoJoints,

    #[error(
        "Could not identify hinges. Please tag the hinges you want to use by \
        adding {0} to the name of them."
    )]
    NoTaggedJoints(String),

    #[error("No control seat detected.")]
    NoSeat,

    #[error(
        "Could not select control seat. Sit in one for setup to find or tag \
        it with {0}."
    )]
    SeatNotSelected(String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Binding {
    /// The axes used by the bound actuators.
    pub fn axes(&self) -> impl Iterator<Item = Axis> + '_ {
        self.actuators.iter().map(|a| a.axis())
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Bind to the joints and seat of a scene.
///
/// A lone joint is used whether or not it is tagged, otherwise only joints
/// whose name contains `tag` are used. A lone seat is always used, otherwise
/// the first seat which is occupied or tagged.
pub fn bind(
    scene: &dyn Scene,
    tag: &str,
    defaults: &SessionDefaults
) -> Result<Binding, BindError> {
    let tag_lower = tag.to_lowercase();

    // ---- JOINTS ----

    let joints = scene.joints();

    let selected: Vec<JointRef> = match joints.len() {
        0 => return Err(BindError::NoJoints),
        1 => joints,
        _ => joints
            .into_iter()
            .filter(|j| j.borrow().name().to_lowercase().contains(&tag_lower))
            .collect()
    };

    if selected.is_empty() {
        return Err(BindError::NoTaggedJoints(String::from(tag)))
    }

    // ---- SEAT ----

    let seats = scene.seats();

    let seat = match seats.len() {
        0 => return Err(BindError::NoSeat),
        1 => seats[0].clone(),
        _ => match seats.iter().find(|s| is_candidate_seat(s, &tag_lower)) {
            Some(s) => s.clone(),
            None => return Err(BindError::SeatNotSelected(String::from(tag)))
        }
    };
    let seat_name = seat.borrow().name();

    // ---- ACTUATORS ----

    let actuators = selected
        .into_iter()
        .map(|j| bind_actuator(j, tag, defaults))
        .collect::<Vec<_>>();

    info!(
        "Bound {} actuator(s) to control seat \"{}\"",
        actuators.len(), seat_name
    );

    Ok(Binding {
        actuators,
        seat,
        seat_name,
    })
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Whether a seat can be picked from several.
fn is_candidate_seat(seat: &SeatRef, tag_lower: &str) -> bool {
    let seat = seat.borrow();
    let occupied = seat.input().occupied;

    occupied || seat.name().to_lowercase().contains(tag_lower)
}

/// Build the actuator for a joint, normalising its persisted configuration.
fn bind_actuator(joint: JointRef, tag: &str, defaults: &SessionDefaults) -> Actuator {
    let (name, custom_data, travel) = {
        let j = joint.borrow();
        (j.name(), j.custom_data(), j.travel())
    };

    let config = match parse_config(&custom_data) {
        Ok(c) => complete_from_name(c, &name, tag),
        Err(e) => {
            warn!("{}: {}, using defaults from its name", name, e);
            config_from_name(&name, tag)
        }
    };

    let (low, high) = travel.limits();
    if config.centre < low || config.centre > high {
        warn!(
            "{}: centre {} is outside the travel [{}, {}], straightening to \
            the nearest limit",
            name, config.centre, low, high
        );
    }

    match write_config(&custom_data, &config) {
        Ok(text) => {
            if text != custom_data {
                debug!("{}: writing normalised configuration", name);
                joint.borrow_mut().set_custom_data(&text);
            }
        },
        Err(e) => warn!("{}: configuration not saved: {}", name, e)
    }

    Actuator::new(name, joint, config, defaults)
}
