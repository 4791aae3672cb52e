//! # Telecommand processor module
//!
//! The telecommand processor handles TCs coming from the script.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, warn};

// Internal
use comms_if::tc::Tc;
use steer_lib::{data_store::DataStore, sim::SimScene};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Seat input goes to the scene's first seat, command lists are queued for
/// SteerCtrl. Several command lists on one cycle are joined.
pub(crate) fn exec(ds: &mut DataStore, scene: &mut SimScene, tc: &Tc) {

    match tc {
        Tc::None => (),
        Tc::SeatInput(input) => {
            debug!("Recieved seat input: {:?}", input);
            if !scene.set_first_seat_input(*input) {
                warn!("Seat input recieved but the scene has no seats");
            }
        },
        Tc::Command(list) => {
            debug!("Recieved command list \"{}\"", list);
            ds.steer_ctrl_input.cmd_list = Some(match ds.steer_ctrl_input.cmd_list.take() {
                Some(prev) => format!("{},{}", prev, list),
                None => list.clone()
            });
        }
    }

}
