//! Main steering executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Telecommand processing from the script
//!         - Supervisory processing on the low-rate cycle (setup)
//!         - Steering control processing
//!         - Simulated scene integration
//!         - Archiving
//!
//! The loop runs in real time unless `--no-sleep` is given, in which case
//! cycles are executed back to back. Either way the script follows simulated
//! time, so runs are repeatable.

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use steer_lib::{
    data_store::DataStore,
    params::SteerExecParams,
    sim::SimScene,
    steer_ctrl::CtrlState,
};

mod tc_processor;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::{eyre, WrapErr}, Report};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use util::{
    archive::{Archived, Archiver},
    host,
    logger::{logger_init, LevelFilter},
    module::{State, Supervised},
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::Session,
};

// ---------------------------------------------------------------------------
// STRUCTURES
// ---------------------------------------------------------------------------

/// Command line options.
#[derive(Debug, StructOpt)]
#[structopt(name = "steer_exec", about = "Hinge steering controller on a simulated vehicle")]
struct Opt {
    /// Operator script to replay.
    #[structopt(short, long, parse(from_os_str))]
    script: Option<PathBuf>,

    /// Stop after this many cycles.
    #[structopt(short, long)]
    cycles: Option<u64>,

    /// Run cycles back to back instead of in real time.
    #[structopt(long)]
    no_sleep: bool,

    /// Log trace level output.
    #[structopt(short, long)]
    verbose: bool,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "steer_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    let level = if opt.verbose { LevelFilter::Trace } else { LevelFilter::Debug };
    logger_init(level, !opt.no_sleep, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Hinge Steering Executable\n");
    info!("Running on: {}", host::get_platform());
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opt);

    // ---- LOAD PARAMETERS ----

    let exec_params: SteerExecParams = util::params::load(
        "steer_exec.toml"
    ).wrap_err("Could not load exec params")?;
    exec_params.validate().map_err(|e| eyre!("Invalid exec params: {}", e))?;

    info!("Exec parameters loaded");

    // ---- INITIALISE TC SOURCE ----

    let mut script = match opt.script {
        Some(ref path) => {
            info!("Loading script from {:?}", path);

            let si = ScriptInterpreter::new(path)
                .wrap_err("Failed to load script")?;

            info!(
                "Loaded script lasts {:.02} s and contains {} TCs\n",
                si.get_duration(),
                si.get_num_tcs()
            );

            Some(si)
        },
        None => {
            info!("No script provided, the seat will stay empty\n");
            None
        }
    };

    if script.is_none() && opt.cycles.is_none() {
        return Err(eyre!("Without a script the number of cycles must be given"));
    }

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.steer_ctrl.init("steer_ctrl.toml", &session)
        .wrap_err("Failed to initialise SteerCtrl")?;
    info!("SteerCtrl init complete");

    ds.arch_steer_ctrl = Archiver::from_path(&session, "steer_ctrl.csv")
        .wrap_err("Failed to initialise the SteerCtrl archive")?;

    let mut scene = SimScene::from_params(&exec_params.scene);
    info!("Simulated scene has {} joint(s)", scene.num_joints());

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let cycle_period = Duration::from_secs_f64(exec_params.cycle_period_s());
    let mut script_done = false;

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(exec_params.low_rate_divisor, exec_params.cycle_frequency_hz);

        // ---- TELECOMMAND PROCESSING ----

        if let Some(ref mut si) = script {
            match si.get_pending_tcs(ds.sim_time_s) {
                PendingTcs::None => (),
                PendingTcs::Some(tcs) => {
                    for tc in tcs.iter() {
                        tc_processor::exec(&mut ds, &mut scene, tc);
                    }
                },
                PendingTcs::EndOfScript => {
                    if !script_done {
                        info!("End of script reached");
                        script_done = true;
                    }
                }
            }
        }

        // ---- SUPERVISORY PROCESSING ----

        if ds.is_low_rate_cycle {
            ds.steer_ctrl.supervise(&scene);
            info!("\n{}", ds.steer_ctrl.status_report());
        }

        // ---- STEERING CONTROL PROCESSING ----

        match ds.steer_ctrl.proc(&ds.steer_ctrl_input) {
            Ok((output, report)) => {
                ds.steer_ctrl_output = output;
                ds.steer_ctrl_status_rpt = report;
            },
            Err(e) => match e {}
        }

        // ---- SIMULATION ----

        scene.step(exec_params.cycle_period_s());

        // ---- WRITE ARCHIVES ----

        if let Err(e) = ds.write() {
            warn!("Could not write the SteerCtrl archive: {}", e);
        }

        // ---- EXIT CONDITIONS ----

        ds.cycle_end();

        let state = ds.steer_ctrl_output.state;
        if script_done && (state == CtrlState::Off || state == CtrlState::Setup) {
            info!("Script complete and steering is {}", state);
            break
        }

        if let Some(max_cycles) = opt.cycles {
            if ds.num_cycles >= max_cycles {
                info!("Cycle limit ({}) reached", max_cycles);
                break
            }
        }

        // ---- CYCLE MANAGEMENT ----

        if opt.no_sleep {
            continue
        }

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                ds.num_consec_cycle_overruns += 1;

                if ds.num_consec_cycle_overruns == 1
                    || ds.num_consec_cycle_overruns > exec_params.overrun_warn_limit
                {
                    warn!(
                        "Cycle overran by {:.06} s ({} consecutive)",
                        cycle_dur.as_secs_f64() - cycle_period.as_secs_f64(),
                        ds.num_consec_cycle_overruns
                    );
                }
            }
        }
    }

    // ---- SHUTDOWN ----

    let status_path = session
        .save_json("final_status.json", &ds.steer_ctrl_status_rpt)
        .wrap_err("Could not save the final status")?;
    info!("Final status saved to {:?}", status_path);

    info!("\n{}", ds.steer_ctrl_status_rpt);
    info!("End of execution after {} cycles", ds.num_cycles);

    Ok(())
}
