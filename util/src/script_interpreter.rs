//! # Script interpreter module
//!
//! This module provides an interpreter for operator scripts, allowing
//! telecommands (seat input frames and runtime command lists) to be replayed
//! into the steering executable at set times.
//!
//! Each entry in a script is written as `<time_s>: <tc json>;`, for example:
//!
//! ```text
//! 0.5: {"type": "SEAT", "payload": {"occupied": true, "lateral": 1.0}};
//! 2.0: {"type": "CMD", "payload": "straighten off"};
//! ```
//!
//! Anything which doesn't match this pattern (such as comment lines) is
//! ignored.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use comms_if::tc::{Tc, TcParseError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
pub struct Command {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    /// The Telecommand to run
    tc: Tc
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use
/// `.get_pending_tcs` to acquire a list of telecommands that need executing.
pub struct ScriptInterpreter {
    script_path: Option<PathBuf>,
    cmds: VecDeque<Command>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error("Could not build the script pattern: {0}")]
    PatternError(regex::Error),

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid TC at {0} s: {1}")]
    InvalidTc(f64, TcParseError)
}

pub enum PendingTcs {
    None,
    Some(Vec<Tc>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());

        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        // Load the script into a string
        let script = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => return Err(ScriptError::ScriptLoadError(e))
        };

        let mut si = Self::from_script_str(&script)?;
        si.script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script_str(script: &str) -> Result<Self, ScriptError> {

        // Empty queue of commands
        let mut tc_queue: VecDeque<Command> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .map_err(ScriptError::PatternError)?;

        for cap in re.captures_iter(script) {
            let time_str = cap.get(1).map(|m| m.as_str()).unwrap_or_default();
            let tc_str = cap.get(3).map(|m| m.as_str()).unwrap_or_default();

            // Parse the exec time
            let exec_time_s: f64 = match time_str.parse() {
                Ok(t) => t,
                Err(e) => return Err(
                    ScriptError::InvalidTimestamp(format!("{}", e)))
            };

            // Parse the TC from the payload. The scripts contain JSON only.
            let tc = match Tc::from_json(tc_str) {
                Ok(c) => c,
                Err(e) => return Err(ScriptError::InvalidTc(
                    exec_time_s, e
                ))
            };

            tc_queue.push_back(Command {
                exec_time_s,
                tc
            });
        }

        if tc_queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        // Scripts may be written out of order, execution must not be
        tc_queue.make_contiguous().sort_by(|a, b| {
            a.exec_time_s
                .partial_cmp(&b.exec_time_s)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(ScriptInterpreter {
            script_path: None,
            cmds: tc_queue
        })
    }

    /// Return the TCs due at or before `current_time_s`.
    ///
    /// The current time is supplied by the caller so that scripts follow the
    /// simulated clock rather than wall time.
    pub fn get_pending_tcs(&mut self, current_time_s: f64) -> PendingTcs {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.cmds.is_empty() {
            return PendingTcs::EndOfScript
        }

        let mut tc_vec: Vec<Tc> = vec![];

        // Pop items from the queue while their exec time has been reached
        while let Some(cmd) = self.cmds.front() {
            if cmd.exec_time_s > current_time_s {
                break;
            }

            if let Some(cmd) = self.cmds.pop_front() {
                tc_vec.push(cmd.tc);
            }
        }

        if !tc_vec.is_empty() {
            PendingTcs::Some(tc_vec)
        }
        else {
            PendingTcs::None
        }
    }

    /// Get the path the script was loaded from, if it came from a file.
    pub fn get_script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }

    /// Get the number of TCs remaining in the script
    pub fn get_num_tcs(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SCRIPT: &str = r#"
# Turn right then let go
2.0: {"type": "CMD", "payload": "straighten off"};
0.0: {"type": "SEAT", "payload": {"occupied": true, "lateral": 1.0}};
1.5: {"type": "SEAT", "payload": {"occupied": true}};
"#;

    #[test]
    fn test_pending_tcs() {
        let mut si = ScriptInterpreter::from_script_str(SCRIPT).unwrap();

        assert_eq!(si.get_num_tcs(), 3);
        assert_eq!(si.get_duration(), 2.0);
        assert!(si.get_script_path().is_none());

        match si.get_pending_tcs(0.0) {
            PendingTcs::Some(tcs) => {
                assert_eq!(tcs.len(), 1);
                assert!(matches!(tcs[0], Tc::SeatInput(_)));
            },
            _ => panic!("Expected the first seat TC")
        }

        assert!(matches!(si.get_pending_tcs(1.0), PendingTcs::None));

        match si.get_pending_tcs(5.0) {
            PendingTcs::Some(tcs) => {
                assert_eq!(tcs.len(), 2);
                assert_eq!(tcs[1], Tc::Command(String::from("straighten off")));
            },
            _ => panic!("Expected the remaining TCs")
        }

        assert!(matches!(si.get_pending_tcs(6.0), PendingTcs::EndOfScript));
    }

    #[test]
    fn test_bad_scripts() {
        assert!(matches!(
            ScriptInterpreter::from_script_str("# nothing here"),
            Err(ScriptError::ScriptEmpty)
        ));
        assert!(matches!(
            ScriptInterpreter::from_script_str(r#"1.0: {"type": "WARP", "payload": 9};"#),
            Err(ScriptError::InvalidTc(_, _))
        ));
        assert!(matches!(
            ScriptInterpreter::new("/definitely/not/a/script.tcs"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }
}
