//! Session management
//!
//! A session is one run of an executable. It owns a timestamped directory
//! under the software root holding the log file, the CSV archives and any
//! data saved at shutdown.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use chrono::{DateTime, Utc};
use conquer_once::OnceCell;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal imports
use crate::time;

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static SESSION_EPOCH: OnceCell<DateTime<Utc>> = OnceCell::uninit();

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Format of the timestamp in session directory names, see
/// https://docs.rs/chrono/0.4.11/chrono/format/strftime/index.html
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Name of the archive directory within a session.
const ARCH_DIR_NAME: &str = "arch";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A struct storing information about the current session
#[derive(Clone, Debug)]
pub struct Session {
    /// The root directory for this session
    pub session_root: PathBuf,

    /// The root directory for this session's archives
    pub arch_root: PathBuf,

    /// The path to the session's log file
    pub log_file_path: PathBuf,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors associated with the session module.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("The software root environment variable (HINGE_STEER_SW_ROOT) is not set")]
    SwRootNotSet,

    #[error("Cannot create the session directory: {0}")]
    CannotCreateDir(std::io::Error),

    #[error(
        "Cannot initialise the session epoch, has a session already been \
         started? (conquer_once error: {0})"
    )]
    CannotInitEpoch(conquer_once::TryInitError),

    #[error("Cannot get the epoch time, did you forget to initialise the session?")]
    CannotGetEpoch,

    #[error("Cannot save {0:?}: {1}")]
    SaveError(PathBuf, String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Session {
    /// Start a new session within the given directory.
    ///
    /// This will create a new session directory named `{exec_name}_{timestamp}`
    /// inside `sessions_dir`, which is relative to the software root.
    pub fn new(exec_name: &str, sessions_dir: &str) -> Result<Self, SessionError> {
        SESSION_EPOCH
            .try_init_once(Utc::now)
            .map_err(SessionError::CannotInitEpoch)?;

        let timestamp = SESSION_EPOCH
            .get()
            .ok_or(SessionError::CannotGetEpoch)?
            .format(TIMESTAMP_FORMAT);

        let root = crate::host::get_sw_root().map_err(|_| SessionError::SwRootNotSet)?;

        let session_root = root
            .join(sessions_dir)
            .join(format!("{}_{}", exec_name, timestamp));
        let arch_root = session_root.join(ARCH_DIR_NAME);

        // Creating the archive dir creates the session dir with it
        fs::create_dir_all(&arch_root).map_err(SessionError::CannotCreateDir)?;

        Ok(Session {
            log_file_path: session_root.join(format!("{}.log", exec_name)),
            session_root,
            arch_root,
        })
    }

    /// Save data as pretty-printed JSON at a path relative to the session
    /// root, returning the full path written.
    pub fn save_json<P, T>(&self, path: P, data: &T) -> Result<PathBuf, SessionError>
    where
        P: AsRef<Path>,
        T: Serialize
    {
        let full_path = self.session_root.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(SessionError::CannotCreateDir)?;
        }

        let file = File::create(&full_path)
            .map_err(|e| SessionError::SaveError(full_path.clone(), e.to_string()))?;

        serde_json::to_writer_pretty(file, data)
            .map_err(|e| SessionError::SaveError(full_path.clone(), e.to_string()))?;

        Ok(full_path)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the number of seconds elapsed since the start of the session.
///
/// Returns zero if the session has not been started yet, which allows
/// modules that log to be used outside of an executable (e.g. in tests).
pub fn get_elapsed_seconds() -> f64 {
    match SESSION_EPOCH.get() {
        Some(e) => time::duration_to_seconds(Utc::now() - *e)
            .unwrap_or(std::f64::NAN),
        None => 0.0,
    }
}

/// Return a reference to the session's epoch.
///
/// # Panics
/// - This function will panic if the session epoch has not been
///   initialised, which is performed on creating a new Session instance.
pub fn get_epoch() -> &'static DateTime<Utc> {
    match SESSION_EPOCH.get() {
        Some(e) => e,
        None => panic!("Cannot get the session epoch!"),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_elapsed_without_session() {
        // No test in this crate starts a session
        assert_eq!(get_elapsed_seconds(), 0.0);
    }

    #[test]
    fn test_save_json() {
        let session = Session {
            session_root: std::env::temp_dir().join("util_session_test_save_json"),
            arch_root: PathBuf::new(),
            log_file_path: PathBuf::new(),
        };

        let path = session.save_json("status/final.json", &vec![1, 2]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.split_whitespace().collect::<String>(), "[1,2]");

        std::fs::remove_dir_all(&session.session_root).ok();
    }
}
