//! Parameter file loading
//!
//! Parameter files are TOML documents kept in the `params` directory of the
//! software root, deserialised straight into each module's `Params` struct.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use std::path::PathBuf;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An error that occurs during loading of a parameter file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The software root environment variable (HINGE_STEER_SW_ROOT) is not set")]
    SwRootNotSet,

    #[error("Cannot load the parameter file {0:?}: {1}")]
    FileLoadError(PathBuf, std::io::Error),

    #[error("Cannot read the parameter file: {0}")]
    DeserialiseError(toml::de::Error)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a parameter file
///
/// The file path is relative to the "params" directory in the software root.
pub fn load<P>(param_file_path: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned
{
    let path = crate::host::get_sw_root()
        .map_err(|_| LoadError::SwRootNotSet)?
        .join("params")
        .join(param_file_path);

    let params_str = read_to_string(&path)
        .map_err(|e| LoadError::FileLoadError(path.clone(), e))?;

    load_str(&params_str)
}

/// Parse parameters from a TOML string already held in memory.
pub fn load_str<P>(params_str: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned
{
    toml::from_str(params_str).map_err(LoadError::DeserialiseError)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct TestParams {
        speed: f64,
        tag: String,
    }

    #[test]
    fn test_load_str() {
        let p: TestParams = load_str("speed = 1.5\ntag = \"#steer\"").unwrap();
        assert_eq!(p.speed, 1.5);
        assert_eq!(p.tag, "#steer");

        assert!(matches!(
            load_str::<TestParams>("speed = \"fast\""),
            Err(LoadError::DeserialiseError(_))
        ));
    }
}
