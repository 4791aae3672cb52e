//! # Telecommand module
//!
//! Telecommands are the instructions fed into the steering executable from a
//! script: new operator input frames for the control seat, and runtime command
//! lists as typed into the controller's argument field.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde_json::{self, Value};
use thiserror::Error;

// Internal
use crate::eqpt::seat::SeatInput;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand.
///
/// In JSON a telecommand is an object with a `"type"` string and, for
/// every type except `"NONE"`, a `"payload"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Tc {
    /// Does nothing, useful to pad out the end of a script.
    None,

    /// Replace the input frame read from the control seat.
    SeatInput(SeatInput),

    /// A comma-separated runtime command list.
    Command(String),
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("TC has an invalid type ({0})")]
    InvalidType(String),

    #[error("TC of type {0} is expected to have a payload but it doesn't")]
    MissingPayload(String),

    #[error("TC of type {0} has an invalid payload: {1}")]
    InvalidPayload(String, serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {

    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        // Parse the JSON string into a value
        let val: Value = match serde_json::from_str(json_str) {
            Ok(v) => v,
            Err(e) => return Err(TcParseError::InvalidJson(e))
        };

        // Get the type of the TC
        let tc_type = match val["type"].as_str() {
            Some(s) => s.to_uppercase(),
            None => return Err(TcParseError::InvalidType(String::from(
                "Expected \"type\" to be a string"
            )))
        };

        // NONE is the only type without a payload
        if tc_type == "NONE" {
            return Ok(Tc::None)
        }

        let payload = &val["payload"];
        if payload.is_null() {
            return Err(TcParseError::MissingPayload(tc_type))
        }

        match tc_type.as_str() {
            "SEAT" => serde_json::from_value(payload.clone())
                .map(Tc::SeatInput)
                .map_err(|e| TcParseError::InvalidPayload(tc_type.clone(), e)),
            "CMD" => match payload.as_str() {
                Some(s) => Ok(Tc::Command(String::from(s))),
                None => Err(TcParseError::InvalidPayload(
                    tc_type.clone(),
                    <serde_json::Error as serde::de::Error>::custom(
                        "expected the command list as a string"
                    )
                ))
            },
            _ => Err(TcParseError::InvalidType(
                format!("{} is not a recognised TC type", tc_type)
            ))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_seat_tc() {
        let tc = Tc::from_json(
            r#"{"type": "SEAT", "payload": {"occupied": true, "lateral": 0.5}}"#
        ).unwrap();

        match tc {
            Tc::SeatInput(s) => {
                assert!(s.occupied);
                assert_eq!(s.lateral, 0.5);
            },
            t => panic!("Expected a seat TC, got {:?}", t)
        }
    }

    #[test]
    fn test_cmd_tc() {
        let tc = Tc::from_json(r#"{"type": "cmd", "payload": "straighten off"}"#).unwrap();
        assert_eq!(tc, Tc::Command(String::from("straighten off")));
    }

    #[test]
    fn test_none_tc() {
        assert_eq!(Tc::from_json(r#"{"type": "NONE"}"#).unwrap(), Tc::None);
    }

    #[test]
    fn test_invalid_tcs() {
        assert!(matches!(
            Tc::from_json("{not json"),
            Err(TcParseError::InvalidJson(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": 4}"#),
            Err(TcParseError::InvalidType(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "WARP", "payload": 1}"#),
            Err(TcParseError::InvalidType(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "SEAT"}"#),
            Err(TcParseError::MissingPayload(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "CMD", "payload": 3}"#),
            Err(TcParseError::InvalidPayload(_, _))
        ));
    }
}
