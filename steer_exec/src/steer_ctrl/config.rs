//! Per-actuator configuration
//!
//! An actuator's configuration is persisted in its joint's custom data as a
//! TOML document with a `[hinge_steering]` table, for example:
//!
//! ```toml
//! [hinge_steering]
//! direction = -1
//! axis = "turn"
//! centre = 0.0
//! auto_straighten = true
//! ```
//!
//! Optional settings that are left out follow the session defaults. Other
//! tables in the document belong to other tools and are left untouched.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{is_valid_margin, Axis};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Name of the table holding the configuration.
pub const CONFIG_SECTION: &str = "hinge_steering";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Configuration of a single actuator as persisted with its joint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActuatorConfig {
    /// 1 for normal, -1 to invert the control sense.
    ///
    /// When left out the joint's name decides, see `config_from_name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<i8>,

    /// The input axis driving this actuator.
    pub axis: Axis,

    /// Rest position used when straightening.
    ///
    /// Units: radians for rotational joints, meters for linear joints
    pub centre: f64,

    /// Override of the auto-straighten default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_straighten: Option<bool>,

    /// Override of the safe limit default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_limit: Option<bool>,

    /// Override of the safe limit margin default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_limit_margin: Option<f64>,

    /// Override of the max speed default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

#[derive(Deserialize)]
struct ConfigDoc {
    hinge_steering: Option<ActuatorConfig>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Reasons a persisted configuration could not be used.
#[derive(Debug, Error)]
pub enum ParseIssue {
    #[error("No configuration present")]
    Empty,

    #[error("Configuration is not valid TOML: {0}")]
    InvalidToml(toml::de::Error),

    #[error("No [hinge_steering] table in the configuration")]
    MissingSection,

    #[error("direction must be 1 or -1, found {0}")]
    InvalidDirection(i8),

    #[error("{field} is out of range ({value})")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Reasons a configuration could not be written back.
#[derive(Debug, Error)]
pub enum ConfigWriteError {
    #[error("Existing custom data is not TOML and would be overwritten")]
    ForeignText,

    #[error("Could not serialise the configuration: {0}")]
    Serialise(#[from] toml::ser::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            direction: None,
            axis: Axis::Turn,
            centre: 0.0,
            auto_straighten: None,
            safe_limit: None,
            safe_limit_margin: None,
            speed: None,
        }
    }
}

impl ActuatorConfig {
    /// Check every value is within its allowed range.
    pub fn validate(&self) -> Result<(), ParseIssue> {
        if let Some(d) = self.direction {
            if d != 1 && d != -1 {
                return Err(ParseIssue::InvalidDirection(d))
            }
        }

        if !self.centre.is_finite() {
            return Err(ParseIssue::OutOfRange {
                field: "centre",
                value: self.centre,
            })
        }

        if let Some(m) = self.safe_limit_margin {
            if !is_valid_margin(m) {
                return Err(ParseIssue::OutOfRange {
                    field: "safe_limit_margin",
                    value: m,
                })
            }
        }

        if let Some(s) = self.speed {
            if !s.is_finite() || s < 0.0 {
                return Err(ParseIssue::OutOfRange {
                    field: "speed",
                    value: s,
                })
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Parse an actuator configuration from a joint's custom data.
///
/// Fallback on failure is left to the caller.
pub fn parse_config(text: &str) -> Result<ActuatorConfig, ParseIssue> {
    if text.trim().is_empty() {
        return Err(ParseIssue::Empty)
    }

    let doc: ConfigDoc = toml::from_str(text).map_err(ParseIssue::InvalidToml)?;

    let config = doc.hinge_steering.ok_or(ParseIssue::MissingSection)?;
    config.validate()?;

    Ok(config)
}

/// Build the default configuration for a joint from its name.
///
/// A name containing `-<tag>` inverts the joint, everything else follows the
/// defaults.
pub fn config_from_name(name: &str, tag: &str) -> ActuatorConfig {
    let inverted = name
        .to_lowercase()
        .contains(&format!("-{}", tag.to_lowercase()));

    ActuatorConfig {
        direction: Some(if inverted { -1 } else { 1 }),
        ..Default::default()
    }
}

/// Fill in the settings a persisted configuration leaves to the joint's name.
pub fn complete_from_name(config: ActuatorConfig, name: &str, tag: &str) -> ActuatorConfig {
    ActuatorConfig {
        direction: config.direction.or(config_from_name(name, tag).direction),
        ..config
    }
}

/// Write a configuration into existing custom data, returning the new text.
///
/// Tables other than `[hinge_steering]` are kept. Custom data which isn't
/// TOML is never overwritten.
pub fn write_config(existing: &str, config: &ActuatorConfig) -> Result<String, ConfigWriteError> {
    let mut doc = if existing.trim().is_empty() {
        toml::value::Table::new()
    }
    else {
        match existing.parse::<toml::Value>() {
            Ok(toml::Value::Table(t)) => t,
            _ => return Err(ConfigWriteError::ForeignText)
        }
    };

    doc.insert(String::from(CONFIG_SECTION), toml::Value::try_from(config)?);

    Ok(toml::to_string(&toml::Value::Table(doc))?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(r#"
            [hinge_steering]
            direction = -1
            axis = "pitch"
            centre = 0.25
            auto_straighten = false
            safe_limit = true
            safe_limit_margin = 0.7
            speed = 2.0
        "#).unwrap();

        assert_eq!(config.direction, Some(-1));
        assert_eq!(config.axis, Axis::Pitch);
        assert_eq!(config.centre, 0.25);
        assert_eq!(config.auto_straighten, Some(false));
        assert_eq!(config.safe_limit, Some(true));
        assert_eq!(config.safe_limit_margin, Some(0.7));
        assert_eq!(config.speed, Some(2.0));
    }

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config("[hinge_steering]\naxis = \"none\"\n").unwrap();

        assert_eq!(config.direction, None);
        assert_eq!(config.axis, Axis::None);
        assert_eq!(config.auto_straighten, None);
        assert_eq!(config.speed, None);
    }

    #[test]
    fn test_parse_issues() {
        assert!(matches!(parse_config("  \n"), Err(ParseIssue::Empty)));
        assert!(matches!(
            parse_config("this is my favourite hinge"),
            Err(ParseIssue::InvalidToml(_))
        ));
        assert!(matches!(
            parse_config("[other_script]\nvalue = 1\n"),
            Err(ParseIssue::MissingSection)
        ));
        assert!(matches!(
            parse_config("[hinge_steering]\ndirection = 2\n"),
            Err(ParseIssue::InvalidDirection(2))
        ));
        assert!(matches!(
            parse_config("[hinge_steering]\nsafe_limit_margin = 1.5\n"),
            Err(ParseIssue::OutOfRange { field: "safe_limit_margin", .. })
        ));
        assert!(matches!(
            parse_config("[hinge_steering]\naxis = \"sideways\"\n"),
            Err(ParseIssue::InvalidToml(_))
        ));
        assert!(matches!(
            parse_config("[hinge_steering]\nspeeed = 1.0\n"),
            Err(ParseIssue::InvalidToml(_))
        ));
    }

    #[test]
    fn test_config_from_name() {
        assert_eq!(config_from_name("Hinge #steer", "#steer").direction, Some(1));
        assert_eq!(config_from_name("Hinge -#STEER", "#steer").direction, Some(-1));
        assert_eq!(
            config_from_name("Hinge", "#steer"),
            ActuatorConfig { direction: Some(1), ..Default::default() }
        );
    }

    #[test]
    fn test_complete_from_name() {
        let partial = parse_config("[hinge_steering]\naxis = \"pitch\"\n").unwrap();
        let config = complete_from_name(partial, "Rear -#steer", "#steer");
        assert_eq!(config.direction, Some(-1));
        assert_eq!(config.axis, Axis::Pitch);

        // An explicit direction wins over the name
        let explicit = parse_config("[hinge_steering]\ndirection = 1\n").unwrap();
        assert_eq!(complete_from_name(explicit, "Rear -#steer", "#steer").direction, Some(1));
    }

    #[test]
    fn test_write_config_keeps_other_tables() {
        let config = ActuatorConfig {
            direction: Some(-1),
            speed: Some(0.5),
            ..Default::default()
        };

        let text = write_config("[other_script]\nvalue = 1\n", &config).unwrap();

        let doc: toml::Value = text.parse().unwrap();
        assert_eq!(doc["other_script"]["value"].as_integer(), Some(1));
        assert_eq!(parse_config(&text).unwrap(), config);

        // Written configs are stable
        assert_eq!(write_config(&text, &config).unwrap(), text);
    }

    #[test]
    fn test_write_config_refuses_foreign_text() {
        assert!(matches!(
            write_config("some notes about this hinge", &ActuatorConfig::default()),
            Err(ConfigWriteError::ForeignText)
        ));

        let text = write_config("", &ActuatorConfig::default()).unwrap();
        assert_eq!(parse_config(&text).unwrap(), ActuatorConfig::default());
    }
}
