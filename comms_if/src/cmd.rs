//! # Runtime command lists
//!
//! The controller accepts a comma-separated list of commands each time it is
//! invoked with an argument, for example `"straighten off, setup"`. Tokens
//! are case-insensitive and surrounding whitespace is ignored.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A recognised runtime command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeCmd {
    /// Set or toggle the global auto-straighten default.
    Straighten(Switch),

    /// Drop the current binding and run setup again.
    Setup,
}

/// A tri-state switch argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
    Toggle,
}

/// Problems with a single token in a command list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CmdParseError {
    #[error("Unrecognised command \"{0}\"")]
    Unrecognised(String),

    #[error("Command \"{cmd}\" does not accept the argument \"{arg}\"")]
    InvalidArgument { cmd: String, arg: String },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Switch {
    /// Apply the switch to a current value.
    pub fn apply(self, current: bool) -> bool {
        match self {
            Switch::On => true,
            Switch::Off => false,
            Switch::Toggle => !current,
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Parse a comma-separated command list.
///
/// Each non-empty token produces one entry, so a bad token never hides the
/// good ones around it.
pub fn parse_cmd_list(list: &str) -> Vec<Result<RuntimeCmd, CmdParseError>> {
    list.split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(parse_cmd)
        .collect()
}

/// Parse a single command token.
pub fn parse_cmd(token: &str) -> Result<RuntimeCmd, CmdParseError> {
    let lower = token.to_lowercase();
    let mut words = lower.split_whitespace();

    let cmd = match words.next() {
        Some(c) => c,
        None => return Err(CmdParseError::Unrecognised(String::from(token)))
    };
    let arg = words.next();

    if words.next().is_some() {
        return Err(CmdParseError::Unrecognised(String::from(token)))
    }

    match (cmd, arg) {
        ("straighten", None) => Ok(RuntimeCmd::Straighten(Switch::Toggle)),
        ("straighten", Some("on")) => Ok(RuntimeCmd::Straighten(Switch::On)),
        ("straighten", Some("off")) => Ok(RuntimeCmd::Straighten(Switch::Off)),
        ("straighten", Some("toggle")) => Ok(RuntimeCmd::Straighten(Switch::Toggle)),
        ("setup", None) => Ok(RuntimeCmd::Setup),
        ("straighten", Some(a)) | ("setup", Some(a)) => Err(CmdParseError::InvalidArgument {
            cmd: String::from(cmd),
            arg: String::from(a),
        }),
        _ => Err(CmdParseError::Unrecognised(String::from(token)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_straighten_cmds() {
        assert_eq!(parse_cmd("straighten"), Ok(RuntimeCmd::Straighten(Switch::Toggle)));
        assert_eq!(parse_cmd("Straighten ON"), Ok(RuntimeCmd::Straighten(Switch::On)));
        assert_eq!(parse_cmd("  straighten   off "), Ok(RuntimeCmd::Straighten(Switch::Off)));
        assert_eq!(
            parse_cmd("straighten maybe"),
            Err(CmdParseError::InvalidArgument {
                cmd: String::from("straighten"),
                arg: String::from("maybe")
            })
        );
    }

    #[test]
    fn test_cmd_list() {
        let cmds = parse_cmd_list("straighten off, warp 9,, setup");

        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[0], Ok(RuntimeCmd::Straighten(Switch::Off)));
        assert_eq!(cmds[1], Err(CmdParseError::Unrecognised(String::from("warp 9"))));
        assert_eq!(cmds[2], Ok(RuntimeCmd::Setup));

        assert!(parse_cmd_list("").is_empty());
        assert!(parse_cmd_list(" , ").is_empty());
    }

    #[test]
    fn test_switch() {
        assert!(Switch::On.apply(false));
        assert!(!Switch::Off.apply(true));
        assert!(Switch::Toggle.apply(false));
        assert!(!Switch::Toggle.apply(true));
    }
}
