//! Typed commands parsed from an input line

use std::collections::BTreeMap;
use std::time::Duration;

use thiserror::Error;

use crate::ops::devices::Registration;
use crate::repl::tokenizer::{self, TokenizeError};
use crate::tracker;

pub const USAGE_REGISTER: &str =
    "register <device_id> [--name NAME] [--type TYPE] [--status STATUS]";
pub const USAGE_SET_STATUS: &str = "set-status <device_id> <status>";
pub const USAGE_GET_INFO: &str = "get-info <device_id>";
pub const USAGE_INITIATE_ACTION: &str =
    "initiate-action <device_id> <action_type> [--params KEY=VALUE ...]";
pub const USAGE_ACTION_STATUS: &str = "action-status <action_id>";
pub const USAGE_POLL_ACTION: &str = "poll-action <action_id> [--interval SECONDS]";

/// One usage line per command, in help order
pub const HELP_LINES: &[&str] = &[
    "list",
    USAGE_REGISTER,
    USAGE_SET_STATUS,
    USAGE_GET_INFO,
    USAGE_INITIATE_ACTION,
    USAGE_ACTION_STATUS,
    USAGE_POLL_ACTION,
    "help",
    "exit",
];

/// A validated command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Register(Registration),
    SetStatus {
        device_id: String,
        status: String,
    },
    GetInfo {
        device_id: String,
    },
    InitiateAction {
        device_id: String,
        action_type: String,
        params: BTreeMap<String, String>,
        /// `--params` entries without `=`, skipped
        skipped: Vec<String>,
    },
    ActionStatus {
        action_id: String,
    },
    PollAction {
        action_id: String,
        /// Falls back to the configured interval when absent
        interval: Option<Duration>,
    },
    Help,
    Exit,
}

/// Input rejected before any remote call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("{0}")]
    Tokenize(#[from] TokenizeError),

    #[error("{missing} required\nUsage: {usage}")]
    MissingArguments {
        missing: &'static str,
        usage: &'static str,
    },

    #[error("Invalid interval value")]
    InvalidInterval(String),

    #[error("Unknown command: {0}")]
    Unknown(String),
}

impl Command {
    /// Parse a line; `None` for blank input
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let words = tokenizer::split(line)?;
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match name.to_lowercase().as_str() {
            "list" => Command::List,
            "register" => parse_register(args)?,
            "set-status" => {
                let [device_id, status, ..] = args else {
                    return Err(missing("Device ID and status", USAGE_SET_STATUS));
                };
                Command::SetStatus {
                    device_id: device_id.clone(),
                    status: status.clone(),
                }
            }
            "get-info" => Command::GetInfo {
                device_id: first(args, "Device ID", USAGE_GET_INFO)?,
            },
            "initiate-action" => parse_initiate_action(args)?,
            "action-status" => Command::ActionStatus {
                action_id: first(args, "Action ID", USAGE_ACTION_STATUS)?,
            },
            "poll-action" => parse_poll_action(args)?,
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn missing(what: &'static str, usage: &'static str) -> CommandError {
    CommandError::MissingArguments {
        missing: what,
        usage,
    }
}

fn first(args: &[String], what: &'static str, usage: &'static str) -> Result<String, CommandError> {
    args.first().cloned().ok_or_else(|| missing(what, usage))
}

/// Flags take the following word; dangling or unknown words are ignored
fn parse_register(args: &[String]) -> Result<Command, CommandError> {
    let mut registration = Registration::new(first(args, "Device ID", USAGE_REGISTER)?);

    let mut i = 1;
    while i < args.len() {
        let target = match args[i].as_str() {
            "--name" => Some(&mut registration.name),
            "--type" => Some(&mut registration.device_type),
            "--status" => Some(&mut registration.status),
            _ => None,
        };
        match (target, args.get(i + 1)) {
            (Some(target), Some(value)) => {
                *target = value.clone();
                i += 2;
            }
            _ => i += 1,
        }
    }

    Ok(Command::Register(registration))
}

fn parse_initiate_action(args: &[String]) -> Result<Command, CommandError> {
    let [device_id, action_type, rest @ ..] = args else {
        return Err(missing("Device ID and action type", USAGE_INITIATE_ACTION));
    };

    let candidates = rest
        .iter()
        .position(|word| word == "--params")
        .map(|idx| &rest[idx + 1..])
        .unwrap_or_default();
    let (params, skipped) = parse_params(candidates);

    Ok(Command::InitiateAction {
        device_id: device_id.clone(),
        action_type: action_type.clone(),
        params,
        skipped,
    })
}

/// Split `KEY=VALUE` words at the first `=`; words without one are returned
/// separately
pub fn parse_params(words: &[String]) -> (BTreeMap<String, String>, Vec<String>) {
    let mut params = BTreeMap::new();
    let mut skipped = Vec::new();
    for word in words {
        match word.split_once('=') {
            Some((key, value)) => {
                params.insert(key.to_string(), value.to_string());
            }
            None => skipped.push(word.clone()),
        }
    }
    (params, skipped)
}

fn parse_poll_action(args: &[String]) -> Result<Command, CommandError> {
    let action_id = first(args, "Action ID", USAGE_POLL_ACTION)?;

    let value = args[1..]
        .iter()
        .position(|word| word == "--interval")
        .and_then(|idx| args.get(idx + 2));
    let interval = match value {
        Some(value) => {
            let secs: f64 = value
                .parse()
                .map_err(|_| CommandError::InvalidInterval(value.clone()))?;
            let options = tracker::Options::with_interval_secs(secs)
                .map_err(|_| CommandError::InvalidInterval(value.clone()))?;
            Some(options.interval)
        }
        None => None,
    };

    Ok(Command::PollAction {
        action_id,
        interval,
    })
}
