//! Text rendering of operation results

use std::time::Duration;

use chrono::DateTime;
use colored::Colorize;
use fleet_api::models::{ActionInfo, DeviceInfo};
use fleet_api::{ActionStatus, ActionType, DeviceStatus, WireEnum};

use crate::errors::{FleetError, TransportError};
use crate::ops::actions::InitiatedAction;
use crate::ops::devices::StatusChange;

const WIDTH_ID: usize = 20;
const WIDTH_NAME: usize = 15;
const WIDTH_TYPE: usize = 15;
const WIDTH_STATUS: usize = 15;
const WIDTH_ACTION: usize = 20;
const RULE_WIDTH: usize = 80;

/// Placeholder for an empty action reference
pub const NO_ACTION: &str = "None";

pub fn ok_mark() -> String {
    "✓".green().to_string()
}

pub fn fail_mark() -> String {
    "✗".red().to_string()
}

/// `YYYY-MM-DD HH:MM:SS` in UTC, or `N/A` when unset
pub fn format_timestamp(timestamp: i64) -> String {
    if timestamp == 0 {
        return "N/A".to_string();
    }
    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

/// Seconds with at least one decimal place: `2.0`, `0.5`, `0.25`
pub fn format_seconds(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs.fract() == 0.0 {
        format!("{:.1}", secs)
    } else {
        secs.to_string()
    }
}

/// Action column of the device table
///
/// Ids longer than the column keep their first 17 characters plus `...`.
pub fn action_cell(current_action_id: &str) -> String {
    if current_action_id.is_empty() {
        return NO_ACTION.to_string();
    }
    if current_action_id.chars().count() > WIDTH_ACTION {
        let head: String = current_action_id.chars().take(WIDTH_ACTION - 3).collect();
        return format!("{}...", head);
    }
    current_action_id.to_string()
}

fn table_row(id: &str, name: &str, device_type: &str, status: &str, action: &str) -> String {
    format!(
        "{:<w1$} {:<w2$} {:<w3$} {:<w4$} {:<w5$}",
        id,
        name,
        device_type,
        status,
        action,
        w1 = WIDTH_ID,
        w2 = WIDTH_NAME,
        w3 = WIDTH_TYPE,
        w4 = WIDTH_STATUS,
        w5 = WIDTH_ACTION,
    )
}

/// Fixed-width device table
pub fn device_table(devices: &[DeviceInfo]) -> String {
    if devices.is_empty() {
        return "No devices registered.".to_string();
    }

    let rule = "-".repeat(RULE_WIDTH);
    let mut lines = vec![
        String::new(),
        format!("Registered Devices ({} total):", devices.len()),
        rule.clone(),
        table_row("Device ID", "Name", "Type", "Status", "Action"),
        rule,
    ];
    lines.extend(devices.iter().map(|device| {
        table_row(
            &device.device_id,
            &device.device_name,
            &device.device_type,
            DeviceStatus::format_wire(device.status),
            &action_cell(&device.current_action_id),
        )
    }));
    lines.join("\n")
}

/// Every attribute of a device
pub fn device_details(device: &DeviceInfo) -> String {
    let current_action = if device.current_action_id.is_empty() {
        NO_ACTION
    } else {
        device.current_action_id.as_str()
    };

    [
        String::new(),
        "Device Information:".to_string(),
        format!("  ID:             {}", device.device_id),
        format!("  Name:           {}", device.device_name),
        format!("  Type:           {}", device.device_type),
        format!("  Status:         {}", DeviceStatus::format_wire(device.status)),
        format!("  Registered:     {}", format_timestamp(device.registered_at)),
        format!("  Last Updated:   {}", format_timestamp(device.last_updated)),
        format!("  Current Action: {}", current_action),
    ]
    .join("\n")
}

/// Whole seconds between initiation and completion
pub fn action_duration(action: &ActionInfo) -> i64 {
    action.completed_at.saturating_sub(action.initiated_at)
}

fn action_finished(action: &ActionInfo) -> bool {
    match action.action_status() {
        Some(status) => status.is_terminal(),
        None => action.completed_at > 0,
    }
}

/// Every attribute of an action
pub fn action_details(action: &ActionInfo) -> String {
    let mut lines = vec![
        String::new(),
        "Action Information:".to_string(),
        format!("  Action ID:      {}", action.action_id),
        format!("  Device ID:      {}", action.device_id),
        format!("  Action Type:    {}", ActionType::format_wire(action.action_type)),
        format!("  Status:         {}", ActionStatus::format_wire(action.status)),
        format!("  Initiated:      {}", format_timestamp(action.initiated_at)),
    ];

    if action_finished(action) {
        lines.push(format!("  Completed:      {}", format_timestamp(action.completed_at)));
        if action.completed_at > 0 {
            lines.push(format!("  Duration:       {} seconds", action_duration(action)));
        }
    } else {
        lines.push("  Completed:      In progress...".to_string());
    }

    if !action.action_params.is_empty() {
        lines.push("  Parameters:".to_string());
        lines.extend(
            action
                .action_params
                .iter()
                .map(|(key, value)| format!("    {} = {}", key, value)),
        );
    }

    if !action.error_message.is_empty() {
        lines.push(format!("  Error:          {}", action.error_message));
    }

    lines.join("\n")
}

pub fn registered(device_id: &str) -> String {
    format!("{} Device '{}' registered successfully", ok_mark(), device_id)
}

pub fn status_changed(device_id: &str, change: &StatusChange) -> String {
    format!(
        "{} Device '{}' status updated:\n  Previous: {}\n  Current:  {}",
        ok_mark(),
        device_id,
        change.previous,
        change.current
    )
}

pub fn action_initiated(action: &InitiatedAction) -> String {
    format!(
        "{} Action initiated successfully\n  Action ID: {}\n  Status:    {}",
        ok_mark(),
        action.action_id,
        action.status
    )
}

/// Call-level failure, optionally prefixed with what was attempted
pub fn rejected(context: Option<&str>, message: &str) -> String {
    match context {
        Some(context) => format!("{} {}: {}", fail_mark(), context, message),
        None => format!("{} {}", fail_mark(), message),
    }
}

pub fn transport_failure(err: &TransportError) -> String {
    format!("{} Transport error: {}", fail_mark(), err)
}

/// Any error raised before or during an operation
pub fn error(err: &FleetError) -> String {
    match err {
        FleetError::Transport(e) => transport_failure(e),
        FleetError::InvalidValue(e) => format!("Error: {}", e),
        other => format!("{} Error: {}", fail_mark(), other),
    }
}
