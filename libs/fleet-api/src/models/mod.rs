//! API models
//!
//! Field names follow the service's message definitions. Every field is
//! optional on the wire and decodes to its zero value when absent.

pub mod enums;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use enums::{ActionStatus, WireEnum};

/// Device as reported by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
    pub device_id: String,
    pub device_name: String,
    pub device_type: String,
    /// `DeviceStatus` wire value
    pub status: i32,
    /// Seconds since the epoch, 0 when unset
    pub registered_at: i64,
    pub last_updated: i64,
    /// Empty when the device is idle
    pub current_action_id: String,
}

/// Action as reported by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionInfo {
    pub action_id: String,
    pub device_id: String,
    /// `ActionType` wire value
    pub action_type: i32,
    /// `ActionStatus` wire value
    pub status: i32,
    pub initiated_at: i64,
    /// 0 while the action is still running
    pub completed_at: i64,
    pub action_params: BTreeMap<String, String>,
    /// Only set when the action failed
    pub error_message: String,
}

impl ActionInfo {
    /// Known status, if the wire value is recognised
    pub fn action_status(&self) -> Option<ActionStatus> {
        ActionStatus::from_wire(self.status)
    }

    pub fn is_terminal(&self) -> bool {
        self.action_status().is_some_and(ActionStatus::is_terminal)
    }
}

/// Register device request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterDeviceRequest {
    pub device_id: String,
    pub device_name: String,
    pub device_type: String,
    pub initial_status: i32,
}

/// Register device response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterDeviceResponse {
    pub success: bool,
    pub message: String,
}

/// Set device status request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetDeviceStatusRequest {
    pub device_id: String,
    pub status: i32,
}

/// Set device status response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetDeviceStatusResponse {
    pub success: bool,
    pub message: String,
    pub previous_status: i32,
    pub current_status: i32,
}

/// Get device info request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetDeviceInfoRequest {
    pub device_id: String,
}

/// Get device info response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetDeviceInfoResponse {
    pub success: bool,
    pub message: String,
    pub device_info: DeviceInfo,
}

/// List devices request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListDevicesRequest {}

/// List devices response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListDevicesResponse {
    pub success: bool,
    pub message: String,
    pub devices: Vec<DeviceInfo>,
}

/// Initiate device action request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitiateDeviceActionRequest {
    pub device_id: String,
    pub action_type: i32,
    pub action_params: BTreeMap<String, String>,
}

/// Initiate device action response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitiateDeviceActionResponse {
    pub success: bool,
    pub message: String,
    pub action_id: String,
    pub action_status: i32,
}

/// Get device action status request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetDeviceActionStatusRequest {
    pub action_id: String,
}

/// Get device action status response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetDeviceActionStatusResponse {
    pub success: bool,
    pub message: String,
    pub action_info: ActionInfo,
}
