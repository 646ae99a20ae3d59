//! Wire models for the device fleet management service
//!
//! Request and response messages for the six remote operations plus the
//! enums shared between the client and the service.

pub mod models;

pub use models::enums::{ActionStatus, ActionType, DeviceStatus, ParseEnumError, WireEnum};

/// Fully qualified name of the remote service
pub const SERVICE_NAME: &str = "device_management.DeviceManagementService";
