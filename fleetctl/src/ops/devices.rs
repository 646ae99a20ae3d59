//! Device operations

use fleet_api::models::{
    DeviceInfo, GetDeviceInfoRequest, ListDevicesRequest, RegisterDeviceRequest,
    SetDeviceStatusRequest,
};
use fleet_api::{DeviceStatus, WireEnum};
use tracing::{debug, warn};

use crate::errors::FleetError;
use crate::http::service::DeviceService;
use crate::ops::Outcome;

/// Arguments of a device registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub device_id: String,
    pub name: String,
    pub device_type: String,
    /// Status token as typed, parsed before the call
    pub status: String,
}

impl Registration {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            name: String::new(),
            device_type: String::new(),
            status: DeviceStatus::Idle.name().to_string(),
        }
    }
}

/// Previous and new status reported by a set-status call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub previous: &'static str,
    pub current: &'static str,
}

/// Register a device
pub async fn register<S: DeviceService + ?Sized>(
    service: &S,
    registration: Registration,
) -> Result<Outcome<()>, FleetError> {
    let status = DeviceStatus::parse(&registration.status)?;

    debug!("Registering device '{}'", registration.device_id);
    let response = service
        .register_device(RegisterDeviceRequest {
            device_id: registration.device_id,
            device_name: registration.name,
            device_type: registration.device_type,
            initial_status: status.wire(),
        })
        .await?;

    if !response.success {
        warn!("RegisterDevice rejected: {}", response.message);
    }
    Ok(Outcome::from_response(response.success, response.message, || ()))
}

/// Change the status of a device
pub async fn set_status<S: DeviceService + ?Sized>(
    service: &S,
    device_id: &str,
    status: &str,
) -> Result<Outcome<StatusChange>, FleetError> {
    let status = DeviceStatus::parse(status)?;

    debug!("Setting status of '{}' to {}", device_id, status);
    let response = service
        .set_device_status(SetDeviceStatusRequest {
            device_id: device_id.to_string(),
            status: status.wire(),
        })
        .await?;

    if !response.success {
        warn!("SetDeviceStatus rejected: {}", response.message);
    }
    let (previous, current) = (response.previous_status, response.current_status);
    Ok(Outcome::from_response(response.success, response.message, || StatusChange {
        previous: DeviceStatus::format_wire(previous),
        current: DeviceStatus::format_wire(current),
    }))
}

/// Fetch a single device
pub async fn get_info<S: DeviceService + ?Sized>(
    service: &S,
    device_id: &str,
) -> Result<Outcome<DeviceInfo>, FleetError> {
    let response = service
        .get_device_info(GetDeviceInfoRequest {
            device_id: device_id.to_string(),
        })
        .await?;

    let device = response.device_info;
    Ok(Outcome::from_response(response.success, response.message, || device))
}

/// Fetch every registered device
pub async fn list<S: DeviceService + ?Sized>(
    service: &S,
) -> Result<Outcome<Vec<DeviceInfo>>, FleetError> {
    let response = service.list_devices(ListDevicesRequest {}).await?;
    debug!("ListDevices returned {} device(s)", response.devices.len());

    let devices = response.devices;
    Ok(Outcome::from_response(response.success, response.message, || devices))
}
