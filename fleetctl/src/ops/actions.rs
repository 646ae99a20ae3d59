//! Action operations

use std::collections::BTreeMap;

use fleet_api::models::{ActionInfo, GetDeviceActionStatusRequest, InitiateDeviceActionRequest};
use fleet_api::{ActionStatus, ActionType, WireEnum};
use tracing::{debug, warn};

use crate::errors::FleetError;
use crate::http::service::DeviceService;
use crate::ops::Outcome;

/// Action accepted by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiatedAction {
    pub action_id: String,
    pub status: &'static str,
}

/// Start an action on a device
pub async fn initiate<S: DeviceService + ?Sized>(
    service: &S,
    device_id: &str,
    action_type: &str,
    params: BTreeMap<String, String>,
) -> Result<Outcome<InitiatedAction>, FleetError> {
    let action_type = ActionType::parse(action_type)?;

    debug!(
        "Initiating {} on '{}' with {} param(s)",
        action_type,
        device_id,
        params.len()
    );
    let response = service
        .initiate_device_action(InitiateDeviceActionRequest {
            device_id: device_id.to_string(),
            action_type: action_type.wire(),
            action_params: params,
        })
        .await?;

    if !response.success {
        warn!("InitiateDeviceAction rejected: {}", response.message);
    }
    let (action_id, status) = (response.action_id, response.action_status);
    Ok(Outcome::from_response(response.success, response.message, || InitiatedAction {
        action_id,
        status: ActionStatus::format_wire(status),
    }))
}

/// Fetch the current state of an action
///
/// An action the service no longer knows is an ordinary rejection.
pub async fn status<S: DeviceService + ?Sized>(
    service: &S,
    action_id: &str,
) -> Result<Outcome<ActionInfo>, FleetError> {
    let response = service
        .get_device_action_status(GetDeviceActionStatusRequest {
            action_id: action_id.to_string(),
        })
        .await?;

    let action = response.action_info;
    Ok(Outcome::from_response(response.success, response.message, || action))
}
