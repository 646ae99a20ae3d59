//! Device and action operation unit tests

mod common;

use std::collections::BTreeMap;

use fleet_api::models::*;
use fleet_api::{ActionStatus, ActionType, DeviceStatus, WireEnum};

use common::{observed, Call, ScriptedService};
use fleetctl::errors::{FleetError, TransportCode, TransportError};
use fleetctl::ops::actions::{self, InitiatedAction};
use fleetctl::ops::devices::{self, Registration, StatusChange};
use fleetctl::ops::Outcome;

#[tokio::test]
async fn test_register_defaults_to_idle() {
    let service = ScriptedService::new();
    let outcome = devices::register(&service, Registration::new("dev1"))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Done(()));
    let calls = service.calls();
    let [Call::Register(request)] = calls.as_slice() else {
        panic!("expected one register call, got {calls:?}");
    };
    assert_eq!(request.device_id, "dev1");
    assert_eq!(request.device_name, "");
    assert_eq!(request.initial_status, DeviceStatus::Idle.wire());
}

#[tokio::test]
async fn test_register_status_ignores_case() {
    let service = ScriptedService::new();
    let registration = Registration {
        status: "Recovering".to_string(),
        ..Registration::new("dev1")
    };
    devices::register(&service, registration).await.unwrap();

    let calls = service.calls();
    assert!(matches!(
        calls.as_slice(),
        [Call::Register(r)] if r.initial_status == DeviceStatus::Recovering.wire()
    ));
}

#[tokio::test]
async fn test_invalid_values_fail_before_any_call() {
    let service = ScriptedService::new();

    let registration = Registration {
        status: "SLEEPING".to_string(),
        ..Registration::new("dev1")
    };
    let err = devices::register(&service, registration).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid status 'SLEEPING'");

    let err = devices::set_status(&service, "dev1", "").await.unwrap_err();
    assert!(matches!(err, FleetError::InvalidValue(_)));

    let err = actions::initiate(&service, "dev1", "REBOOT", BTreeMap::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid action type 'REBOOT'");

    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_set_status_maps_both_statuses() {
    let service = ScriptedService::new();
    service.push_set_status(Ok(SetDeviceStatusResponse {
        success: true,
        message: String::new(),
        previous_status: DeviceStatus::Offline.wire(),
        current_status: DeviceStatus::Error.wire(),
    }));

    let outcome = devices::set_status(&service, "dev1", "error").await.unwrap();
    assert_eq!(
        outcome,
        Outcome::Done(StatusChange {
            previous: "OFFLINE",
            current: "ERROR",
        })
    );
}

#[tokio::test]
async fn test_set_status_unknown_wire_value() {
    let service = ScriptedService::new();
    service.push_set_status(Ok(SetDeviceStatusResponse {
        success: true,
        message: String::new(),
        previous_status: 99,
        current_status: DeviceStatus::Busy.wire(),
    }));

    let outcome = devices::set_status(&service, "dev1", "BUSY").await.unwrap();
    let Outcome::Done(change) = outcome else {
        panic!("expected success");
    };
    assert_eq!(change.previous, "UNKNOWN");
}

#[tokio::test]
async fn test_rejection_carries_message() {
    let service = ScriptedService::new();
    service.push_get_info(Ok(GetDeviceInfoResponse {
        success: false,
        message: "Device ghost not found".to_string(),
        ..Default::default()
    }));

    let outcome = devices::get_info(&service, "ghost").await.unwrap();
    assert_eq!(outcome, Outcome::Rejected("Device ghost not found".to_string()));
    assert!(!outcome.is_done());
}

#[tokio::test]
async fn test_transport_fault_is_an_error() {
    let service = ScriptedService::new();
    service.push_list(Err(TransportError::new(
        TransportCode::DeadlineExceeded,
        "operation timed out",
    )));

    let err = devices::list(&service).await.unwrap_err();
    let FleetError::Transport(fault) = err else {
        panic!("expected a transport error");
    };
    assert_eq!(fault.code, TransportCode::DeadlineExceeded);
    assert_eq!(fault.to_string(), "DEADLINE_EXCEEDED - operation timed out");
}

#[tokio::test]
async fn test_list_returns_devices_in_order() {
    let service = ScriptedService::new();
    let device = |id: &str| DeviceInfo {
        device_id: id.to_string(),
        ..Default::default()
    };
    service.push_list(Ok(ListDevicesResponse {
        success: true,
        message: String::new(),
        devices: vec![device("b"), device("a")],
    }));

    let Outcome::Done(devices) = devices::list(&service).await.unwrap() else {
        panic!("expected success");
    };
    let ids: Vec<_> = devices.iter().map(|d| d.device_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[tokio::test]
async fn test_initiate_maps_type_and_params() {
    let service = ScriptedService::new();
    service.push_initiate(Ok(InitiateDeviceActionResponse {
        success: true,
        message: String::new(),
        action_id: "act-7".to_string(),
        action_status: ActionStatus::Running.wire(),
    }));
    let params = BTreeMap::from([("version".to_string(), "2.1".to_string())]);

    let outcome = actions::initiate(&service, "dev1", "configuration_change", params.clone())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Done(InitiatedAction {
            action_id: "act-7".to_string(),
            status: "RUNNING",
        })
    );
    assert_eq!(
        service.calls(),
        vec![Call::Initiate(InitiateDeviceActionRequest {
            device_id: "dev1".to_string(),
            action_type: ActionType::ConfigurationChange.wire(),
            action_params: params,
        })]
    );
}

#[tokio::test]
async fn test_action_status_returns_payload() {
    let service = ScriptedService::new();
    service.push_action_status(Ok(observed("act-3", ActionStatus::Completed)));

    let Outcome::Done(action) = actions::status(&service, "act-3").await.unwrap() else {
        panic!("expected success");
    };
    assert_eq!(action.action_id, "act-3");
    assert_eq!(action.action_status(), Some(ActionStatus::Completed));
    assert!(action.is_terminal());
}

#[tokio::test]
async fn test_action_status_unknown_action_is_rejection() {
    let service = ScriptedService::new();
    service.push_action_status(Ok(GetDeviceActionStatusResponse {
        success: false,
        message: "Action act-0 not found".to_string(),
        ..Default::default()
    }));

    let outcome = actions::status(&service, "act-0").await.unwrap();
    assert_eq!(outcome, Outcome::Rejected("Action act-0 not found".to_string()));
}
