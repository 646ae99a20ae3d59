//! Command interpreter unit tests

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use fleet_api::models::*;
use fleet_api::{ActionStatus, ActionType, DeviceStatus, WireEnum};
use futures::future::{pending, BoxFuture};
use futures::FutureExt;
use tokio::io::AsyncWriteExt;

use common::{observed, Call, ScriptedService, SleepLog};
use fleetctl::errors::{TransportCode, TransportError};
use fleetctl::repl::command::HELP_LINES;
use fleetctl::repl::{Flow, Interpreter};
use fleetctl::tracker::Options;

fn never() -> BoxFuture<'static, ()> {
    pending::<()>().boxed()
}

/// Run a whole session over `script` and return what was printed
async fn session(service: &ScriptedService, script: &str) -> (String, SleepLog) {
    let sleeps = SleepLog::default();
    let sleep_log = sleeps.clone();
    let mut interpreter = Interpreter::new(service, Vec::new(), Options::default())
        .with_sleep(Box::new(move |d| sleep_log.sleep(d)))
        .with_interrupt(Box::new(never));
    interpreter.run(script.as_bytes()).await.unwrap();
    let output = String::from_utf8(interpreter.into_output()).unwrap();
    (output, sleeps)
}

#[tokio::test]
async fn test_blank_lines_and_eof() {
    let service = ScriptedService::new();
    let (output, _) = session(&service, "\n   \n").await;
    assert_eq!(service.call_count(), 0);
    assert_eq!(output.matches("> ").count(), 3);
}

#[tokio::test]
async fn test_last_line_without_newline_runs() {
    let service = ScriptedService::new();
    let (output, _) = session(&service, "list").await;
    assert_eq!(service.calls(), vec![Call::List]);
    assert!(output.contains("No devices registered."));
}

#[tokio::test]
async fn test_exit_and_quit_stop_the_loop() {
    for word in ["exit", "QUIT", "Exit"] {
        let service = ScriptedService::new();
        session(&service, &format!("{word}\nlist\n")).await;
        assert_eq!(service.call_count(), 0, "{word}");
    }
}

#[tokio::test]
async fn test_help_lists_every_command() {
    let service = ScriptedService::new();
    let (output, _) = session(&service, "HELP\n").await;
    assert!(output.contains("Available commands:"));
    for line in HELP_LINES {
        assert!(output.contains(&format!("  {}", line)), "missing {line}");
    }
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_command() {
    let service = ScriptedService::new();
    let (output, _) = session(&service, "frobnicate dev1\n").await;
    assert!(output.contains("Unknown command: frobnicate\nType 'help' for available commands"));
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_missing_arguments_print_usage() {
    let service = ScriptedService::new();
    let (output, _) = session(&service, "set-status dev1\nget-info\n").await;
    assert!(output.contains(
        "Error: Device ID and status required\nUsage: set-status <device_id> <status>"
    ));
    assert!(output.contains("Error: Device ID required\nUsage: get-info <device_id>"));
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_unclosed_quote_is_reported() {
    let service = ScriptedService::new();
    let (output, _) = session(&service, "register 'dev1\n").await;
    assert!(output.contains("Error: No closing quotation"));
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_register_sends_mapped_request() {
    let service = ScriptedService::new();
    let (output, _) = session(
        &service,
        "register dev1 --name \"Lobby Sensor\" --type temp --status maintenance\n",
    )
    .await;

    assert!(output.contains("Device 'dev1' registered successfully"));
    assert_eq!(
        service.calls(),
        vec![Call::Register(RegisterDeviceRequest {
            device_id: "dev1".to_string(),
            device_name: "Lobby Sensor".to_string(),
            device_type: "temp".to_string(),
            initial_status: DeviceStatus::Maintenance.wire(),
        })]
    );
}

#[tokio::test]
async fn test_register_invalid_status_makes_no_call() {
    let service = ScriptedService::new();
    let (output, _) = session(&service, "register dev1 --status bogus\n").await;
    assert!(output.contains("Error: Invalid status 'bogus'"));
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_register_rejected() {
    let service = ScriptedService::new();
    service.push_register(Ok(RegisterDeviceResponse {
        success: false,
        message: "Device dev1 already registered".to_string(),
    }));
    let (output, _) = session(&service, "register dev1\n").await;
    assert!(output.contains("Failed to register device: Device dev1 already registered"));
}

#[tokio::test]
async fn test_set_status_reports_previous_and_current() {
    let service = ScriptedService::new();
    service.push_set_status(Ok(SetDeviceStatusResponse {
        success: true,
        message: String::new(),
        previous_status: DeviceStatus::Idle.wire(),
        current_status: DeviceStatus::Busy.wire(),
    }));
    let (output, _) = session(&service, "set-status dev1 busy\n").await;

    assert_eq!(
        service.calls(),
        vec![Call::SetStatus(SetDeviceStatusRequest {
            device_id: "dev1".to_string(),
            status: DeviceStatus::Busy.wire(),
        })]
    );
    assert!(output.contains("Previous: IDLE"));
    assert!(output.contains("Current:  BUSY"));
}

#[tokio::test]
async fn test_list_renders_table() {
    let service = ScriptedService::new();
    service.push_list(Ok(ListDevicesResponse {
        success: true,
        message: String::new(),
        devices: vec![DeviceInfo {
            device_id: "dev1".to_string(),
            device_name: "Sensor".to_string(),
            device_type: "temp".to_string(),
            status: DeviceStatus::Updating.wire(),
            current_action_id: "0123456789abcdefghijXYZ".to_string(),
            ..Default::default()
        }],
    }));
    let (output, _) = session(&service, "list\n").await;

    assert!(output.contains("Registered Devices (1 total):"));
    assert!(output.contains("UPDATING"));
    assert!(output.contains("0123456789abcdefg..."));
}

#[tokio::test]
async fn test_get_info_rejected() {
    let service = ScriptedService::new();
    service.push_get_info(Ok(GetDeviceInfoResponse {
        success: false,
        message: "Device ghost not found".to_string(),
        ..Default::default()
    }));
    let (output, _) = session(&service, "get-info ghost\n").await;
    assert!(output.contains("Device ghost not found"));
}

#[tokio::test]
async fn test_transport_fault_keeps_session_alive() {
    let service = ScriptedService::new();
    service.push_list(Err(TransportError::new(
        TransportCode::Unavailable,
        "connection refused",
    )));
    let (output, _) = session(&service, "list\nlist\n").await;

    assert!(output.contains("Transport error: UNAVAILABLE - connection refused"));
    assert!(output.contains("No devices registered."));
    assert_eq!(service.call_count(), 2);
}

#[tokio::test]
async fn test_initiate_invalid_action_type_makes_no_call() {
    let service = ScriptedService::new();
    let (output, _) = session(&service, "initiate-action dev1 BAD_TYPE\n").await;
    assert!(output.contains("Error: Invalid action type 'BAD_TYPE'"));
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_initiate_skips_malformed_params() {
    let service = ScriptedService::new();
    let (output, _) = session(
        &service,
        "initiate-action dev1 system_reboot --params delay=5 b --params\n",
    )
    .await;

    assert!(output.contains("Warning: Invalid parameter format 'b'. Expected KEY=VALUE"));
    assert!(output.contains("Warning: Invalid parameter format '--params'. Expected KEY=VALUE"));
    assert!(output.contains("Action ID: act-1"));
    assert!(output.contains("Status:    PENDING"));

    let calls = service.calls();
    let [Call::Initiate(request)] = calls.as_slice() else {
        panic!("expected one initiate call, got {calls:?}");
    };
    assert_eq!(request.device_id, "dev1");
    assert_eq!(request.action_type, ActionType::SystemReboot.wire());
    assert_eq!(request.action_params.len(), 1);
    assert_eq!(request.action_params["delay"], "5");
}

#[tokio::test]
async fn test_action_status_details() {
    let service = ScriptedService::new();
    let mut response = observed("act-9", ActionStatus::Running);
    response.action_info.action_type = ActionType::FirmwareUpdate.wire();
    response.action_info.initiated_at = 1000;
    service.push_action_status(Ok(response));

    let (output, _) = session(&service, "action-status act-9\n").await;
    assert!(output.contains("act-9"));
    assert!(output.contains("FIRMWARE_UPDATE"));
    assert!(output.contains("RUNNING"));
    assert!(output.contains("1970-01-01 00:16:40"));
    assert!(output.contains("In progress..."));
}

#[tokio::test]
async fn test_poll_until_completed() {
    let service = ScriptedService::new();
    service.push_statuses(
        "act-1",
        &[ActionStatus::Pending, ActionStatus::Running, ActionStatus::Completed],
    );
    let (output, sleeps) = session(&service, "poll-action act-1 --interval 0.5\n").await;

    assert!(output.contains("Polling action 'act-1' (interval: 0.5s)..."));
    assert!(output.contains("Status: PENDING"));
    assert!(output.contains("Status: RUNNING"));
    assert!(output.contains("Status: COMPLETED"));
    assert!(output.contains("Action completed successfully!"));
    assert_eq!(service.call_count(), 3);
    assert_eq!(sleeps.count(), 2);
    assert_eq!(sleeps.total().as_millis(), 1000);
}

#[tokio::test]
async fn test_poll_uses_configured_interval() {
    let service = ScriptedService::new();
    service.push_statuses("act-1", &[ActionStatus::Pending, ActionStatus::Completed]);
    let (output, sleeps) = session(&service, "poll-action act-1\n").await;

    assert!(output.contains("Polling action 'act-1' (interval: 2.0s)..."));
    assert_eq!(sleeps.total().as_secs(), 2);
}

#[tokio::test]
async fn test_poll_until_failed() {
    let service = ScriptedService::new();
    let mut failed = observed("act-1", ActionStatus::Failed);
    failed.action_info.error_message = "disk full".to_string();
    service.push_action_status(Ok(failed));
    let (output, _) = session(&service, "poll-action act-1\n").await;

    assert!(output.contains("Action failed!"));
    assert!(output.contains("  Error: disk full"));
}

#[tokio::test]
async fn test_poll_invalid_interval_makes_no_call() {
    let service = ScriptedService::new();
    let (output, _) = session(&service, "poll-action act-1 --interval abc\n").await;
    assert!(output.contains("Error: Invalid interval value"));
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_poll_oversized_interval_keeps_session_alive() {
    let service = ScriptedService::new();
    let (output, sleeps) =
        session(&service, "poll-action act-1 --interval 1e30\nlist\n").await;

    assert!(output.contains("Error: Invalid interval value"));
    assert!(output.contains("No devices registered."));
    assert_eq!(service.calls(), vec![Call::List]);
    assert_eq!(sleeps.count(), 0);
}

#[tokio::test]
async fn test_poll_stopped_by_interrupt() {
    let service = ScriptedService::new();
    let mut interpreter = Interpreter::new(&service, Vec::new(), Options::default())
        .with_sleep(Box::new(|_| tokio::task::yield_now().boxed()))
        .with_interrupt(Box::new(|| async {}.boxed()));

    let flow = interpreter.execute_line("poll-action act-1").await.unwrap();
    assert_eq!(flow, Flow::Continue);

    let output = String::from_utf8(interpreter.into_output()).unwrap();
    assert!(output.contains("Polling stopped by user."));
    assert!(!output.contains("Action completed successfully!"));
    assert!(service.call_count() >= 1);
}

#[tokio::test]
async fn test_interrupt_at_prompt_continues() {
    let service = ScriptedService::new();
    let (reader, writer) = tokio::io::duplex(64);
    let writer = Mutex::new(Some(writer));
    let interrupts = AtomicUsize::new(0);

    // First prompt is interrupted; the second one receives `exit`
    let interrupt = move || -> BoxFuture<'static, ()> {
        if interrupts.fetch_add(1, Ordering::SeqCst) == 0 {
            return async {}.boxed();
        }
        match writer.lock().unwrap().take() {
            Some(mut writer) => async move {
                writer.write_all(b"exit\n").await.unwrap();
                pending::<()>().await;
            }
            .boxed(),
            None => never(),
        }
    };

    let mut interpreter = Interpreter::new(&service, Vec::new(), Options::default())
        .with_interrupt(Box::new(interrupt));
    interpreter
        .run(tokio::io::BufReader::new(reader))
        .await
        .unwrap();

    let output = String::from_utf8(interpreter.into_output()).unwrap();
    assert!(output.contains("\nUse 'exit' to quit\n"));
    assert_eq!(output.matches("> ").count(), 2);
    assert_eq!(service.call_count(), 0);
}
