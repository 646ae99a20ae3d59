//! Polling loop driving an action to a terminal state

use std::future::Future;
use std::time::Duration;

use fleet_api::models::{ActionInfo, GetDeviceActionStatusRequest};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::FleetError;
use crate::http::service::DeviceService;
use crate::tracker::fsm::{ActionTracker, TrackerEvent};

/// Poller options
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Delay between status checks
    pub interval: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
        }
    }
}

impl Options {
    /// Build options from an interval in seconds, which must be positive
    /// and representable as a `Duration`
    pub fn with_interval_secs(secs: f64) -> Result<Self, FleetError> {
        let invalid = || {
            FleetError::ValidationError(format!(
                "interval must be a positive number of seconds, got {}",
                secs
            ))
        };
        if !secs.is_finite() || secs <= 0.0 {
            return Err(invalid());
        }
        let interval = Duration::try_from_secs_f64(secs).map_err(|_| invalid())?;
        Ok(Self { interval })
    }
}

/// Poll an action until it completes, fails or is cancelled
///
/// Cancellation is only observed between polls; a status call in flight
/// always runs to completion. There is no iteration limit.
pub async fn poll_action<S, Sl, F, O>(
    service: &S,
    action_id: &str,
    options: &Options,
    sleep_fn: Sl,
    cancel: &CancellationToken,
    mut on_observe: O,
) -> ActionTracker
where
    S: DeviceService + ?Sized,
    Sl: Fn(Duration) -> F,
    F: Future<Output = ()>,
    O: FnMut(&ActionInfo),
{
    info!("Polling action '{}' every {:?}", action_id, options.interval);
    let mut tracker = ActionTracker::new(action_id);

    loop {
        if cancel.is_cancelled() {
            finish(&mut tracker, TrackerEvent::Cancel);
            break;
        }

        let event = match service
            .get_device_action_status(GetDeviceActionStatusRequest {
                action_id: action_id.to_string(),
            })
            .await
        {
            Ok(response) if response.success => {
                on_observe(&response.action_info);
                TrackerEvent::Observed(response.action_info)
            }
            Ok(response) => TrackerEvent::Rejected(response.message),
            Err(err) => TrackerEvent::TransportFailed(err),
        };

        if finish(&mut tracker, event) {
            break;
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                finish(&mut tracker, TrackerEvent::Cancel);
                break;
            }
            _ = sleep_fn(options.interval) => {}
        }
    }

    info!(
        "Stopped polling '{}' after {} check(s): {:?}",
        action_id,
        tracker.checks(),
        tracker.state()
    );
    tracker
}

/// Apply an event, returning whether tracking is over
fn finish(tracker: &mut ActionTracker, event: TrackerEvent) -> bool {
    match tracker.process(event) {
        Ok(state) => {
            debug!("Tracker for '{}' is {:?}", tracker.action_id(), state);
            state.is_done()
        }
        Err(e) => {
            warn!("{}", e);
            true
        }
    }
}
