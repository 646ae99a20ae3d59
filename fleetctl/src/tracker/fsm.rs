//! Finite State Machine for action tracking

use fleet_api::models::ActionInfo;
use fleet_api::ActionStatus;

use crate::errors::TransportError;

/// Tracker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// Polling the action status
    Observing,

    /// Action reached COMPLETED
    DoneOk,

    /// Action reached FAILED, or a status call failed
    DoneFail,

    /// Stopped on user request
    DoneCancelled,
}

impl TrackerState {
    pub fn is_done(self) -> bool {
        self != TrackerState::Observing
    }
}

/// Tracker event
#[derive(Debug, Clone)]
pub enum TrackerEvent {
    /// A status call returned the action
    Observed(ActionInfo),

    /// A status call was answered with `success == false`
    Rejected(String),

    /// A status call did not reach the service
    TransportFailed(TransportError),

    /// Stop requested between polls
    Cancel,
}

/// Why tracking ended in [`TrackerState::DoneFail`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The action itself failed
    Action { error_message: Option<String> },

    /// The service refused the status call
    Rejected(String),

    /// The status call faulted
    Transport(TransportError),
}

impl Failure {
    /// Human-readable reason, if any
    pub fn message(&self) -> Option<String> {
        match self {
            Failure::Action { error_message } => error_message.clone(),
            Failure::Rejected(message) => Some(message.clone()),
            Failure::Transport(err) => Some(err.to_string()),
        }
    }
}

/// Action tracker FSM
#[derive(Debug, Clone)]
pub struct ActionTracker {
    action_id: String,
    state: TrackerState,
    failure: Option<Failure>,
    checks: u32,
    last_observed: Option<ActionInfo>,
}

impl ActionTracker {
    /// Create a new tracker in observing state
    pub fn new(action_id: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            state: TrackerState::Observing,
            failure: None,
            checks: 0,
            last_observed: None,
        }
    }

    pub fn action_id(&self) -> &str {
        &self.action_id
    }

    /// Get current state
    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    /// Number of status calls issued
    pub fn checks(&self) -> u32 {
        self.checks
    }

    pub fn last_observed(&self) -> Option<&ActionInfo> {
        self.last_observed.as_ref()
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: TrackerEvent) -> Result<TrackerState, String> {
        if self.state.is_done() {
            return Err(format!(
                "Invalid transition: {:?} -> {:?}",
                self.state, event
            ));
        }

        let new_state = match event {
            TrackerEvent::Observed(action) => {
                self.checks += 1;
                let state = match action.action_status() {
                    Some(ActionStatus::Completed) => TrackerState::DoneOk,
                    Some(ActionStatus::Failed) => {
                        let error_message = Some(action.error_message.clone())
                            .filter(|message| !message.is_empty());
                        self.failure = Some(Failure::Action { error_message });
                        TrackerState::DoneFail
                    }
                    // Unknown statuses are treated as still in flight
                    Some(ActionStatus::Pending | ActionStatus::Running) | None => {
                        TrackerState::Observing
                    }
                };
                self.last_observed = Some(action);
                state
            }
            TrackerEvent::Rejected(message) => {
                self.checks += 1;
                self.failure = Some(Failure::Rejected(message));
                TrackerState::DoneFail
            }
            TrackerEvent::TransportFailed(err) => {
                self.checks += 1;
                self.failure = Some(Failure::Transport(err));
                TrackerState::DoneFail
            }
            TrackerEvent::Cancel => TrackerState::DoneCancelled,
        };

        self.state = new_state;
        Ok(new_state)
    }
}
