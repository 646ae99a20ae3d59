//! Action lifecycle tracking

pub mod fsm;
pub mod poller;

pub use fsm::{ActionTracker, Failure, TrackerEvent, TrackerState};
pub use poller::{poll_action, Options};
