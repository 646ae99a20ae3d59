//! Device and action operations
//!
//! Each operation validates and maps its arguments before any remote call,
//! then hands back the service's answer. Formatting lives in [`display`].

pub mod actions;
pub mod devices;
pub mod display;

/// Answer of a remote call that reached the service
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// `success == true`, with the payload
    Done(T),
    /// `success == false`, with the service's message
    Rejected(String),
}

impl<T> Outcome<T> {
    pub(crate) fn from_response(success: bool, message: String, payload: impl FnOnce() -> T) -> Self {
        if success {
            Outcome::Done(payload())
        } else {
            Outcome::Rejected(message)
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }
}
