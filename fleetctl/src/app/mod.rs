//! Application wiring: arguments, options and the session loop

pub mod args;
pub mod options;
pub mod run;
