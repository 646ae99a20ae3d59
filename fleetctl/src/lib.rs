//! fleetctl library
//!
//! Interactive client for a device fleet management service: wire
//! transport, device and action operations, action polling and the
//! command interpreter.

pub mod app;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod ops;
pub mod repl;
pub mod storage;
pub mod tracker;
pub mod utils;
