//! HTTP transport for the fleet management service

pub mod client;
pub mod connection;
pub mod devices;
pub mod service;
