//! Networking layer: wire types, the HTTP gateway, and service calls.

pub mod api;
pub mod gateway;
pub mod types;
