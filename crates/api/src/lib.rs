//! HTTP API for the expiry-alert service: routing, wiring, and
//! request/response mapping.

pub mod app;
