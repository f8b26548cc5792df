//! HTTP API: configuration, request lifecycle, routing, and request/response mapping.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod identity;
pub mod middleware;
