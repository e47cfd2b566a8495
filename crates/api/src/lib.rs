//! HTTP host: session middleware, routing, and request/response mapping.

pub mod app;
pub mod config;
pub mod middleware;
