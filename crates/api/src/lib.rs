//! HTTP host for the inference pipeline: config, routing, request/response mapping.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
