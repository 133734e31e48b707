//! # API Shared
//!
//! Shared definitions for the stroke risk APIs.
//!
//! Contains:
//! - Request/response wire types (`wire` module), with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the workspace's `stroke-run` binary.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
