//! Library crate for live-score-back, exposing modules for binaries and integration tests.

/// Runtime configuration.
pub mod config;
/// Persistence layer.
pub mod dao;
/// Request and response payloads.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// HTTP, SSE and WebSocket routes.
pub mod routes;
/// Application services.
pub mod services;
/// Shared state and the scoring domain.
pub mod state;
