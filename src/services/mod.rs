/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Match scheduling, reads and scorecards.
pub mod match_service;
/// Scorer actions: load, apply, conditional save, broadcast.
pub mod score_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events subscription and streaming.
pub mod sse_service;
/// Storage connection supervisor toggling degraded mode.
pub mod storage_supervisor;
/// Team roster management.
pub mod team_service;
/// WebSocket match feed.
pub mod websocket_service;
