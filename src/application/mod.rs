// Application layer - input handling, dispatch and telemetry pipelines
pub mod chart_service;
pub mod dispatcher;
pub mod history;
pub mod hud_service;
pub mod input;
pub mod poller;
pub mod vehicle_api;
