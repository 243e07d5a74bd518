// Command dispatcher - best-effort, non-blocking sends to the vehicle
use crate::application::vehicle_api::{Endpoint, VehicleApi};
use crate::domain::command::{CommandVector, ModeSet, SettingsDelta};
use serde::Serialize;
use std::sync::Arc;

/// Sends are spawned and never awaited or retried. A lost command is
/// superseded by the next input sample, so failures are only logged.
#[derive(Clone)]
pub struct CommandDispatcher {
    api: Arc<dyn VehicleApi>,
}

impl CommandDispatcher {
    pub fn new(api: Arc<dyn VehicleApi>) -> Self {
        Self { api }
    }

    pub fn dispatch<P: Serialize>(&self, endpoint: Endpoint, payload: &P) {
        let body = match serde_json::to_value(payload) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Dropping {} command, payload did not serialize: {}", endpoint.path(), e);
                return;
            }
        };

        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(e) = api.post_command(endpoint, body).await {
                tracing::debug!("Command to {} dropped: {:#}", endpoint.path(), e);
            }
        });
    }

    pub fn drive(&self, vector: CommandVector) {
        self.dispatch(Endpoint::Move, &vector);
    }

    pub fn camera(&self, vector: CommandVector) {
        self.dispatch(Endpoint::Camera, &vector);
    }

    pub fn modes(&self, modes: ModeSet) {
        self.dispatch(Endpoint::Modes, &modes);
    }

    pub fn settings(&self, delta: SettingsDelta) {
        self.dispatch(Endpoint::Settings, &delta.clamped());
    }

    pub fn horn(&self) {
        self.dispatch(Endpoint::Horn, &serde_json::json!({}));
    }

    pub fn stop(&self) {
        self.dispatch(Endpoint::Stop, &serde_json::json!({}));
    }
}
