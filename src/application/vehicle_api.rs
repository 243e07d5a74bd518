// Vehicle API trait - the remote surface the console drives and polls
use crate::domain::telemetry::TelemetrySample;
use async_trait::async_trait;

/// Fire-and-forget command endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Move,
    Camera,
    Modes,
    Horn,
    Stop,
    Settings,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Move => "/api/move",
            Endpoint::Camera => "/api/camera",
            Endpoint::Modes => "/api/modes",
            Endpoint::Horn => "/api/horn",
            Endpoint::Stop => "/api/stop",
            Endpoint::Settings => "/api/settings",
        }
    }
}

#[async_trait]
pub trait VehicleApi: Send + Sync {
    /// POST a JSON body to a command endpoint
    async fn post_command(&self, endpoint: Endpoint, body: serde_json::Value) -> anyhow::Result<()>;

    /// GET the current status sample
    async fn fetch_status(&self) -> anyhow::Result<TelemetrySample>;

    /// GET up to `seconds` of recorded samples, oldest first
    async fn fetch_history(&self, seconds: u32) -> anyhow::Result<Vec<TelemetrySample>>;
}
