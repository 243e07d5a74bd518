// HUD pipeline - fast status polling reduced into the latest HUD state
use crate::application::poller::{Sequenced, SequenceGate, TelemetryPoller};
use crate::application::vehicle_api::VehicleApi;
use crate::domain::command::ModeForm;
use crate::domain::hud::HudState;
use crate::domain::pose::PoseRenderer;
use crate::domain::telemetry::TelemetrySample;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

pub struct HudService {
    api: Arc<dyn VehicleApi>,
    period: Duration,
    renderer: Arc<dyn PoseRenderer>,
    mode_form: Arc<Mutex<ModeForm>>,
}

impl HudService {
    pub fn new(
        api: Arc<dyn VehicleApi>,
        period: Duration,
        renderer: Arc<dyn PoseRenderer>,
        mode_form: Arc<Mutex<ModeForm>>,
    ) -> Self {
        Self {
            api,
            period,
            renderer,
            mode_form,
        }
    }

    /// Poll forever, publishing every admitted sample into `state`.
    pub async fn run(self, state: watch::Sender<HudState>) {
        tracing::info!(
            "HUD polling every {:?} with {} pose renderer",
            self.period,
            self.renderer.name()
        );

        let (mut samples, poller) =
            TelemetryPoller::new(self.api.clone(), self.period, "hud").spawn();
        let mut gate = SequenceGate::default();

        while let Some(msg) = samples.recv().await {
            self.apply(&mut gate, &state, msg);
        }
        poller.abort();
    }

    fn apply(
        &self,
        gate: &mut SequenceGate,
        state: &watch::Sender<HudState>,
        msg: Sequenced<TelemetrySample>,
    ) {
        if !gate.admit(msg.seq) {
            tracing::trace!("hud: dropping stale status #{}", msg.seq);
            return;
        }

        if let Ok(mut form) = self.mode_form.lock() {
            form.sync(msg.value.modes);
        }

        let renderer = self.renderer.as_ref();
        state.send_modify(|hud| {
            *hud = HudState::reduce(hud, &msg.value, renderer, Utc::now());
        });
    }
}
