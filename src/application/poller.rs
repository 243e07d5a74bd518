// Telemetry poller - fixed-period status fetches tagged with a sequence number
use crate::application::vehicle_api::VehicleApi;
use crate::domain::telemetry::TelemetrySample;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A response paired with the sequence number its request was sent under.
#[derive(Debug, Clone)]
pub struct Sequenced<T> {
    pub seq: u64,
    pub value: T,
}

/// Admits a response only if it is not older than the last one admitted.
///
/// Requests overlap when the vehicle is slow, so responses may arrive out of
/// order; a late answer to an earlier request must not overwrite a newer one.
#[derive(Debug, Default)]
pub struct SequenceGate {
    last_applied: Option<u64>,
}

impl SequenceGate {
    pub fn admit(&mut self, seq: u64) -> bool {
        match self.last_applied {
            Some(last) if seq < last => false,
            _ => {
                self.last_applied = Some(seq);
                true
            }
        }
    }
}

pub struct TelemetryPoller {
    api: Arc<dyn VehicleApi>,
    period: Duration,
    name: &'static str,
}

impl TelemetryPoller {
    pub fn new(api: Arc<dyn VehicleApi>, period: Duration, name: &'static str) -> Self {
        Self { api, period, name }
    }

    /// Start ticking. Every tick sends one status request without waiting for
    /// earlier ones; successful responses arrive on the returned channel in
    /// completion order. Failures are logged and skipped.
    pub fn spawn(self) -> (mpsc::Receiver<Sequenced<TelemetrySample>>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut seq: u64 = 0;

            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    tracing::debug!("{} poller stopped, consumer gone", self.name);
                    break;
                }

                seq += 1;
                let api = self.api.clone();
                let tx = tx.clone();
                let name = self.name;
                let this_seq = seq;

                tokio::spawn(async move {
                    match api.fetch_status().await {
                        Ok(value) => {
                            let _ = tx.send(Sequenced { seq: this_seq, value }).await;
                        }
                        Err(e) => {
                            tracing::debug!("{} poll #{} skipped: {:#}", name, this_seq, e);
                        }
                    }
                });
            }
        });

        (rx, handle)
    }
}
