// Chart pipeline - history seed, then slow status polling into the chart board
use crate::application::history::HistoryLoader;
use crate::application::poller::{SequenceGate, TelemetryPoller};
use crate::application::vehicle_api::VehicleApi;
use crate::domain::charts::ChartBoard;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};

#[derive(Debug)]
pub enum ChartCommand {
    /// Re-run the history load; replies with the replayed sample count.
    Reload(oneshot::Sender<Option<usize>>),
}

/// Owns the chart board. Appends and reloads are handled one at a time on
/// this task, so a reload never interleaves with a live append.
pub struct ChartService {
    api: Arc<dyn VehicleApi>,
    period: Duration,
    loader: HistoryLoader,
    board: ChartBoard,
}

impl ChartService {
    pub fn new(api: Arc<dyn VehicleApi>, period: Duration, history_seconds: u32, board: ChartBoard) -> Self {
        let loader = HistoryLoader::new(api.clone(), history_seconds);
        Self {
            api,
            period,
            loader,
            board,
        }
    }

    pub async fn run(mut self, view: watch::Sender<ChartBoard>, mut commands: mpsc::Receiver<ChartCommand>) {
        self.loader.load(&mut self.board).await;
        view.send_replace(self.board.clone());

        tracing::info!("Chart polling every {:?}", self.period);
        let (mut samples, poller) =
            TelemetryPoller::new(self.api.clone(), self.period, "charts").spawn();
        let mut gate = SequenceGate::default();

        loop {
            tokio::select! {
                Some(msg) = samples.recv() => {
                    if !gate.admit(msg.seq) {
                        tracing::trace!("charts: dropping stale status #{}", msg.seq);
                        continue;
                    }
                    self.board.push_sample(&msg.value);
                    view.send_replace(self.board.clone());
                }
                Some(command) = commands.recv() => match command {
                    ChartCommand::Reload(reply) => {
                        let replayed = self.loader.load(&mut self.board).await;
                        view.send_replace(self.board.clone());
                        let _ = reply.send(replayed);
                    }
                },
                else => break,
            }
        }
        poller.abort();
    }
}
