// History loader - seeds the charts with recorded samples before live polling
use crate::application::vehicle_api::VehicleApi;
use crate::domain::charts::ChartBoard;
use std::sync::Arc;

#[derive(Clone)]
pub struct HistoryLoader {
    api: Arc<dyn VehicleApi>,
    seconds: u32,
}

impl HistoryLoader {
    pub fn new(api: Arc<dyn VehicleApi>, seconds: u32) -> Self {
        Self { api, seconds }
    }

    /// Fetch recorded samples and replay them into a freshly reset board.
    ///
    /// Returns the number of samples replayed. On failure the board is left
    /// untouched and `None` is returned; live polling carries on either way.
    pub async fn load(&self, board: &mut ChartBoard) -> Option<usize> {
        match self.api.fetch_history(self.seconds).await {
            Ok(samples) => {
                board.reset();
                for sample in &samples {
                    board.push_sample(sample);
                }
                tracing::info!(
                    "Replayed {} history samples (last {}s), index now {}",
                    samples.len(),
                    self.seconds,
                    board.index()
                );
                Some(samples.len())
            }
            Err(e) => {
                tracing::warn!("History unavailable, starting with empty charts: {:#}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::vehicle_api::fake::FakeVehicleApi;
    use crate::domain::charts::default_layout;
    use crate::domain::telemetry::TelemetrySample;

    fn samples(n: usize) -> Vec<TelemetrySample> {
        (0..n)
            .map(|i| TelemetrySample {
                speed: i as f64,
                ..TelemetrySample::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_replay_resets_then_appends() {
        let (api, _posts) = FakeVehicleApi::new();
        let loader = HistoryLoader::new(Arc::new(api.with_history(samples(3))), 600);

        let mut board = ChartBoard::new(default_layout(), 600);
        board.push_sample(&TelemetrySample::default());
        board.push_sample(&TelemetrySample::default());

        assert_eq!(loader.load(&mut board).await, Some(3));
        assert_eq!(board.index(), 3);

        let speed = board.chart("speed").unwrap();
        assert_eq!(speed.buffer.labels().iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(speed.buffer.series()[0].data.iter().copied().collect::<Vec<_>>(), vec![0.0, 1.0, 2.0]);
    }

    #[tokio::test]
    async fn test_replay_then_live_is_gap_free() {
        let (api, _posts) = FakeVehicleApi::new();
        let loader = HistoryLoader::new(Arc::new(api.with_history(samples(5))), 600);

        let mut board = ChartBoard::new(default_layout(), 600);
        loader.load(&mut board).await;
        for sample in samples(4) {
            board.push_sample(&sample);
        }

        for chart in board.charts() {
            let labels: Vec<u64> = chart.buffer.labels().iter().copied().collect();
            assert_eq!(labels, (1..=9).collect::<Vec<u64>>());
        }
    }

    #[tokio::test]
    async fn test_failed_history_leaves_board_as_is() {
        let (api, _posts) = FakeVehicleApi::new();
        let loader = HistoryLoader::new(Arc::new(api), 600);

        let mut board = ChartBoard::new(default_layout(), 600);
        assert_eq!(loader.load(&mut board).await, None);
        assert_eq!(board.index(), 0);
        assert!(board.charts().iter().all(|c| c.buffer.is_empty()));
    }

    #[tokio::test]
    async fn test_long_history_is_trimmed_to_capacity() {
        let (api, _posts) = FakeVehicleApi::new();
        let loader = HistoryLoader::new(Arc::new(api.with_history(samples(700))), 600);

        let mut board = ChartBoard::new(default_layout(), 600);
        loader.load(&mut board).await;

        let speed = board.chart("speed").unwrap();
        assert_eq!(speed.buffer.len(), 600);
        assert_eq!(speed.buffer.labels().front(), Some(&101));
        assert_eq!(board.index(), 700);
    }
}
