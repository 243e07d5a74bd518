// Chart board - the console's charts and the sample index they share
use super::command::ModeName;
use super::series::SeriesBuffer;
use super::telemetry::TelemetrySample;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Line,
    MultiLine,
}

/// A telemetry value a series can plot. Flags plot as 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleField {
    Speed,
    RawSpeed,
    CpuTemp,
    Distance,
    LineLeft,
    LineMiddle,
    LineRight,
    LineTrack,
    AvoidObstacles,
    ColorFollow,
    Obstacle,
}

impl SampleField {
    pub fn extract(&self, sample: &TelemetrySample) -> f64 {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        match self {
            SampleField::Speed => sample.speed,
            SampleField::RawSpeed => sample.raw_speed,
            SampleField::CpuTemp => sample.cpu_temp,
            SampleField::Distance => sample.distance,
            SampleField::LineLeft => sample.line[0],
            SampleField::LineMiddle => sample.line[1],
            SampleField::LineRight => sample.line[2],
            SampleField::LineTrack => flag(sample.modes.get(ModeName::LineTrack)),
            SampleField::AvoidObstacles => flag(sample.modes.get(ModeName::AvoidObstacles)),
            SampleField::ColorFollow => flag(sample.modes.get(ModeName::ColorFollow)),
            SampleField::Obstacle => flag(sample.obstacle_detected),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub name: String,
    pub color: Option<String>,
    pub field: SampleField,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    #[serde(default)]
    pub series: Vec<SeriesSpec>,
}

fn series(name: &str, color: &str, field: SampleField) -> SeriesSpec {
    SeriesSpec {
        name: name.to_string(),
        color: Some(color.to_string()),
        field,
    }
}

fn chart(
    id: &str,
    title: &str,
    unit: Option<&str>,
    kind: ChartKind,
    y_range: (f64, f64),
    series: Vec<SeriesSpec>,
) -> ChartSpec {
    ChartSpec {
        id: id.to_string(),
        title: title.to_string(),
        unit: unit.map(str::to_string),
        kind,
        y_min: Some(y_range.0),
        y_max: Some(y_range.1),
        series,
    }
}

/// The six charts of the operator console.
pub fn default_layout() -> Vec<ChartSpec> {
    use SampleField::*;

    vec![
        chart(
            "speed",
            "Speed (smoothed)",
            None,
            ChartKind::Line,
            (0.0, 100.0),
            vec![series("Speed", "#4f9cff", Speed)],
        ),
        chart(
            "motor",
            "Motor input",
            None,
            ChartKind::Line,
            (0.0, 100.0),
            vec![series("Motor input", "#ffb347", RawSpeed)],
        ),
        chart(
            "cpu",
            "CPU temp",
            Some("°C"),
            ChartKind::Line,
            (20.0, 90.0),
            vec![series("CPU temp", "#ff6b9b", CpuTemp)],
        ),
        chart(
            "distance",
            "Distance",
            Some("cm"),
            ChartKind::Line,
            (0.0, 150.0),
            vec![series("Distance", "#4ade80", Distance)],
        ),
        chart(
            "line",
            "Line sensors",
            None,
            ChartKind::MultiLine,
            (-0.1, 1.1),
            vec![
                series("Left", "#f97373", LineLeft),
                series("Middle", "#facc15", LineMiddle),
                series("Right", "#38bdf8", LineRight),
            ],
        ),
        chart(
            "modes",
            "Modes",
            None,
            ChartKind::MultiLine,
            (-0.1, 1.1),
            vec![
                series("Line track", "#6366f1", LineTrack),
                series("Avoid obstacles", "#22c55e", AvoidObstacles),
                series("Color follow", "#f97316", ColorFollow),
                series("Obstacle", "#ef4444", Obstacle),
            ],
        ),
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    #[serde(flatten)]
    pub spec: ChartSpec,
    pub buffer: SeriesBuffer,
}

/// All charts plus the shared sample index.
///
/// The index is bumped once per appended sample and is only reset by
/// [`ChartBoard::reset`], which history loading calls before replaying.
#[derive(Debug, Clone, Serialize)]
pub struct ChartBoard {
    index: u64,
    charts: Vec<Chart>,
}

impl ChartBoard {
    pub fn new(layout: Vec<ChartSpec>, capacity: usize) -> Self {
        let charts = layout
            .into_iter()
            .map(|spec| {
                let buffer = SeriesBuffer::new(
                    capacity,
                    spec.series.iter().map(|s| (s.name.clone(), s.color.clone())),
                );
                Chart { spec, buffer }
            })
            .collect();

        Self { index: 0, charts }
    }

    pub fn push_sample(&mut self, sample: &TelemetrySample) -> u64 {
        self.index += 1;
        for chart in &mut self.charts {
            let values: Vec<f64> = chart.spec.series.iter().map(|s| s.field.extract(sample)).collect();
            chart.buffer.push(self.index, &values);
        }
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
        for chart in &mut self.charts {
            chart.buffer.clear();
        }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    pub fn chart(&self, id: &str) -> Option<&Chart> {
        self.charts.iter().find(|c| c.spec.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::command::ModeSet;

    fn sample(speed: f64) -> TelemetrySample {
        TelemetrySample {
            speed,
            raw_speed: speed + 1.0,
            distance: 30.0,
            cpu_temp: 48.0,
            line: [1.0, 0.0, 1.0],
            modes: ModeSet {
                avoid_obstacles: true,
                ..ModeSet::default()
            },
            obstacle_detected: true,
            ..TelemetrySample::default()
        }
    }

    #[test]
    fn test_default_layout_tracks_eleven_series() {
        let layout = default_layout();
        assert_eq!(layout.len(), 6);
        assert_eq!(layout.iter().map(|c| c.series.len()).sum::<usize>(), 11);
    }

    #[test]
    fn test_push_sample_fills_every_chart() {
        let mut board = ChartBoard::new(default_layout(), 600);
        assert_eq!(board.push_sample(&sample(20.0)), 1);
        assert_eq!(board.push_sample(&sample(30.0)), 2);

        let speed = board.chart("speed").unwrap();
        assert_eq!(speed.buffer.series()[0].data.iter().copied().collect::<Vec<_>>(), vec![20.0, 30.0]);

        let motor = board.chart("motor").unwrap();
        assert_eq!(motor.buffer.series()[0].data.back(), Some(&31.0));

        let line = board.chart("line").unwrap();
        let last: Vec<f64> = line.buffer.series().iter().map(|s| *s.data.back().unwrap()).collect();
        assert_eq!(last, vec![1.0, 0.0, 1.0]);

        let modes = board.chart("modes").unwrap();
        let last: Vec<f64> = modes.buffer.series().iter().map(|s| *s.data.back().unwrap()).collect();
        assert_eq!(last, vec![0.0, 1.0, 0.0, 1.0]);

        for chart in board.charts() {
            assert_eq!(chart.buffer.labels().iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        }
    }

    #[test]
    fn test_reset_restarts_index() {
        let mut board = ChartBoard::new(default_layout(), 600);
        board.push_sample(&sample(10.0));
        board.push_sample(&sample(10.0));
        board.reset();

        assert_eq!(board.index(), 0);
        assert!(board.charts().iter().all(|c| c.buffer.is_empty()));
        assert_eq!(board.push_sample(&sample(10.0)), 1);
    }

    #[test]
    fn test_chart_spec_reads_from_config_shape() {
        let spec: ChartSpec = serde_json::from_value(serde_json::json!({
            "id": "temp",
            "title": "Temperature",
            "unit": "°C",
            "kind": "line",
            "y_min": 20.0,
            "y_max": 90.0,
            "series": [{ "name": "CPU", "color": null, "field": "cpu_temp" }]
        }))
        .unwrap();

        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.series[0].field, SampleField::CpuTemp);
    }

    #[test]
    fn test_multi_series_kind_spelling() {
        assert_eq!(serde_json::to_value(ChartKind::MultiLine).unwrap(), serde_json::json!("multi-line"));
        let kind: ChartKind = serde_json::from_value(serde_json::json!("multi-line")).unwrap();
        assert_eq!(kind, ChartKind::MultiLine);
    }
}
