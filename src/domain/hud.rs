// HUD classification - telemetry sample to discrete display states
use super::command::ModeSet;
use super::pose::{PoseFrame, PoseRenderer};
use super::telemetry::{LineState, Motion, TelemetrySample};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_SAFE_DISTANCE: f64 = 40.0;
pub const DEFAULT_DANGER_DISTANCE: f64 = 20.0;

/// Evaluated in order; the last flag that is set decides the label.
pub fn mode_label(modes: &ModeSet) -> &'static str {
    let mut label = "Manual";
    if modes.line_track {
        label = "Line track";
    }
    if modes.avoid_obstacles {
        label = "Avoid obstacles";
    }
    if modes.color_follow {
        label = "Color follow";
    }
    label
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RadarZone {
    Safe,
    Obstacle,
    Danger,
}

impl RadarZone {
    /// Non-positive readings mean "nothing in range".
    pub fn classify(distance: f64, safe_distance: f64, danger_distance: f64) -> Self {
        if distance <= 0.0 || distance > safe_distance {
            RadarZone::Safe
        } else if distance > danger_distance {
            RadarZone::Obstacle
        } else {
            RadarZone::Danger
        }
    }

    pub fn for_sample(sample: &TelemetrySample) -> Self {
        let safe = threshold(sample.safe_distance, DEFAULT_SAFE_DISTANCE);
        let danger = threshold(sample.danger_distance, DEFAULT_DANGER_DISTANCE);
        Self::classify(sample.distance, safe, danger)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RadarZone::Safe => "Safe",
            RadarZone::Obstacle => "Obstacle",
            RadarZone::Danger => "Too close",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            RadarZone::Safe => "radar-safe",
            RadarZone::Obstacle => "radar-close",
            RadarZone::Danger => "radar-danger",
        }
    }
}

// A zero threshold is as good as absent.
fn threshold(reported: Option<f64>, default: f64) -> f64 {
    reported.filter(|v| *v > 0.0).unwrap_or(default)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStatus {
    pub label: &'static str,
    /// Horizontal position of the car dot, percent of the track width.
    pub offset_pct: f64,
}

impl LineStatus {
    pub fn classify(state: LineState) -> Self {
        let (label, offset_pct) = match state {
            LineState::Forward => ("Center", 50.0),
            LineState::Left => ("Left", 35.0),
            LineState::Right => ("Right", 65.0),
            LineState::NoLine => ("No line", 50.0),
        };
        Self { label, offset_pct }
    }
}

/// Needle rotation in degrees: -90 at 0, +90 at full scale.
pub fn gauge_angle(speed: f64) -> f64 {
    -90.0 + speed.clamp(0.0, 100.0) / 100.0 * 180.0
}

pub fn line_readout(line: &[f64; 3]) -> String {
    let parts: Vec<String> = line.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SliderValues {
    pub speed_limit: Option<f64>,
    pub safe_distance: Option<f64>,
    pub danger_distance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarView {
    pub zone: RadarZone,
    pub label: &'static str,
    pub class: &'static str,
}

impl From<RadarZone> for RadarView {
    fn from(zone: RadarZone) -> Self {
        Self {
            zone,
            label: zone.label(),
            class: zone.css_class(),
        }
    }
}

/// Everything the HUD draws, recomputed in full from each applied sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudState {
    pub speed: f64,
    pub needle_angle: f64,
    pub distance: f64,
    pub line_readout: String,
    pub mode_label: &'static str,
    pub modes: ModeSet,
    pub sliders: SliderValues,
    pub motion_text: String,
    pub pose: PoseFrame,
    pub radar: RadarView,
    pub line: LineStatus,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            speed: 0.0,
            needle_angle: gauge_angle(0.0),
            distance: 0.0,
            line_readout: line_readout(&[0.0; 3]),
            mode_label: mode_label(&ModeSet::default()),
            modes: ModeSet::default(),
            sliders: SliderValues::default(),
            motion_text: Motion::Stop.label(),
            pose: PoseFrame::default(),
            radar: RadarZone::Safe.into(),
            line: LineStatus::classify(LineState::NoLine),
            updated_at: None,
        }
    }
}

impl HudState {
    /// Next HUD state from the previous one and a fresh sample.
    ///
    /// Only the slider values carry over: a sample that omits a setting
    /// leaves that slider where it was.
    pub fn reduce(
        previous: &HudState,
        sample: &TelemetrySample,
        renderer: &dyn PoseRenderer,
        now: DateTime<Utc>,
    ) -> HudState {
        let sliders = SliderValues {
            speed_limit: sample.speed_limit.or(previous.sliders.speed_limit),
            safe_distance: sample.safe_distance.or(previous.sliders.safe_distance),
            danger_distance: sample.danger_distance.or(previous.sliders.danger_distance),
        };

        HudState {
            speed: sample.speed,
            needle_angle: gauge_angle(sample.speed),
            distance: sample.distance,
            line_readout: line_readout(&sample.line),
            mode_label: mode_label(&sample.modes),
            modes: sample.modes,
            sliders,
            motion_text: sample.motion.label(),
            pose: renderer.render_pose(&sample.motion, sample.speed_fraction(), now.timestamp_millis()),
            radar: RadarZone::for_sample(sample).into(),
            line: LineStatus::classify(sample.line_state),
            updated_at: Some(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pose::CssRenderer;

    fn modes(line_track: bool, avoid_obstacles: bool, color_follow: bool) -> ModeSet {
        ModeSet {
            line_track,
            avoid_obstacles,
            color_follow,
            ..ModeSet::default()
        }
    }

    #[test]
    fn test_mode_label_last_match_wins() {
        assert_eq!(mode_label(&modes(true, true, false)), "Avoid obstacles");
        assert_eq!(mode_label(&modes(false, false, false)), "Manual");
        assert_eq!(mode_label(&modes(true, true, true)), "Color follow");
        assert_eq!(mode_label(&modes(true, false, false)), "Line track");
    }

    #[test]
    fn test_radar_zones() {
        assert_eq!(RadarZone::classify(0.0, 40.0, 20.0), RadarZone::Safe);
        assert_eq!(RadarZone::classify(25.0, 40.0, 20.0), RadarZone::Obstacle);
        assert_eq!(RadarZone::classify(15.0, 40.0, 20.0), RadarZone::Danger);
        assert_eq!(RadarZone::classify(41.0, 40.0, 20.0), RadarZone::Safe);
        assert_eq!(RadarZone::classify(40.0, 40.0, 20.0), RadarZone::Obstacle);
        assert_eq!(RadarZone::classify(20.0, 40.0, 20.0), RadarZone::Danger);
        assert_eq!(RadarZone::classify(-3.0, 40.0, 20.0), RadarZone::Safe);
    }

    #[test]
    fn test_radar_uses_default_thresholds() {
        let sample = TelemetrySample {
            distance: 35.0,
            ..TelemetrySample::default()
        };
        assert_eq!(RadarZone::for_sample(&sample), RadarZone::Obstacle);

        let sample = TelemetrySample {
            distance: 35.0,
            safe_distance: Some(30.0),
            danger_distance: Some(10.0),
            ..TelemetrySample::default()
        };
        assert_eq!(RadarZone::for_sample(&sample), RadarZone::Safe);
        assert_eq!(RadarView::from(RadarZone::Danger).class, "radar-danger");

        let sample = TelemetrySample {
            distance: 35.0,
            safe_distance: Some(0.0),
            danger_distance: Some(-5.0),
            ..TelemetrySample::default()
        };
        assert_eq!(RadarZone::for_sample(&sample), RadarZone::Obstacle);
        let sample = TelemetrySample {
            distance: 18.0,
            ..sample
        };
        assert_eq!(RadarZone::for_sample(&sample), RadarZone::Danger);
    }

    #[test]
    fn test_line_status() {
        assert_eq!(LineStatus::classify(LineState::Forward).label, "Center");
        assert_eq!(LineStatus::classify(LineState::Left).offset_pct, 35.0);
        assert_eq!(LineStatus::classify(LineState::Right).offset_pct, 65.0);
        let none = LineStatus::classify(LineState::NoLine);
        assert_eq!((none.label, none.offset_pct), ("No line", 50.0));
    }

    #[test]
    fn test_gauge_angle_is_clamped() {
        assert_eq!(gauge_angle(0.0), -90.0);
        assert_eq!(gauge_angle(50.0), 0.0);
        assert_eq!(gauge_angle(100.0), 90.0);
        assert_eq!(gauge_angle(140.0), 90.0);
    }

    #[test]
    fn test_reduce_recomputes_and_keeps_sliders() {
        let now = Utc::now();
        let first = TelemetrySample {
            speed: 50.0,
            distance: 15.0,
            line: [0.0, 1.0, 0.0],
            modes: modes(true, false, false),
            motion: Motion::Left,
            line_state: LineState::Forward,
            speed_limit: Some(80.0),
            safe_distance: Some(40.0),
            danger_distance: Some(20.0),
            ..TelemetrySample::default()
        };
        let hud = HudState::reduce(&HudState::default(), &first, &CssRenderer, now);

        assert_eq!(hud.needle_angle, 0.0);
        assert_eq!(hud.line_readout, "[0, 1, 0]");
        assert_eq!(hud.mode_label, "Line track");
        assert_eq!(hud.motion_text, "Left");
        assert_eq!(hud.radar.zone, RadarZone::Danger);
        assert_eq!(hud.line.label, "Center");
        assert_eq!(hud.sliders.speed_limit, Some(80.0));

        let second = TelemetrySample {
            speed: 10.0,
            speed_limit: Some(60.0),
            ..TelemetrySample::default()
        };
        let hud = HudState::reduce(&hud, &second, &CssRenderer, now);

        assert_eq!(hud.sliders.speed_limit, Some(60.0));
        assert_eq!(hud.sliders.safe_distance, Some(40.0));
        assert_eq!(hud.sliders.danger_distance, Some(20.0));
        assert_eq!(hud.mode_label, "Manual");
        assert_eq!(hud.motion_text, "Stop");
        assert_eq!(hud.line.label, "No line");
        assert_eq!(hud.updated_at, Some(now));
    }
}
