// Telemetry data domain models
use super::command::ModeSet;
use serde::{Deserialize, Deserializer, Serialize};

/// Motion the vehicle reports. Strings it does not know are kept as sent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    #[default]
    Stop,
    Forward,
    Backward,
    Left,
    Right,
    #[serde(untagged)]
    Other(String),
}

impl Motion {
    /// Display text: the reported motion with its first letter capitalized.
    pub fn label(&self) -> String {
        match self {
            Motion::Stop => "Stop".to_string(),
            Motion::Forward => "Forward".to_string(),
            Motion::Backward => "Backward".to_string(),
            Motion::Left => "Left".to_string(),
            Motion::Right => "Right".to_string(),
            Motion::Other(raw) => {
                let mut chars = raw.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// What the line sensors see. The vehicle reports "stop" when no line is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineState {
    Forward,
    Left,
    Right,
    #[default]
    #[serde(other)]
    NoLine,
}

/// One snapshot from `/api/status` or one row of `/api/history`.
///
/// Every field tolerates absence or `null`: numbers fall back to 0, flags to
/// false, enums to their resting variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    #[serde(default, deserialize_with = "null_as_default")]
    pub speed: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub raw_speed: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub distance: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cpu_temp: f64,
    #[serde(default, deserialize_with = "line_channels")]
    pub line: [f64; 3],
    #[serde(default, deserialize_with = "null_as_default")]
    pub modes: ModeSet,
    #[serde(default, alias = "obstacle", deserialize_with = "null_as_default")]
    pub obstacle_detected: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub motion: Motion,
    #[serde(default, deserialize_with = "null_as_default")]
    pub line_state: LineState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub danger_distance: Option<f64>,
    /// Epoch seconds; only history rows carry it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<f64>,
}

impl TelemetrySample {
    /// Speed as a fraction of full scale, pinned to [0, 1].
    pub fn speed_fraction(&self) -> f64 {
        self.speed.clamp(0.0, 100.0) / 100.0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<TelemetrySample>,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn line_channels<'de, D>(deserializer: D) -> Result<[f64; 3], D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Option<f64>>>::deserialize(deserializer)?.unwrap_or_default();
    let mut channels = [0.0; 3];
    for (slot, value) in channels.iter_mut().zip(raw) {
        *slot = value.unwrap_or(0.0);
    }
    Ok(channels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_payload_parses() {
        let sample: TelemetrySample = serde_json::from_value(json!({
            "speed": 42,
            "raw_speed": 40,
            "distance": 33,
            "line": [0, 1, 0],
            "modes": {
                "line_track": true,
                "avoid_obstacles": false,
                "face_detect": false,
                "color_detect": false,
                "color_follow": false
            },
            "speed_limit": 80,
            "motion": "forward",
            "line_state": "forward",
            "obstacle_detected": true,
            "safe_distance": 40,
            "danger_distance": 20,
            "cpu_temp": 51.5
        }))
        .unwrap();

        assert_eq!(sample.speed, 42.0);
        assert_eq!(sample.line, [0.0, 1.0, 0.0]);
        assert!(sample.modes.line_track);
        assert!(sample.obstacle_detected);
        assert_eq!(sample.motion, Motion::Forward);
        assert_eq!(sample.line_state, LineState::Forward);
        assert_eq!(sample.speed_limit, Some(80.0));
        assert_eq!(sample.cpu_temp, 51.5);
    }

    #[test]
    fn test_partial_payload_degrades_to_defaults() {
        let sample: TelemetrySample = serde_json::from_value(json!({
            "distance": null,
            "line": [1],
            "motion": "spinning",
            "line_state": "stop"
        }))
        .unwrap();

        assert_eq!(sample.speed, 0.0);
        assert_eq!(sample.distance, 0.0);
        assert_eq!(sample.line, [1.0, 0.0, 0.0]);
        assert_eq!(sample.modes, ModeSet::default());
        assert!(!sample.obstacle_detected);
        assert_eq!(sample.motion, Motion::Other("spinning".to_string()));
        assert_eq!(sample.motion.label(), "Spinning");
        assert_eq!(sample.line_state, LineState::NoLine);
        assert_eq!(sample.safe_distance, None);
    }

    #[test]
    fn test_null_mode_flags_read_as_false() {
        let sample: TelemetrySample = serde_json::from_value(json!({
            "speed": 40,
            "modes": { "line_track": null, "color_follow": true }
        }))
        .unwrap();

        assert_eq!(sample.speed, 40.0);
        assert!(!sample.modes.line_track);
        assert!(sample.modes.color_follow);
        assert!(!sample.modes.face_detect);
    }

    #[test]
    fn test_known_motion_labels() {
        let parsed: Motion = serde_json::from_value(json!("backward")).unwrap();
        assert_eq!(parsed, Motion::Backward);
        assert_eq!(parsed.label(), "Backward");
        assert_eq!(Motion::Other(String::new()).label(), "");
        assert_eq!(serde_json::to_value(Motion::Other("drift".to_string())).unwrap(), json!("drift"));
    }

    #[test]
    fn test_history_row_uses_obstacle_key() {
        let response: HistoryResponse = serde_json::from_value(json!({
            "history": [
                { "ts": 1700000000.5, "speed": 10, "obstacle": true },
                { "ts": 1700000001.5, "speed": 12, "obstacle": false }
            ]
        }))
        .unwrap();

        assert_eq!(response.history.len(), 2);
        assert!(response.history[0].obstacle_detected);
        assert!(!response.history[1].obstacle_detected);
        assert_eq!(response.history[0].ts, Some(1700000000.5));
    }

    #[test]
    fn test_missing_history_is_empty() {
        let response: HistoryResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.history.is_empty());
    }

    #[test]
    fn test_speed_fraction_is_bounded() {
        let mut sample = TelemetrySample::default();
        sample.speed = 150.0;
        assert_eq!(sample.speed_fraction(), 1.0);
        sample.speed = -5.0;
        assert_eq!(sample.speed_fraction(), 0.0);
        sample.speed = 25.0;
        assert_eq!(sample.speed_fraction(), 0.25);
    }
}
