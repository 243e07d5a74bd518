// Command domain models - what the console sends to the vehicle
use super::telemetry::null_as_default;
use serde::{Deserialize, Serialize};

pub const COMMAND_LIMIT: i32 = 100;

/// Drive or camera intent, each axis in [-100, 100]. Positive y is "up".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandVector {
    pub x: i32,
    pub y: i32,
}

impl CommandVector {
    pub const ZERO: CommandVector = CommandVector { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x: x.clamp(-COMMAND_LIMIT, COMMAND_LIMIT),
            y: y.clamp(-COMMAND_LIMIT, COMMAND_LIMIT),
        }
    }

    /// Quantize a unit-disk vector in screen coordinates (y grows downward).
    pub fn from_screen_unit(nx: f64, ny: f64) -> Self {
        let scale = COMMAND_LIMIT as f64;
        Self::new((nx * scale).round() as i32, (-ny * scale).round() as i32)
    }
}

/// Names of the five mode toggles, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeName {
    LineTrack,
    AvoidObstacles,
    FaceDetect,
    ColorDetect,
    ColorFollow,
}

/// The full set of mode flags. Always sent whole, never as a partial update.
/// Each flag reads `null` or absence as false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeSet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub line_track: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avoid_obstacles: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub face_detect: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color_detect: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color_follow: bool,
}

impl ModeSet {
    pub fn get(&self, mode: ModeName) -> bool {
        match mode {
            ModeName::LineTrack => self.line_track,
            ModeName::AvoidObstacles => self.avoid_obstacles,
            ModeName::FaceDetect => self.face_detect,
            ModeName::ColorDetect => self.color_detect,
            ModeName::ColorFollow => self.color_follow,
        }
    }

    pub fn with(mut self, mode: ModeName, checked: bool) -> Self {
        let slot = match mode {
            ModeName::LineTrack => &mut self.line_track,
            ModeName::AvoidObstacles => &mut self.avoid_obstacles,
            ModeName::FaceDetect => &mut self.face_detect,
            ModeName::ColorDetect => &mut self.color_detect,
            ModeName::ColorFollow => &mut self.color_follow,
        };
        *slot = checked;
        self
    }
}

/// Checked state of the mode toggles as the operator sees them.
///
/// A toggle change produces the whole set, read at the moment of the change.
/// Status samples overwrite the form so it tracks what the vehicle reports.
#[derive(Debug, Clone, Default)]
pub struct ModeForm {
    current: ModeSet,
}

impl ModeForm {
    pub fn toggle(&mut self, mode: ModeName, checked: bool) -> ModeSet {
        self.current = self.current.with(mode, checked);
        self.current
    }

    pub fn sync(&mut self, reported: ModeSet) {
        self.current = reported;
    }
}

/// Inclusive range a settings slider can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderRange {
    pub min: i32,
    pub max: i32,
}

/// One slider commit. Each variant owns exactly one settings key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsDelta {
    SpeedLimit(i32),
    SafeDistance(i32),
    DangerDistance(i32),
}

impl SettingsDelta {
    pub fn range(&self) -> SliderRange {
        match self {
            SettingsDelta::SpeedLimit(_) => SliderRange { min: 0, max: 100 },
            SettingsDelta::SafeDistance(_) => SliderRange { min: 20, max: 80 },
            SettingsDelta::DangerDistance(_) => SliderRange { min: 5, max: 40 },
        }
    }

    pub fn value(&self) -> i32 {
        match *self {
            SettingsDelta::SpeedLimit(v)
            | SettingsDelta::SafeDistance(v)
            | SettingsDelta::DangerDistance(v) => v,
        }
    }

    /// Same key, value pinned to the slider's range.
    pub fn clamped(self) -> Self {
        let SliderRange { min, max } = self.range();
        let v = self.value().clamp(min, max);
        match self {
            SettingsDelta::SpeedLimit(_) => SettingsDelta::SpeedLimit(v),
            SettingsDelta::SafeDistance(_) => SettingsDelta::SafeDistance(v),
            SettingsDelta::DangerDistance(_) => SettingsDelta::DangerDistance(v),
        }
    }
}
