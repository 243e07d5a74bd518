// Vehicle pose rendering - 3D scene or CSS transform, chosen once at startup
use super::telemetry::Motion;
use serde::Serialize;
use std::sync::Arc;

const SCENE_YAW_RAD: f64 = 0.5;
const SCENE_BOB_AMPLITUDE: f64 = 0.1;
const SCENE_BOB_PERIOD_MS: f64 = 200.0;
const CSS_YAW_DEG: i32 = 10;

/// What the display should do with the car model for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum PoseFrame {
    Scene { yaw: f64, lift: f64 },
    Css { transform: String },
}

impl Default for PoseFrame {
    fn default() -> Self {
        PoseFrame::Css {
            transform: css_transform(0),
        }
    }
}

pub trait PoseRenderer: Send + Sync {
    fn name(&self) -> &'static str;

    /// `now_ms` only drives the idle bob; it carries no telemetry meaning.
    fn render_pose(&self, motion: &Motion, speed_fraction: f64, now_ms: i64) -> PoseFrame;
}

/// Full 3D model: yaw toward the turn, bob proportional to speed.
#[derive(Debug, Default)]
pub struct SceneRenderer;

impl PoseRenderer for SceneRenderer {
    fn name(&self) -> &'static str {
        "scene"
    }

    fn render_pose(&self, motion: &Motion, speed_fraction: f64, now_ms: i64) -> PoseFrame {
        let yaw = match motion {
            Motion::Left => SCENE_YAW_RAD,
            Motion::Right => -SCENE_YAW_RAD,
            _ => 0.0,
        };
        let phase = now_ms as f64 / SCENE_BOB_PERIOD_MS;
        let lift = SCENE_BOB_AMPLITUDE * phase.sin() * speed_fraction.clamp(0.0, 1.0);
        PoseFrame::Scene { yaw, lift }
    }
}

/// Flat fallback: a perspective tilt of the canvas element.
#[derive(Debug, Default)]
pub struct CssRenderer;

impl PoseRenderer for CssRenderer {
    fn name(&self) -> &'static str {
        "css"
    }

    fn render_pose(&self, motion: &Motion, _speed_fraction: f64, _now_ms: i64) -> PoseFrame {
        let deg = match motion {
            Motion::Left => -CSS_YAW_DEG,
            Motion::Right => CSS_YAW_DEG,
            _ => 0,
        };
        PoseFrame::Css {
            transform: css_transform(deg),
        }
    }
}

fn css_transform(deg: i32) -> String {
    format!("perspective(300px) rotateY({}deg)", deg)
}

pub fn select_pose_renderer(scene_available: bool) -> Arc<dyn PoseRenderer> {
    if scene_available {
        Arc::new(SceneRenderer)
    } else {
        Arc::new(CssRenderer)
    }
}
