// HTTP request handlers
use crate::application::chart_service::ChartCommand;
use crate::application::dispatcher::CommandDispatcher;
use crate::application::input::{JoystickFrame, PointerKind, Rect};
use crate::domain::charts::{Chart, ChartBoard};
use crate::domain::command::{CommandVector, ModeName, ModeSet, SettingsDelta};
use crate::domain::hud::HudState;
use crate::presentation::app_state::{AppState, lock};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::oneshot;

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PointerEvent {
    Press { pointer: PointerKind, bounds: Rect },
    Move { pointer: PointerKind, x: f64, y: f64 },
    Release { pointer: PointerKind },
}

/// `handled` tells the page to suppress the browser's default action.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct InputResponse {
    pub handled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<CommandVector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<(f64, f64)>,
}

#[derive(Debug, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    pub pressed: bool,
}

#[derive(Debug, Deserialize)]
pub struct ModeToggle {
    pub mode: ModeName,
    pub checked: bool,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub replayed: Option<usize>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Latest HUD state
pub async fn get_hud(State(state): State<Arc<AppState>>) -> Json<HudState> {
    Json(state.hud.borrow().clone())
}

/// Current chart series
pub async fn get_charts(State(state): State<Arc<AppState>>) -> Json<ChartBoard> {
    Json(state.charts.borrow().clone())
}

pub async fn get_chart(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Chart>, StatusCode> {
    state
        .charts
        .borrow()
        .chart(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Reload history into the charts
pub async fn reload_charts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReloadResponse>, StatusCode> {
    let (reply, rx) = oneshot::channel();
    state
        .chart_commands
        .send(ChartCommand::Reload(reply))
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;
    let replayed = rx.await.map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;
    Ok(Json(ReloadResponse { replayed }))
}

/// Pointer or touch event on one of the joysticks
pub async fn joystick_event(
    Path(stick): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(event): Json<PointerEvent>,
) -> Result<Json<InputResponse>, StatusCode> {
    let (joystick, send): (_, fn(&CommandDispatcher, CommandVector)) = match stick.as_str() {
        "drive" => (&state.drive_stick, CommandDispatcher::drive),
        "camera" => (&state.camera_stick, CommandDispatcher::camera),
        _ => return Err(StatusCode::NOT_FOUND),
    };

    let response = {
        let mut joystick = lock(joystick);
        match event {
            PointerEvent::Press { pointer, bounds } => InputResponse {
                handled: joystick.press(pointer, bounds),
                ..InputResponse::default()
            },
            PointerEvent::Move { pointer, x, y } => match joystick.move_to(pointer, x, y) {
                Some(JoystickFrame { command, handle }) => InputResponse {
                    handled: true,
                    command: Some(command),
                    handle: Some(handle),
                },
                None => InputResponse::default(),
            },
            PointerEvent::Release { pointer } => match joystick.release(pointer) {
                Some(command) => InputResponse {
                    handled: true,
                    command: Some(command),
                    handle: Some((0.0, 0.0)),
                },
                None => InputResponse::default(),
            },
        }
    };

    if let Some(command) = response.command {
        send(&state.dispatcher, command);
    }
    Ok(Json(response))
}

/// Key down / key up for keyboard driving
pub async fn keyboard_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<KeyEvent>,
) -> Json<InputResponse> {
    let command = {
        let mut keyboard = lock(&state.keyboard);
        if event.pressed {
            keyboard.key_down(&event.key)
        } else {
            keyboard.key_up(&event.key)
        }
    };

    if let Some(command) = command {
        state.dispatcher.drive(command);
    }
    Json(InputResponse {
        handled: command.is_some(),
        command,
        handle: None,
    })
}

/// Flip one mode toggle; the vehicle always receives all five
pub async fn set_mode(
    State(state): State<Arc<AppState>>,
    Json(toggle): Json<ModeToggle>,
) -> Json<ModeSet> {
    let modes = lock(&state.mode_form).toggle(toggle.mode, toggle.checked);
    state.dispatcher.modes(modes);
    Json(modes)
}

/// Slider commit
pub async fn commit_setting(
    State(state): State<Arc<AppState>>,
    Json(delta): Json<SettingsDelta>,
) -> Json<SettingsDelta> {
    state.dispatcher.settings(delta);
    Json(delta.clamped())
}

pub async fn horn(State(state): State<Arc<AppState>>) -> StatusCode {
    state.dispatcher.horn();
    StatusCode::NO_CONTENT
}

pub async fn stop(State(state): State<Arc<AppState>>) -> StatusCode {
    state.dispatcher.stop();
    StatusCode::NO_CONTENT
}
