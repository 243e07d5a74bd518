// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::{Arc, Mutex}};
use anyhow::Context;
use axum::{routing::{get, post}, Router};
use tokio::sync::{mpsc, watch};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::chart_service::ChartService;
use crate::application::dispatcher::CommandDispatcher;
use crate::application::hud_service::HudService;
use crate::application::vehicle_api::VehicleApi;
use crate::domain::charts::ChartBoard;
use crate::domain::command::ModeForm;
use crate::domain::hud::HudState;
use crate::domain::pose::select_pose_renderer;
use crate::infrastructure::config::load_console_config;
use crate::infrastructure::http_vehicle_api::HttpVehicleApi;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    commit_setting, get_chart, get_charts, get_hud, health_check, horn, joystick_event, keyboard_event,
    reload_charts, set_mode, stop,
};
use crate::presentation::hud_stream::stream_hud;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_console_config()?;

    // Vehicle client (infrastructure layer)
    let api: Arc<dyn VehicleApi> = Arc::new(HttpVehicleApi::new(
        &config.vehicle.base_url,
        config.vehicle.request_timeout(),
    )?);

    // Pose backend is decided once, never re-checked per frame
    let renderer = select_pose_renderer(config.render.webgl);

    // Pipelines (application layer)
    let mode_form = Arc::new(Mutex::new(ModeForm::default()));
    let (hud_tx, hud_rx) = watch::channel(HudState::default());
    let hud_service = HudService::new(
        api.clone(),
        config.polling.hud_interval(),
        renderer,
        mode_form.clone(),
    );
    tokio::spawn(hud_service.run(hud_tx));

    let board = ChartBoard::new(config.charts.layout(), config.charts.capacity);
    let (charts_tx, charts_rx) = watch::channel(board.clone());
    let (chart_cmd_tx, chart_cmd_rx) = mpsc::channel(4);
    let chart_service = ChartService::new(
        api.clone(),
        config.polling.chart_interval(),
        config.history.seconds,
        board,
    );
    tokio::spawn(chart_service.run(charts_tx, chart_cmd_rx));

    // Create application state
    let state = Arc::new(AppState::new(
        CommandDispatcher::new(api),
        mode_form,
        hud_rx,
        charts_rx,
        chart_cmd_tx,
    ));

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/hud", get(get_hud))
        .route("/hud/stream", get(stream_hud))
        .route("/charts", get(get_charts))
        .route("/charts/reload", post(reload_charts))
        .route("/charts/:id", get(get_chart))
        .route("/input/joystick/:stick", post(joystick_event))
        .route("/input/keyboard", post(keyboard_event))
        .route("/controls/modes", post(set_mode))
        .route("/controls/settings", post(commit_setting))
        .route("/controls/horn", post(horn))
        .route("/controls/stop", post(stop))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.server.listen))?;
    tracing::info!(
        "Starting vehicle console on {} (vehicle at {})",
        addr,
        config.vehicle.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
