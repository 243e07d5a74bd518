// Application state for HTTP handlers
use crate::application::chart_service::ChartCommand;
use crate::application::dispatcher::CommandDispatcher;
use crate::application::input::{Joystick, KeyboardComposer};
use crate::domain::charts::ChartBoard;
use crate::domain::command::ModeForm;
use crate::domain::hud::HudState;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, watch};

pub struct AppState {
    pub dispatcher: CommandDispatcher,
    pub drive_stick: Mutex<Joystick>,
    pub camera_stick: Mutex<Joystick>,
    pub keyboard: Mutex<KeyboardComposer>,
    pub mode_form: Arc<Mutex<ModeForm>>,
    pub hud: watch::Receiver<HudState>,
    pub charts: watch::Receiver<ChartBoard>,
    pub chart_commands: mpsc::Sender<ChartCommand>,
}

impl AppState {
    pub fn new(
        dispatcher: CommandDispatcher,
        mode_form: Arc<Mutex<ModeForm>>,
        hud: watch::Receiver<HudState>,
        charts: watch::Receiver<ChartBoard>,
        chart_commands: mpsc::Sender<ChartCommand>,
    ) -> Self {
        Self {
            dispatcher,
            drive_stick: Mutex::new(Joystick::default()),
            camera_stick: Mutex::new(Joystick::default()),
            keyboard: Mutex::new(KeyboardComposer::default()),
            mode_form,
            hud,
            charts,
            chart_commands,
        }
    }
}

/// Lock that shrugs off poisoning; the guarded values are plain flags.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
