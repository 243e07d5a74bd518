// Server-sent HUD updates
use crate::domain::hud::HudState;
use crate::presentation::app_state::AppState;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::watch;

/// One event for the current state, then one per change. Ends when the HUD
/// pipeline goes away.
pub fn hud_events(mut rx: watch::Receiver<HudState>) -> impl Stream<Item = Result<Event, Infallible>> {
    async_stream::stream! {
        loop {
            let event = {
                let hud = rx.borrow_and_update();
                Event::default().event("hud").json_data(&*hud)
            };
            match event {
                Ok(event) => yield Ok(event),
                Err(e) => tracing::warn!("Skipping HUD frame that failed to encode: {}", e),
            }

            if rx.changed().await.is_err() {
                break;
            }
        }
    }
}

/// Stream HUD state to the display
pub async fn stream_hud(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    Sse::new(hud_events(state.hud.clone())).keep_alive(KeepAlive::default())
}
