// Presentation layer - console HTTP surface for the display front end
pub mod app_state;
pub mod handlers;
pub mod hud_stream;
