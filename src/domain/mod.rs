// Domain layer - console data model and pure display rules
pub mod charts;
pub mod command;
pub mod hud;
pub mod pose;
pub mod series;
pub mod telemetry;
