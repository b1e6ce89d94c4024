//! HTTP server exposing the giveaway analysis pipeline.

pub mod app;
pub mod config;
pub mod routes;

pub use app::{build_app, AppState};
pub use config::Config;
