mod app;
mod config;
mod controller;
mod effects;
pub mod logging;
mod script_host;
mod ui;

pub use app::{run_app, LaunchOptions};
