//! Taskflow Frontend Entry Point

mod api;
mod app;
mod board;
mod components;
mod config;
mod context;
mod forms;
mod models;
mod pages;
mod routes;
mod session;
mod timers;
mod validation;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = rolling_logger::init_logger("Taskflow", tracing::Level::INFO) {
        leptos::logging::warn!("logger init failed: {}", err);
    }
    mount_to_body(App);
}
