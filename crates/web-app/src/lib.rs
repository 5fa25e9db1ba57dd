#![warn(clippy::pedantic)]

pub mod geolocation;
pub mod leaflet;
pub mod log;
pub mod render;
mod service;
mod settings;

pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService};

/// Show a blocking message to the user.
pub fn alert(message: &str) {
    if let Err(err) = gloo_utils::window().alert_with_message(message) {
        ::log::error!("failed to show alert: {err:?}");
    }
}

/// Reload the page, which restarts the application.
pub fn reload() {
    if let Err(err) = gloo_utils::window().location().reload() {
        ::log::error!("failed to reload page: {err:?}");
    }
}
