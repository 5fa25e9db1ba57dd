use log::warn;

pub trait SettingsService {
    fn get_settings(&self) -> Settings;
}

#[allow(clippy::missing_errors_doc)]
pub trait SettingsRepository {
    fn read_settings(&self) -> Result<Settings, String>;
}

/// Configuration of the map.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub map_zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            map_zoom: 13,
            tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".to_string(),
        }
    }
}

pub(crate) fn or_default(result: Result<Settings, String>) -> Settings {
    result.unwrap_or_else(|err| {
        warn!("failed to read settings: {err}");
        Settings::default()
    })
}
