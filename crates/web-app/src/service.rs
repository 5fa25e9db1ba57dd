use std::collections::VecDeque;

use crate::{Settings, SettingsRepository, SettingsService, log, settings};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: log::Repository> Service<R> {
    #[allow(clippy::missing_errors_doc)]
    pub fn get_log_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.repository.read_entries()
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    fn get_settings(&self) -> Settings {
        settings::or_default(self.repository.read_settings())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct FakeRepository(Result<Settings, String>);

    impl SettingsRepository for FakeRepository {
        fn read_settings(&self) -> Result<Settings, String> {
            self.0.clone()
        }
    }

    #[test]
    fn test_get_settings() {
        let settings = Settings {
            map_zoom: 9,
            ..Settings::default()
        };
        assert_eq!(
            Service::new(FakeRepository(Ok(settings.clone()))).get_settings(),
            settings
        );
        assert_eq!(
            Service::new(FakeRepository(Err("unavailable".to_string()))).get_settings(),
            Settings::default()
        );
    }
}
