use std::collections::VecDeque;

use gloo_storage::{Storage as GlooStorage, errors::StorageError as GlooStorageError};
use mapty_domain as domain;
use mapty_web_app::{Settings, SettingsRepository, log};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy)]
pub struct LocalStorage;

const KEY_WORKOUTS: &str = "workouts";
const KEY_SETTINGS: &str = "settings";
const KEY_LOG: &str = "log";

impl domain::WorkoutRepository for LocalStorage {
    fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        let workouts = match gloo_storage::LocalStorage::get::<Vec<Workout>>(KEY_WORKOUTS) {
            Ok(workouts) => workouts,
            Err(GlooStorageError::KeyNotFound(_)) => return Ok(vec![]),
            Err(err) => return Err(storage_error(err).into()),
        };
        let workouts = workouts
            .into_iter()
            .map(domain::Workout::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| domain::StorageError::Malformed(err.to_string()))?;
        ::log::debug!("read {} workouts from local storage", workouts.len());
        Ok(workouts)
    }

    fn write_workouts(&self, workouts: &[domain::Workout]) -> Result<(), domain::UpdateError> {
        gloo_storage::LocalStorage::set(
            KEY_WORKOUTS,
            workouts.iter().map(Workout::from).collect::<Vec<_>>(),
        )
        .map_err(|err| storage_error(err).into())
    }

    fn delete_workouts(&self) -> Result<(), domain::DeleteError> {
        gloo_storage::LocalStorage::delete(KEY_WORKOUTS);
        Ok(())
    }
}

impl SettingsRepository for LocalStorage {
    fn read_settings(&self) -> Result<Settings, String> {
        match gloo_storage::LocalStorage::get(KEY_SETTINGS) {
            Ok(settings) => Ok(settings),
            Err(err) => match err {
                GlooStorageError::KeyNotFound(_) => Ok(Settings::default()),
                err => Err(err),
            },
        }
        .map_err(|err| err.to_string())
    }
}

impl log::Repository for LocalStorage {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match gloo_storage::LocalStorage::get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(err) => match err {
                GlooStorageError::KeyNotFound(_) => Ok(VecDeque::new()),
                err => Err(err),
            },
        }
        .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        log::prepend(&mut entries, entry);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

fn storage_error(err: GlooStorageError) -> domain::StorageError {
    match err {
        GlooStorageError::SerdeError(err) => domain::StorageError::Malformed(err.to_string()),
        err => domain::StorageError::Other(Box::new(err)),
    }
}

/// Persisted form of a workout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Workout {
    id: u64,
    coords: [f64; 2],
    distance: f64,
    duration: f64,
    message: String,
    #[serde(flatten)]
    activity: Activity,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Activity {
    Running { cadence: f64, pace: f64 },
    Cycling { elevation: f64, speed: f64 },
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id(),
            coords: value.coords().into(),
            distance: value.distance(),
            duration: value.duration(),
            message: value.message().to_string(),
            activity: match value.activity() {
                domain::Activity::Running { cadence, pace } => Activity::Running { cadence, pace },
                domain::Activity::Cycling { elevation, speed } => {
                    Activity::Cycling { elevation, speed }
                }
            },
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = WorkoutError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        if !(value.distance.is_finite() && value.distance > 0.) {
            return Err(WorkoutError::Distance(value.id, value.distance));
        }
        if !(value.duration.is_finite() && value.duration > 0.) {
            return Err(WorkoutError::Duration(value.id, value.duration));
        }
        Ok(domain::Workout::restore(
            value.id.into(),
            value.coords.into(),
            value.distance,
            value.duration,
            match value.activity {
                Activity::Running { cadence, pace } => domain::Activity::Running { cadence, pace },
                Activity::Cycling { elevation, speed } => {
                    domain::Activity::Cycling { elevation, speed }
                }
            },
            value.message,
        ))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
enum WorkoutError {
    #[error("workout {0} has invalid distance {1}")]
    Distance(u64, f64),
    #[error("workout {0} has invalid duration {1}")]
    Duration(u64, f64),
}
