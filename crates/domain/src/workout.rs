use chrono::NaiveDate;
use derive_more::{Deref, Display, From, Into};
use strum::{AsRefStr, EnumIter, EnumString};

use crate::{DeleteError, ReadError, UpdateError};

/// Persistent store of the complete workout list.
pub trait WorkoutRepository {
    fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    /// Replace all stored workouts by `workouts`.
    fn write_workouts(&self, workouts: &[Workout]) -> Result<(), UpdateError>;
    fn delete_workouts(&self) -> Result<(), DeleteError>;
}

#[derive(Deref, Display, From, Into, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(u64);

impl WorkoutID {
    /// Derive an ID from the creation time which is greater than all IDs in `workouts`.
    #[must_use]
    pub fn next(timestamp_millis: i64, workouts: &[Workout]) -> Self {
        let timestamp = u64::try_from(timestamp_millis).unwrap_or_default();
        let after_last = workouts
            .iter()
            .map(|w| w.id.0.saturating_add(1))
            .max()
            .unwrap_or_default();
        Self(timestamp.max(after_last))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(value: Coordinates) -> Self {
        [value.latitude, value.longitude]
    }
}

#[derive(
    strum::Display, EnumString, AsRefStr, EnumIter, Debug, Default, Clone, Copy, PartialEq, Eq,
)]
#[strum(serialize_all = "lowercase")]
pub enum WorkoutKind {
    #[default]
    Running,
    Cycling,
}

impl WorkoutKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }
}

/// Type-specific data of a workout including the derived metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    /// Cadence in steps/min, pace in min/km.
    Running { cadence: f64, pace: f64 },
    /// Elevation gain in m, speed in km/h.
    Cycling { elevation: f64, speed: f64 },
}

impl Activity {
    #[must_use]
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// A logged workout.
///
/// All values are fixed at construction. The display message is derived from the creation date,
/// which is not retained afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutID,
    coords: Coordinates,
    distance: f64,
    duration: f64,
    activity: Activity,
    message: String,
}

impl Workout {
    /// Distance in km and duration in min must be positive.
    #[must_use]
    pub fn running(
        id: WorkoutID,
        date: NaiveDate,
        coords: Coordinates,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Self {
        Self::new(
            id,
            date,
            coords,
            distance,
            duration,
            Activity::Running {
                cadence,
                pace: pace(distance, duration),
            },
        )
    }

    /// Distance in km and duration in min must be positive.
    #[must_use]
    pub fn cycling(
        id: WorkoutID,
        date: NaiveDate,
        coords: Coordinates,
        distance: f64,
        duration: f64,
        elevation: f64,
    ) -> Self {
        Self::new(
            id,
            date,
            coords,
            distance,
            duration,
            Activity::Cycling {
                elevation,
                speed: speed(distance, duration),
            },
        )
    }

    /// Rebuild a previously stored workout from its plain values.
    ///
    /// The cached derived metric and message are taken as they are.
    #[must_use]
    pub fn restore(
        id: WorkoutID,
        coords: Coordinates,
        distance: f64,
        duration: f64,
        activity: Activity,
        message: String,
    ) -> Self {
        Self {
            id,
            coords,
            distance,
            duration,
            activity,
            message,
        }
    }

    fn new(
        id: WorkoutID,
        date: NaiveDate,
        coords: Coordinates,
        distance: f64,
        duration: f64,
        activity: Activity,
    ) -> Self {
        Self {
            id,
            coords,
            distance,
            duration,
            activity,
            message: display_message(activity.kind(), date),
        }
    }

    #[must_use]
    pub fn id(&self) -> WorkoutID {
        self.id
    }

    #[must_use]
    pub fn coords(&self) -> Coordinates {
        self.coords
    }

    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[must_use]
    pub fn activity(&self) -> Activity {
        self.activity
    }

    #[must_use]
    pub fn kind(&self) -> WorkoutKind {
        self.activity.kind()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn pace(&self) -> Option<f64> {
        match self.activity {
            Activity::Running { pace, .. } => Some(pace),
            Activity::Cycling { .. } => None,
        }
    }

    #[must_use]
    pub fn speed(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { speed, .. } => Some(speed),
            Activity::Running { .. } => None,
        }
    }
}

/// Minutes per kilometer.
#[must_use]
pub fn pace(distance: f64, duration: f64) -> f64 {
    duration / distance
}

/// Kilometers per hour.
#[must_use]
pub fn speed(distance: f64, duration: f64) -> f64 {
    distance / (duration / 60.)
}

fn display_message(kind: WorkoutKind, date: NaiveDate) -> String {
    format!("{} on {}", kind.name(), date.format("%B %-d"))
}
