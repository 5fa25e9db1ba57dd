#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod controller;
mod error;
mod validation;
mod workout;

pub use controller::{Controller, Map, State, SubmitError};
pub use error::{DeleteError, ReadError, StorageError, UpdateError};
pub use validation::{Field, Metric, ValidationError, WorkoutForm, WorkoutInput};
pub use workout::{
    Activity, Coordinates, Workout, WorkoutID, WorkoutKind, WorkoutRepository, pace, speed,
};
