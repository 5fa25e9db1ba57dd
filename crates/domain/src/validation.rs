use strum::Display;

use crate::WorkoutKind;

/// Raw values of the workout form.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkoutForm {
    pub kind: WorkoutKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// Validated form values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutInput {
    pub distance: f64,
    pub duration: f64,
    pub metric: Metric,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Cadence(f64),
    Elevation(f64),
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be a number")]
    NotFinite(Field),
    #[error("{0} must be positive")]
    NotPositive(Field),
}

impl WorkoutForm {
    /// All fields must be finite numbers. Distance, duration and cadence must also be positive,
    /// elevation may be zero or negative.
    pub fn validate(&self) -> Result<WorkoutInput, ValidationError> {
        let distance = parse(Field::Distance, &self.distance)?;
        let duration = parse(Field::Duration, &self.duration)?;
        let metric = match self.kind {
            WorkoutKind::Running => Metric::Cadence(parse(Field::Cadence, &self.cadence)?),
            WorkoutKind::Cycling => Metric::Elevation(parse(Field::Elevation, &self.elevation)?),
        };

        ensure_positive(Field::Distance, distance)?;
        ensure_positive(Field::Duration, duration)?;
        if let Metric::Cadence(cadence) = metric {
            ensure_positive(Field::Cadence, cadence)?;
        }

        Ok(WorkoutInput {
            distance,
            duration,
            metric,
        })
    }

    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            kind: self.kind,
            ..Self::default()
        }
    }
}

fn parse(field: Field, value: &str) -> Result<f64, ValidationError> {
    let value = value.replace(',', ".");
    let value = value.trim();

    if value.is_empty() {
        return Ok(0.);
    }

    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(ValidationError::NotFinite(field)),
    }
}

fn ensure_positive(field: Field, value: f64) -> Result<(), ValidationError> {
    if value > 0. {
        Ok(())
    } else {
        Err(ValidationError::NotPositive(field))
    }
}
