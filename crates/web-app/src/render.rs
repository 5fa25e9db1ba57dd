use mapty_domain::{Activity, Workout, WorkoutID, WorkoutKind};

#[must_use]
pub fn icon(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "🏃‍♂️",
        WorkoutKind::Cycling => "🚴‍♀️",
    }
}

#[must_use]
pub fn popup_class(kind: WorkoutKind) -> String {
    format!("{kind}-popup")
}

#[must_use]
pub fn popup_content(workout: &Workout) -> String {
    format!("{} {}", icon(workout.kind()), workout.message())
}

/// Content of a workout in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: WorkoutID,
    pub class: String,
    pub title: String,
    pub details: [Detail; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl Detail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

impl From<&Workout> for ListEntry {
    fn from(workout: &Workout) -> Self {
        let kind = workout.kind();
        let [metric, specific] = match workout.activity() {
            Activity::Running { cadence, pace } => [
                Detail::new("⚡️", one_decimal(pace), "min/km"),
                Detail::new("🦶🏼", cadence.to_string(), "spm"),
            ],
            Activity::Cycling { elevation, speed } => [
                Detail::new("⚡️", one_decimal(speed), "km/h"),
                Detail::new("⛰", elevation.to_string(), "m"),
            ],
        };
        Self {
            id: workout.id(),
            class: format!("workout workout--{kind}"),
            title: workout.message().to_string(),
            details: [
                Detail::new(icon(kind), workout.distance().to_string(), "km"),
                Detail::new("⏱", workout.duration().to_string(), "min"),
                metric,
                specific,
            ],
        }
    }
}

/// Ties are rounded away from zero.
fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// List entries with the most recent workout first.
#[must_use]
pub fn list_entries(workouts: &[Workout]) -> Vec<ListEntry> {
    workouts.iter().rev().map(ListEntry::from).collect()
}
