use chrono::{DateTime, Local};
use log::{debug, error, warn};

use crate::{
    Coordinates, DeleteError, Metric, ValidationError, Workout, WorkoutForm, WorkoutID,
    WorkoutRepository,
};

/// Interactive map showing the workouts.
pub trait Map {
    fn set_view(&self, center: Coordinates, zoom: u8, animate: bool);
    fn add_marker(&self, workout: &Workout);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum State {
    AwaitingLocation,
    LocationUnavailable,
    MapReady,
    FormVisible { target: Coordinates },
    FormHidden,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("no location selected on map")]
    NoTarget,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

macro_rules! log_on_error {
    ($result: expr, $action: literal, $entity: literal) => {{
        let result = $result;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
}

/// Owns the state of the application and coordinates map, form and storage.
pub struct Controller<R, M> {
    repository: R,
    map: Option<M>,
    zoom: u8,
    state: State,
    workouts: Vec<Workout>,
}

impl<R: WorkoutRepository, M: Map> Controller<R, M> {
    /// Restore the stored workouts. Unreadable data is treated as an empty list.
    pub fn new(repository: R, zoom: u8) -> Self {
        let workouts = match repository.read_workouts() {
            Ok(workouts) => {
                debug!("restored {} workouts", workouts.len());
                workouts
            }
            Err(err) => {
                warn!("failed to read workouts: {err}");
                vec![]
            }
        };
        Self {
            repository,
            map: None,
            zoom,
            state: State::AwaitingLocation,
            workouts,
        }
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn is_form_visible(&self) -> bool {
        matches!(self.state, State::FormVisible { .. })
    }

    /// Workouts in insertion order.
    #[must_use]
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn map_ready(&mut self, position: Coordinates, map: M) {
        map.set_view(position, self.zoom, false);
        for workout in &self.workouts {
            map.add_marker(workout);
        }
        self.map = Some(map);
        self.state = State::MapReady;
    }

    pub fn location_failed(&mut self, reason: &str) {
        error!("failed to get current position: {reason}");
        self.state = State::LocationUnavailable;
    }

    /// Select the location of a new workout and show the form.
    pub fn map_clicked(&mut self, target: Coordinates) -> bool {
        match self.state {
            State::MapReady | State::FormHidden | State::FormVisible { .. } => {
                self.state = State::FormVisible { target };
                true
            }
            State::AwaitingLocation | State::LocationUnavailable => false,
        }
    }

    /// Create a workout at the selected location.
    ///
    /// Invalid input leaves the form open and changes nothing.
    pub fn submit(&mut self, form: &WorkoutForm) -> Result<WorkoutID, SubmitError> {
        self.submit_at(form, Local::now())
    }

    fn submit_at(
        &mut self,
        form: &WorkoutForm,
        now: DateTime<Local>,
    ) -> Result<WorkoutID, SubmitError> {
        let State::FormVisible { target } = self.state else {
            return Err(SubmitError::NoTarget);
        };
        let input = form.validate().inspect_err(|err| {
            debug!("rejected {} workout: {err}", form.kind);
        })?;

        let id = WorkoutID::next(now.timestamp_millis(), &self.workouts);
        let date = now.date_naive();
        let workout = match input.metric {
            Metric::Cadence(cadence) => Workout::running(
                id,
                date,
                target,
                input.distance,
                input.duration,
                cadence,
            ),
            Metric::Elevation(elevation) => Workout::cycling(
                id,
                date,
                target,
                input.distance,
                input.duration,
                elevation,
            ),
        };

        if let Some(map) = &self.map {
            map.add_marker(&workout);
        }
        self.workouts.push(workout);
        let _ = log_on_error!(
            self.repository.write_workouts(&self.workouts),
            "write",
            "workouts"
        );
        self.state = State::FormHidden;

        Ok(id)
    }

    /// Move the map to the given workout. Does nothing before the map is ready.
    pub fn focus(&self, id: WorkoutID) -> bool {
        let Some(map) = &self.map else {
            return false;
        };
        let Some(workout) = self.workouts.iter().find(|w| w.id() == id) else {
            return false;
        };
        map.set_view(workout.coords(), self.zoom, true);
        true
    }

    /// Remove all workouts from the store.
    pub fn clear(&mut self) -> Result<(), DeleteError> {
        log_on_error!(self.repository.delete_workouts(), "delete", "workouts")?;
        self.workouts.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use assert_approx_eq::assert_approx_eq;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Activity, Field, ReadError, StorageError, UpdateError, WorkoutKind};

    use super::*;

    #[derive(Default)]
    struct FakeRepository {
        stored: RefCell<Option<Vec<Workout>>>,
        writes: Cell<usize>,
        failing: bool,
    }

    impl FakeRepository {
        fn with(workouts: Vec<Workout>) -> Self {
            Self {
                stored: RefCell::new(Some(workouts)),
                ..Self::default()
            }
        }

        fn failing() -> Self {
            Self {
                failing: true,
                ..Self::default()
            }
        }
    }

    impl WorkoutRepository for FakeRepository {
        fn read_workouts(&self) -> Result<Vec<Workout>, ReadError> {
            if self.failing {
                return Err(StorageError::Other("quota exceeded".into()).into());
            }
            Ok(self.stored.borrow().clone().unwrap_or_default())
        }

        fn write_workouts(&self, workouts: &[Workout]) -> Result<(), UpdateError> {
            if self.failing {
                return Err(StorageError::Other("quota exceeded".into()).into());
            }
            self.writes.set(self.writes.get() + 1);
            *self.stored.borrow_mut() = Some(workouts.to_vec());
            Ok(())
        }

        fn delete_workouts(&self) -> Result<(), DeleteError> {
            if self.failing {
                return Err(StorageError::Other("quota exceeded".into()).into());
            }
            *self.stored.borrow_mut() = None;
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        SetView(Coordinates, u8, bool),
        AddMarker(WorkoutID),
    }

    #[derive(Default)]
    struct FakeMap {
        calls: RefCell<Vec<Call>>,
    }

    impl Map for FakeMap {
        fn set_view(&self, center: Coordinates, zoom: u8, animate: bool) {
            self.calls
                .borrow_mut()
                .push(Call::SetView(center, zoom, animate));
        }

        fn add_marker(&self, workout: &Workout) {
            self.calls.borrow_mut().push(Call::AddMarker(workout.id()));
        }
    }

    const POSITION: Coordinates = Coordinates {
        latitude: 52.52,
        longitude: 13.40,
    };
    const TARGET: Coordinates = Coordinates {
        latitude: 52.51,
        longitude: 13.38,
    };

    #[test]
    fn test_new_restores_workouts() {
        let controller = Controller::<_, FakeMap>::new(FakeRepository::with(workouts()), 13);

        assert_eq!(controller.state(), State::AwaitingLocation);
        assert_eq!(controller.workouts(), workouts());
    }

    #[test]
    fn test_new_with_unreadable_store() {
        let controller = Controller::<_, FakeMap>::new(FakeRepository::failing(), 13);

        assert!(controller.workouts().is_empty());
    }

    #[test]
    fn test_map_ready_places_markers() {
        let mut controller = Controller::new(FakeRepository::with(workouts()), 13);

        controller.map_ready(POSITION, FakeMap::default());

        assert_eq!(controller.state(), State::MapReady);
        assert_eq!(
            calls(&controller),
            vec![
                Call::SetView(POSITION, 13, false),
                Call::AddMarker(1.into()),
                Call::AddMarker(2.into()),
            ]
        );
    }

    #[test]
    fn test_location_failed() {
        let mut controller = Controller::<_, FakeMap>::new(FakeRepository::default(), 13);

        controller.location_failed("User denied Geolocation");

        assert_eq!(controller.state(), State::LocationUnavailable);
        assert!(!controller.map_clicked(TARGET));
        assert!(!controller.is_form_visible());
    }

    #[test]
    fn test_map_clicked_before_map_ready() {
        let mut controller = Controller::<_, FakeMap>::new(FakeRepository::default(), 13);

        assert!(!controller.map_clicked(TARGET));
        assert_eq!(controller.state(), State::AwaitingLocation);
    }

    #[test]
    fn test_map_clicked_shows_form() {
        let mut controller = ready_controller(FakeRepository::default());

        assert!(controller.map_clicked(TARGET));
        assert_eq!(controller.state(), State::FormVisible { target: TARGET });
        assert!(controller.is_form_visible());

        assert!(controller.map_clicked(POSITION));
        assert_eq!(controller.state(), State::FormVisible { target: POSITION });
    }

    #[test]
    fn test_submit_running() {
        let mut controller = ready_controller(FakeRepository::default());
        controller.map_clicked(TARGET);

        let id = controller
            .submit_at(&form(WorkoutKind::Running, "5", "30", "150"), now())
            .unwrap();

        assert_eq!(controller.state(), State::FormHidden);
        assert_eq!(controller.workouts().len(), 1);
        let workout = &controller.workouts()[0];
        assert_eq!(workout.id(), id);
        assert_eq!(workout.coords(), TARGET);
        assert_eq!(workout.message(), "Running on April 14");
        assert_approx_eq!(workout.pace().unwrap(), 6.0);
        assert_eq!(
            calls(&controller),
            vec![Call::SetView(POSITION, 13, false), Call::AddMarker(id)]
        );
        assert_eq!(controller.repository.writes.get(), 1);
        assert_eq!(
            controller.repository.stored.borrow().as_deref(),
            Some(controller.workouts())
        );
    }

    #[test]
    fn test_submit_cycling() {
        let mut controller = ready_controller(FakeRepository::default());
        controller.map_clicked(TARGET);

        controller
            .submit_at(&form(WorkoutKind::Cycling, "20", "60", "400"), now())
            .unwrap();

        let workout = &controller.workouts()[0];
        assert_eq!(
            workout.activity(),
            Activity::Cycling {
                elevation: 400.0,
                speed: 20.0
            }
        );
        assert_eq!(workout.message(), "Cycling on April 14");
    }

    #[rstest]
    #[case::zero_distance(
        form(WorkoutKind::Running, "0", "30", "150"),
        SubmitError::Invalid(ValidationError::NotPositive(Field::Distance))
    )]
    #[case::invalid_duration(
        form(WorkoutKind::Cycling, "20", "x", "400"),
        SubmitError::Invalid(ValidationError::NotFinite(Field::Duration))
    )]
    #[case::negative_cadence(
        form(WorkoutKind::Running, "5", "30", "-1"),
        SubmitError::Invalid(ValidationError::NotPositive(Field::Cadence))
    )]
    fn test_submit_rejected(#[case] form: WorkoutForm, #[case] expected: SubmitError) {
        let mut controller = ready_controller(FakeRepository::default());
        controller.map_clicked(TARGET);

        assert_eq!(controller.submit_at(&form, now()), Err(expected));

        assert_eq!(controller.state(), State::FormVisible { target: TARGET });
        assert!(controller.workouts().is_empty());
        assert_eq!(calls(&controller).len(), 1);
        assert_eq!(controller.repository.writes.get(), 0);
    }

    #[test]
    fn test_submit_without_target() {
        let mut controller = ready_controller(FakeRepository::default());

        assert_eq!(
            controller.submit_at(&form(WorkoutKind::Running, "5", "30", "150"), now()),
            Err(SubmitError::NoTarget)
        );
        assert!(controller.workouts().is_empty());
    }

    #[test]
    fn test_submit_appends_with_unique_ids() {
        let mut controller = ready_controller(FakeRepository::with(workouts()));

        for _ in 0..2 {
            controller.map_clicked(TARGET);
            controller
                .submit_at(&form(WorkoutKind::Running, "5", "30", "150"), now())
                .unwrap();
        }

        let ids = controller
            .workouts()
            .iter()
            .map(Workout::id)
            .collect::<Vec<_>>();
        assert_eq!(
            ids,
            vec![
                1.into(),
                2.into(),
                WorkoutID::from(now_millis()),
                WorkoutID::from(now_millis() + 1)
            ]
        );
        assert_eq!(controller.repository.writes.get(), 2);
    }

    #[test]
    fn test_submit_with_failing_store() {
        let mut controller = ready_controller(FakeRepository::failing());
        controller.map_clicked(TARGET);

        assert!(
            controller
                .submit_at(&form(WorkoutKind::Running, "5", "30", "150"), now())
                .is_ok()
        );
        assert_eq!(controller.workouts().len(), 1);
        assert_eq!(controller.state(), State::FormHidden);
    }

    #[test]
    fn test_focus() {
        let controller = ready_controller(FakeRepository::with(workouts()));

        assert!(controller.focus(2.into()));
        assert!(!controller.focus(3.into()));

        assert_eq!(
            calls(&controller).last(),
            Some(&Call::SetView(Coordinates::new(48.0, 11.0), 13, true))
        );
        assert_eq!(controller.state(), State::MapReady);
        assert_eq!(controller.repository.writes.get(), 0);
    }

    #[test]
    fn test_focus_before_map_ready() {
        let controller = Controller::<_, FakeMap>::new(FakeRepository::with(workouts()), 13);

        assert!(!controller.focus(1.into()));
    }

    #[test]
    fn test_clear() {
        let mut controller = ready_controller(FakeRepository::with(workouts()));

        controller.clear().unwrap();

        assert!(controller.workouts().is_empty());
        assert!(controller.repository.read_workouts().unwrap().is_empty());
    }

    #[test]
    fn test_clear_with_failing_store() {
        let mut controller = ready_controller(FakeRepository::failing());

        assert!(matches!(
            controller.clear(),
            Err(DeleteError::Storage(StorageError::Other(_)))
        ));
    }

    fn ready_controller(repository: FakeRepository) -> Controller<FakeRepository, FakeMap> {
        let mut controller = Controller::new(repository, 13);
        controller.map_ready(POSITION, FakeMap::default());
        controller
    }

    fn calls(controller: &Controller<FakeRepository, FakeMap>) -> Vec<Call> {
        controller.map.as_ref().unwrap().calls.borrow().clone()
    }

    fn form(kind: WorkoutKind, distance: &str, duration: &str, metric: &str) -> WorkoutForm {
        WorkoutForm {
            kind,
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: metric.to_string(),
            elevation: metric.to_string(),
        }
    }

    fn workouts() -> Vec<Workout> {
        vec![
            Workout::restore(
                1.into(),
                Coordinates::new(47.0, 10.0),
                5.0,
                25.0,
                Activity::Running {
                    cadence: 160.0,
                    pace: 5.0,
                },
                "Running on March 1".to_string(),
            ),
            Workout::restore(
                2.into(),
                Coordinates::new(48.0, 11.0),
                30.0,
                90.0,
                Activity::Cycling {
                    elevation: 250.0,
                    speed: 20.0,
                },
                "Cycling on March 2".to_string(),
            ),
        ]
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 4, 14, 9, 30, 0).unwrap()
    }

    fn now_millis() -> u64 {
        u64::try_from(now().timestamp_millis()).unwrap()
    }
}
