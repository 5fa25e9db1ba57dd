use std::{rc::Rc, str::FromStr};

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use strum::IntoEnumIterator;

use mapty_domain::{self as domain, WorkoutKind};

use crate::Controller;

/// Form for a new workout at the location selected on the map.
#[component]
pub fn WorkoutForm(controller: Signal<Controller>) -> Element {
    let mut controller = controller;
    let mut form = use_signal(domain::WorkoutForm::default);
    let mut suppress_transition = use_signal(|| false);
    let mut distance_input = use_signal(|| None::<Rc<MountedData>>);

    let focus_distance = move || {
        if let Some(element) = distance_input.read().clone() {
            spawn(async move {
                let _ = element.set_focus(true).await;
            });
        }
    };

    use_effect(move || {
        if controller.read().is_form_visible() {
            focus_distance();
        }
    });

    let submit = move |event: FormEvent| {
        event.prevent_default();
        let result = controller.write().submit(&form.read());
        if result.is_ok() {
            let cleared = form.read().cleared();
            form.set(cleared);
            *suppress_transition.write() = true;
            spawn(async move {
                TimeoutFuture::new(1_000).await;
                *suppress_transition.write() = false;
            });
        }
    };

    let visible = controller.read().is_form_visible();
    let current = form.read().clone();
    let kind_options = WorkoutKind::iter().map(|kind| {
        let value = kind.to_string();
        let selected = kind == current.kind;
        rsx! {
            option { value, selected, {kind.name()} }
        }
    });
    let row_class = |kind: WorkoutKind| {
        if kind == current.kind {
            "form__row"
        } else {
            "form__row form__row--hidden"
        }
    };

    rsx! {
        form {
            class: if visible { "form" } else { "form hidden" },
            style: if suppress_transition() { "display: none" },
            onsubmit: submit,
            div {
                class: "form__row",
                label { class: "form__label", "Type" }
                select {
                    class: "form__input form__input--type",
                    onchange: move |event: FormEvent| {
                        if let Ok(kind) = WorkoutKind::from_str(&event.value()) {
                            form.write().kind = kind;
                            focus_distance();
                        }
                    },
                    {kind_options}
                }
            }
            div {
                class: "form__row",
                label { class: "form__label", "Distance" }
                input {
                    class: "form__input form__input--distance",
                    placeholder: "km",
                    value: "{current.distance}",
                    onmounted: move |event| distance_input.set(Some(event.data())),
                    oninput: move |event| form.write().distance = event.value(),
                }
            }
            div {
                class: "form__row",
                label { class: "form__label", "Duration" }
                input {
                    class: "form__input form__input--duration",
                    placeholder: "min",
                    value: "{current.duration}",
                    oninput: move |event| form.write().duration = event.value(),
                }
            }
            div {
                class: row_class(WorkoutKind::Running),
                label { class: "form__label", "Cadence" }
                input {
                    class: "form__input form__input--cadence",
                    placeholder: "step/min",
                    value: "{current.cadence}",
                    oninput: move |event| form.write().cadence = event.value(),
                }
            }
            div {
                class: row_class(WorkoutKind::Cycling),
                label { class: "form__label", "Elev Gain" }
                input {
                    class: "form__input form__input--elevation",
                    placeholder: "meters",
                    value: "{current.elevation}",
                    oninput: move |event| form.write().elevation = event.value(),
                }
            }
            button { class: "form__btn", "OK" }
        }
    }
}
