use log::error;
use mapty_domain::{self as domain, Coordinates, Workout, WorkoutKind};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};

use crate::{Settings, render};

mod bindings {
    use wasm_bindgen::prelude::*;
    use web_sys::js_sys::Function;

    #[wasm_bindgen]
    extern "C" {
        pub type Map;

        #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
        pub fn new_map(element_id: &str) -> Result<Map, JsValue>;

        #[wasm_bindgen(method, js_name = setView)]
        pub fn set_view(this: &Map, center: &JsValue, zoom: u8, options: &JsValue) -> Map;

        #[wasm_bindgen(method)]
        pub fn on(this: &Map, event: &str, handler: &Function) -> Map;

        pub type TileLayer;

        #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
        pub fn tile_layer(url: &str, options: &JsValue) -> TileLayer;

        #[wasm_bindgen(method, js_name = addTo)]
        pub fn add_to(this: &TileLayer, map: &Map) -> TileLayer;

        pub type Marker;

        #[wasm_bindgen(js_namespace = L, js_name = marker)]
        pub fn marker(lat_lng: &JsValue) -> Marker;

        #[wasm_bindgen(method, js_name = addTo)]
        pub fn add_to(this: &Marker, map: &Map) -> Marker;

        #[wasm_bindgen(method, js_name = bindPopup)]
        pub fn bind_popup(this: &Marker, popup: &Popup) -> Marker;

        #[wasm_bindgen(method, js_name = setPopupContent)]
        pub fn set_popup_content(this: &Marker, content: &str) -> Marker;

        #[wasm_bindgen(method, js_name = openPopup)]
        pub fn open_popup(this: &Marker) -> Marker;

        pub type Popup;

        #[wasm_bindgen(js_namespace = L, js_name = popup)]
        pub fn popup(options: &JsValue) -> Popup;

        pub type MouseEvent;

        #[wasm_bindgen(method, getter, js_name = latlng)]
        pub fn lat_lng(this: &MouseEvent) -> LatLng;

        pub type LatLng;

        #[wasm_bindgen(method, getter)]
        pub fn lat(this: &LatLng) -> f64;

        #[wasm_bindgen(method, getter)]
        pub fn lng(this: &LatLng) -> f64;
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to create map: {0}")]
    Map(String),
    #[error(transparent)]
    Serialization(#[from] serde_wasm_bindgen::Error),
}

#[derive(Serialize, Debug, PartialEq)]
struct TileLayerOptions<'a> {
    attribution: &'a str,
}

#[derive(Serialize, Debug, PartialEq)]
struct ViewOptions {
    animate: bool,
    pan: PanOptions,
}

#[derive(Serialize, Debug, PartialEq)]
struct PanOptions {
    duration: f64,
}

impl ViewOptions {
    fn new(animate: bool) -> Self {
        Self {
            animate,
            pan: PanOptions { duration: 1.0 },
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct PopupOptions {
    max_width: u32,
    min_width: u32,
    auto_close: bool,
    close_on_click: bool,
    class_name: String,
}

impl PopupOptions {
    fn new(kind: WorkoutKind) -> Self {
        Self {
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
            class_name: render::popup_class(kind),
        }
    }
}

/// Leaflet map rendered into the element with the given ID.
///
/// The Leaflet script must be loaded before the map is created.
pub struct Leaflet {
    map: bindings::Map,
    _on_click: Closure<dyn FnMut(bindings::MouseEvent)>,
}

impl Leaflet {
    pub fn new(
        element_id: &str,
        settings: &Settings,
        mut on_click: impl FnMut(Coordinates) + 'static,
    ) -> Result<Self, Error> {
        let map = bindings::new_map(element_id).map_err(|err| Error::Map(format!("{err:?}")))?;

        bindings::tile_layer(
            &settings.tile_url,
            &serde_wasm_bindgen::to_value(&TileLayerOptions {
                attribution: &settings.tile_attribution,
            })?,
        )
        .add_to(&map);

        let closure = Closure::<dyn FnMut(bindings::MouseEvent)>::new(
            move |event: bindings::MouseEvent| {
                let lat_lng = event.lat_lng();
                on_click(Coordinates::new(lat_lng.lat(), lat_lng.lng()));
            },
        );
        map.on("click", closure.as_ref().unchecked_ref());

        Ok(Self {
            map,
            _on_click: closure,
        })
    }

    fn try_set_view(&self, center: Coordinates, zoom: u8, animate: bool) -> Result<(), Error> {
        self.map.set_view(
            &lat_lng(center)?,
            zoom,
            &serde_wasm_bindgen::to_value(&ViewOptions::new(animate))?,
        );
        Ok(())
    }

    fn try_add_marker(&self, workout: &Workout) -> Result<(), Error> {
        let popup = bindings::popup(&serde_wasm_bindgen::to_value(&PopupOptions::new(
            workout.kind(),
        ))?);
        bindings::marker(&lat_lng(workout.coords())?)
            .add_to(&self.map)
            .bind_popup(&popup)
            .set_popup_content(&render::popup_content(workout))
            .open_popup();
        Ok(())
    }
}

impl domain::Map for Leaflet {
    fn set_view(&self, center: Coordinates, zoom: u8, animate: bool) {
        if let Err(err) = self.try_set_view(center, zoom, animate) {
            error!("failed to set map view: {err}");
        }
    }

    fn add_marker(&self, workout: &Workout) {
        if let Err(err) = self.try_add_marker(workout) {
            error!("failed to add marker for workout {}: {err}", workout.id());
        }
    }
}

fn lat_lng(coords: Coordinates) -> Result<JsValue, Error> {
    Ok(serde_wasm_bindgen::to_value(&<[f64; 2]>::from(coords))?)
}
