use log::error;
use mapty_domain::Coordinates;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Position, PositionError, js_sys::Function};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("geolocation not supported")]
    Unavailable,
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timeout")]
    Timeout,
    #[error("{0}")]
    Other(String),
}

impl GeolocationError {
    #[must_use]
    pub fn from_code(code: u16, message: String) -> Self {
        match code {
            PositionError::PERMISSION_DENIED => GeolocationError::PermissionDenied,
            PositionError::POSITION_UNAVAILABLE => {
                GeolocationError::PositionUnavailable
            }
            PositionError::TIMEOUT => GeolocationError::Timeout,
            _ => GeolocationError::Other(message),
        }
    }
}

/// Request the current position once. Exactly one of the callbacks is called.
pub fn request_position(
    on_success: impl FnOnce(Coordinates) + 'static,
    on_error: impl FnOnce(GeolocationError) + 'static,
) {
    let geolocation = match gloo_utils::window().navigator().geolocation() {
        Ok(geolocation) => geolocation,
        Err(err) => {
            error!("failed to access geolocation: {err:?}");
            on_error(GeolocationError::Unavailable);
            return;
        }
    };

    let success = Closure::once_into_js(move |position: Position| {
        let coords = position.coords();
        on_success(Coordinates::new(coords.latitude(), coords.longitude()));
    });
    let failure = Closure::once_into_js(move |err: PositionError| {
        on_error(GeolocationError::from_code(err.code(), err.message()));
    });

    if let Err(err) = geolocation.get_current_position_with_error_callback(
        success.unchecked_ref::<Function>(),
        Some(failure.unchecked_ref::<Function>()),
    ) {
        error!("failed to request current position: {err:?}");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, GeolocationError::PermissionDenied)]
    #[case(2, GeolocationError::PositionUnavailable)]
    #[case(3, GeolocationError::Timeout)]
    #[case(42, GeolocationError::Other("unknown".to_string()))]
    fn test_geolocation_error_from_code(#[case] code: u16, #[case] expected: GeolocationError) {
        assert_eq!(
            GeolocationError::from_code(code, "unknown".to_string()),
            expected
        );
    }
}
