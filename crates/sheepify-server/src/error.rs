use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sheepify_core::SheepifyError;

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<SheepifyError>() {
            match e {
                SheepifyError::NotInitialized => StatusCode::BAD_REQUEST,
                SheepifyError::SessionNotFound(_) | SheepifyError::SheepNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                SheepifyError::SessionActive(_) | SheepifyError::NoActiveSession => {
                    StatusCode::CONFLICT
                }
                SheepifyError::InvalidDuration(_)
                | SheepifyError::WakeBeforeBed { .. }
                | SheepifyError::InvalidName(_) => StatusCode::BAD_REQUEST,
                SheepifyError::InsufficientWool { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                SheepifyError::Io(_) | SheepifyError::Yaml(_) | SheepifyError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn sheep_not_found_maps_to_404() {
        let err = AppError(SheepifyError::SheepNotFound("abc".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn active_session_maps_to_409() {
        let err = AppError(SheepifyError::SessionActive("t".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn no_active_session_maps_to_409() {
        let err = AppError(SheepifyError::NoActiveSession.into());
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn wake_before_bed_maps_to_400() {
        let err = AppError(
            SheepifyError::WakeBeforeBed {
                bed: "b".into(),
                wake: "w".into(),
            }
            .into(),
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn insufficient_wool_maps_to_422() {
        let err = AppError(SheepifyError::InsufficientWool { has: 1, needs: 2 }.into());
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn not_initialized_maps_to_400() {
        let err = AppError(SheepifyError::NotInitialized.into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn io_error_maps_to_500() {
        let io_err = std::io::Error::other("disk full");
        let err = AppError(SheepifyError::Io(io_err).into());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn non_domain_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn response_body_contains_error_field() {
        let err = AppError(SheepifyError::NoActiveSession.into());
        let response = err.into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
