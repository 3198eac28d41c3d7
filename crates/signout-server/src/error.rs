//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use signout_core::SignoutError;

/// Any handler failure. Status is picked by downcasting to [`SignoutError`].
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<SignoutError>() {
            Some(e) if e.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
            Some(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {:#}", self.0);
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for ApiError
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
    use uuid::Uuid;

    #[test]
    fn status_mapping() {
        let e = ApiError::from(SignoutError::UnknownSeverity("x".into()));
        assert_eq!(e.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let e = ApiError::from(SignoutError::RecordNotFound(Uuid::nil()));
        assert_eq!(e.status(), StatusCode::NOT_FOUND);

        let e = ApiError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
