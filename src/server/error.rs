//! Maps [`crate::domain::error::Error`] onto an HTTP response (grounded on
//! `parallax-labs-context-harness`'s `AppError`/`ErrorBody` pair).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::error::Error;

pub struct AppError(Error);

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            error: ErrorDetail {
                message: self.0.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<Error> for AppError {
    fn from(inner: Error) -> Self {
        Self(inner)
    }
}
