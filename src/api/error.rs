use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::{Error, ErrorKind, warning};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::DataError => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::ConfigError => StatusCode::BAD_REQUEST,
        ErrorKind::ExhaustedSeedSearch => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::UpstreamError => StatusCode::BAD_GATEWAY,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = status_for(kind);
        warning!("Request failed ({}): {}", status, self);

        let body = ErrorBody {
            kind,
            message: self.to_string(),
            retryable: self.is_retryable(),
        };
        (status, Json(body)).into_response()
    }
}
