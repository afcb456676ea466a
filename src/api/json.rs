use axum::{
    extract::{FromRequest, Request, rejection::JsonRejection},
    response::Json,
};

use crate::Error;

/// JSON request body whose rejections are rendered like every other
/// [`Error`], as a `data_error` with the parser's message.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| Error::data(rejection.body_text()))?;
        Ok(Self(value))
    }
}
