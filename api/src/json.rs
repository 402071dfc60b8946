use axum::extract::{FromRequest, Request, rejection::JsonRejection};

use crate::error::AppError;

/// Request payloads that normalise and check themselves before reaching a
/// handler.
pub trait Validate {
    fn validate(&mut self) -> Result<(), &'static str>;
}

// We define our own `Json` extractor that customizes the error from `axum::Json`
// and runs the payload's validation, so handlers only ever see checked input.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(mut value) = axum::Json::<T>::from_request(req, state).await?;

        value.validate()?;

        Ok(Self(value))
    }
}
