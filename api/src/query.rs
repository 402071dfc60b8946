use axum::{
    extract::{FromRequestParts, rejection::QueryRejection},
    http::request::Parts,
};

use crate::error::AppError;

// Same as `axum::extract::Query`, but a malformed query string is answered
// with the usual `{status, message}` body.
pub struct Query<T>(pub T);

impl<S, T> FromRequestParts<S> for Query<T>
where
    axum::extract::Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) =
            axum::extract::Query::<T>::from_request_parts(parts, state).await?;

        Ok(Self(value))
    }
}
