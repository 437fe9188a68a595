//! Request body extractors.
//!
//! Thin wrappers over axum's `Json` and `Form` whose rejections are `AppError`s, so a
//! malformed, oversized or mistyped body is answered by the error normalizer like any other
//! handler failure.

use axum::{
    extract::{FromRequest, Request},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::server::error::AppError;

/// Maximum accepted request body size in bytes.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

/// `application/json` request body.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        Ok(Self(value))
    }
}

/// `application/x-www-form-urlencoded` request body.
#[derive(Debug)]
pub struct FormBody<T>(pub T);

impl<S, T> FromRequest<S> for FormBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await?;

        Ok(Self(value))
    }
}
