//! Extractores de Axum con validación
//!
//! Convierten los rechazos de Axum (422, etc.) en `AppError` para que toda
//! entrada inválida responda 400 con el sobre de error común. La validación
//! de campos la hacen los controladores.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::models::DocumentId;
use crate::utils::errors::AppError;

/// Cuerpo JSON; JSON mal formado o con valores de enum desconocidos responde 400
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
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

/// Query string; parámetros con tipo inválido responden 400
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Identificador de documento tomado del path y validado antes de tocar la base
#[derive(Debug)]
pub struct ValidId(pub DocumentId);

#[async_trait]
impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state).await?;
        Ok(Self(DocumentId::parse(&id)?))
    }
}
