use crate::error::ApiError;
use crate::serializers::json_type_name;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde_json::{Map, Value};

/// Numeric id from the `{id}` path segment.
///
/// A segment that is not an integer addresses nothing, so it is rejected as
/// not found rather than as a bad request:
/// ```ignore
/// async fn my_handler(ResourceId(id): ResourceId) -> impl IntoResponse {
///     // id is an i64
/// }
/// ```
pub struct ResourceId(pub i64);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        raw.parse::<i64>()
            .map(ResourceId)
            .map_err(|_| ApiError::NotFound)
    }
}

/// Request body that must be a JSON object. Field validation is left to the
/// serializers; this only rejects bodies that are not JSON objects at all.
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            other => Err(ApiError::BadRequest(format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(&other)
            ))),
        }
    }
}
