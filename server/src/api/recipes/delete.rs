use crate::api::extract::ResourceId;
use crate::db::{self, DbPool};
use crate::error::{ApiError, ApiResult, ErrorResponse};
use axum::{extract::State, http::StatusCode};
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/recipes/{id}/",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted; its ingredients are kept"),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(pool): State<Arc<DbPool>>,
    ResourceId(id): ResourceId,
) -> ApiResult<StatusCode> {
    let mut conn = pool.get()?;

    if db::recipes::delete_recipe(&mut conn, id)? == 0 {
        return Err(ApiError::NotFound);
    }

    tracing::info!(recipe_id = id, "deleted recipe");

    Ok(StatusCode::NO_CONTENT)
}
