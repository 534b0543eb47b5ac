use crate::api::extract::ResourceId;
use crate::db::{self, DbPool};
use crate::error::{ApiError, ApiResult, ErrorResponse};
use axum::{extract::State, http::StatusCode};
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/ingredients/{id}/",
    tag = "ingredients",
    params(
        ("id" = i64, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 204, description = "Ingredient deleted and unlinked from every recipe"),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
pub async fn delete_ingredient(
    State(pool): State<Arc<DbPool>>,
    ResourceId(id): ResourceId,
) -> ApiResult<StatusCode> {
    let mut conn = pool.get()?;

    if db::ingredients::delete_ingredient(&mut conn, id)? == 0 {
        return Err(ApiError::NotFound);
    }

    tracing::info!(ingredient_id = id, "deleted ingredient");

    Ok(StatusCode::NO_CONTENT)
}
