use crate::api::extract::{JsonObject, ResourceId};
use crate::db::{self, DbPool};
use crate::error::{ApiResult, ErrorResponse};
use crate::serializers::{self, RecipeDetail, RecipeInput};
use axum::{extract::State, Json};
use diesel::prelude::*;
use serde_json::{Map, Value};
use std::sync::Arc;

#[utoipa::path(
    put,
    path = "/recipes/{id}/",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    request_body = RecipeInput,
    responses(
        (status = 200, description = "Recipe replaced", body = RecipeDetail),
        (status = 400, description = "Invalid request (title is required)", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(pool): State<Arc<DbPool>>,
    ResourceId(id): ResourceId,
    JsonObject(body): JsonObject,
) -> ApiResult<Json<RecipeDetail>> {
    apply_update(&pool, id, &body, false)
}

#[utoipa::path(
    patch,
    path = "/recipes/{id}/",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    request_body = RecipeInput,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeDetail),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn partial_update_recipe(
    State(pool): State<Arc<DbPool>>,
    ResourceId(id): ResourceId,
    JsonObject(body): JsonObject,
) -> ApiResult<Json<RecipeDetail>> {
    apply_update(&pool, id, &body, true)
}

fn apply_update(
    pool: &DbPool,
    id: i64,
    body: &Map<String, Value>,
    partial: bool,
) -> ApiResult<Json<RecipeDetail>> {
    let mut conn = pool.get()?;

    let recipe = conn.transaction(|conn| -> ApiResult<RecipeDetail> {
        let current = db::recipes::find_recipe(conn, id)?;
        let input = RecipeInput::parse(body, partial)?;
        Ok(serializers::recipe::update(conn, current, input)?)
    })?;

    tracing::info!(recipe_id = id, partial, "updated recipe");

    Ok(Json(recipe))
}
