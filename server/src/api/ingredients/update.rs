use crate::api::extract::{JsonObject, ResourceId};
use crate::db::{self, DbPool};
use crate::error::{ApiResult, ErrorResponse};
use crate::serializers::{self, IngredientInput, IngredientResponse};
use axum::{extract::State, Json};
use diesel::prelude::*;
use serde_json::{Map, Value};
use std::sync::Arc;

#[utoipa::path(
    put,
    path = "/ingredients/{id}/",
    tag = "ingredients",
    params(
        ("id" = i64, Path, description = "Ingredient ID")
    ),
    request_body = IngredientInput,
    responses(
        (status = 200, description = "Ingredient replaced", body = IngredientResponse),
        (status = 400, description = "Invalid request (name missing, blank or taken)", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
pub async fn update_ingredient(
    State(pool): State<Arc<DbPool>>,
    ResourceId(id): ResourceId,
    JsonObject(body): JsonObject,
) -> ApiResult<Json<IngredientResponse>> {
    apply_update(&pool, id, &body, false)
}

#[utoipa::path(
    patch,
    path = "/ingredients/{id}/",
    tag = "ingredients",
    params(
        ("id" = i64, Path, description = "Ingredient ID")
    ),
    request_body = IngredientInput,
    responses(
        (status = 200, description = "Ingredient updated", body = IngredientResponse),
        (status = 400, description = "Invalid request (name blank or taken)", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
pub async fn partial_update_ingredient(
    State(pool): State<Arc<DbPool>>,
    ResourceId(id): ResourceId,
    JsonObject(body): JsonObject,
) -> ApiResult<Json<IngredientResponse>> {
    apply_update(&pool, id, &body, true)
}

fn apply_update(
    pool: &DbPool,
    id: i64,
    body: &Map<String, Value>,
    partial: bool,
) -> ApiResult<Json<IngredientResponse>> {
    let mut conn = pool.get()?;

    let ingredient = conn.transaction(|conn| -> ApiResult<IngredientResponse> {
        let current = db::ingredients::find_ingredient(conn, id)?;
        let input = IngredientInput::parse(body, partial)?;
        serializers::ingredient::update(conn, current, input)
    })?;

    tracing::info!(ingredient_id = id, partial, "updated ingredient");

    Ok(Json(ingredient))
}
