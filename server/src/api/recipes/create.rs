use crate::api::extract::JsonObject;
use crate::db::DbPool;
use crate::error::{ApiResult, ErrorResponse};
use crate::serializers::{self, RecipeDetail, RecipeInput};
use axum::{extract::State, http::StatusCode, Json};
use diesel::prelude::*;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/recipes/",
    tag = "recipes",
    request_body = RecipeInput,
    responses(
        (status = 201, description = "Recipe created", body = RecipeDetail),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(pool): State<Arc<DbPool>>,
    JsonObject(body): JsonObject,
) -> ApiResult<(StatusCode, Json<RecipeDetail>)> {
    let input = RecipeInput::parse(&body, false)?;

    let mut conn = pool.get()?;

    // Recipe row and ingredient links commit together
    let recipe = conn.transaction(|conn| serializers::recipe::create(conn, input))?;

    tracing::info!(
        recipe_id = recipe.id,
        ingredients = recipe.ingredients.len(),
        "created recipe"
    );

    Ok((StatusCode::CREATED, Json(recipe)))
}
