use crate::api::extract::ResourceId;
use crate::db::{self, DbPool};
use crate::error::{ApiResult, ErrorResponse};
use crate::serializers::RecipeDetail;
use axum::{extract::State, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/recipes/{id}/",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeDetail),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(pool): State<Arc<DbPool>>,
    ResourceId(id): ResourceId,
) -> ApiResult<Json<RecipeDetail>> {
    let mut conn = pool.get()?;

    let recipe = db::recipes::find_recipe(&mut conn, id)?;
    let ingredients = db::recipes::list_ingredients_for(&mut conn, id)?;

    Ok(Json(RecipeDetail::build(recipe, ingredients)))
}
