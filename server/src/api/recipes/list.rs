use crate::db::{self, DbPool};
use crate::error::{ApiResult, ErrorResponse};
use crate::serializers::RecipeSummary;
use axum::{extract::State, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/recipes/",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes, newest first", body = [RecipeSummary]),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn list_recipes(State(pool): State<Arc<DbPool>>) -> ApiResult<Json<Vec<RecipeSummary>>> {
    let mut conn = pool.get()?;

    let rows = db::recipes::list_recipes(&mut conn)?;

    // One query for every recipe's ingredients instead of one per recipe
    let ids: Vec<i64> = rows.iter().map(|recipe| recipe.id).collect();
    let mut ingredients = db::recipes::ingredients_by_recipe(&mut conn, &ids)?;

    let recipes = rows
        .into_iter()
        .map(|recipe| {
            let linked = ingredients.remove(&recipe.id).unwrap_or_default();
            RecipeSummary::build(recipe, linked)
        })
        .collect();

    Ok(Json(recipes))
}
