use crate::db::{self, DbPool};
use crate::error::{ApiResult, ErrorResponse};
use crate::serializers::IngredientResponse;
use axum::{extract::State, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/ingredients/",
    tag = "ingredients",
    responses(
        (status = 200, description = "All ingredients, by name descending", body = [IngredientResponse]),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn list_ingredients(
    State(pool): State<Arc<DbPool>>,
) -> ApiResult<Json<Vec<IngredientResponse>>> {
    let mut conn = pool.get()?;

    let ingredients = db::ingredients::list_ingredients(&mut conn)?
        .into_iter()
        .map(IngredientResponse::from)
        .collect();

    Ok(Json(ingredients))
}
