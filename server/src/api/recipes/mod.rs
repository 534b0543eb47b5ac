pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

#[cfg(test)]
mod tests;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the recipe resource
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes/",
            get(list::list_recipes).post(create::create_recipe),
        )
        .route(
            "/recipes/{id}/",
            get(get::get_recipe)
                .put(update::update_recipe)
                .patch(update::partial_update_recipe)
                .delete(delete::delete_recipe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        update::partial_update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        crate::serializers::RecipeSummary,
        crate::serializers::RecipeDetail,
        crate::serializers::RecipeInput,
        crate::serializers::IngredientRef,
    ))
)]
pub struct ApiDoc;
