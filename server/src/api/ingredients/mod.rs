pub mod delete;
pub mod list;
pub mod update;


use crate::AppState;
use axum::routing::{get, put};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the ingredient resource.
///
/// Ingredients are created through recipe writes, so there is no create or
/// single-item retrieve here.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ingredients/", get(list::list_ingredients))
        .route(
            "/ingredients/{id}/",
            put(update::update_ingredient)
                .patch(update::partial_update_ingredient)
                .delete(delete::delete_ingredient),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_ingredients,
        update::update_ingredient,
        update::partial_update_ingredient,
        delete::delete_ingredient,
    ),
    components(schemas(
        crate::serializers::IngredientResponse,
        crate::serializers::IngredientInput,
    ))
)]
pub struct ApiDoc;
