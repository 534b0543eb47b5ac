pub mod extract;
pub mod ingredients;
pub mod recipes;

#[cfg(test)]
pub(crate) mod test_support;

use crate::error::ErrorResponse;
use crate::serializers::FieldErrors;
use crate::AppState;
use axum::Router;
use utoipa::OpenApi;

/// All resource routes, without state
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(recipes::router())
        .merge(ingredients::router())
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Pantry API", description = "Recipes and the ingredients they share"),
        components(schemas(ErrorResponse, FieldErrors))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> =
        vec![recipes::ApiDoc::openapi(), ingredients::ApiDoc::openapi()];

    for module_spec in modules {
        // Merge paths
        spec.paths.paths.extend(module_spec.paths.paths);

        // Merge components (schemas)
        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
