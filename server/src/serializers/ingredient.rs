use super::fields::{read_text, FieldErrors, TextRules};
use crate::db::ingredients;
use crate::error::{ApiError, ApiResult};
use crate::models::Ingredient;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::PgConnection;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

pub(crate) const NAME_TAKEN: &str = "ingredient with this name already exists.";

/// Public representation of an ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct IngredientResponse {
    pub id: i64,
    pub name: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        IngredientResponse {
            id: ingredient.id,
            name: ingredient.name,
        }
    }
}

/// Writable ingredient fields. `id` is never accepted.
#[derive(Debug, Default, Clone, PartialEq, Eq, ToSchema)]
pub struct IngredientInput {
    /// Required on full update
    pub name: Option<String>,
}

impl IngredientInput {
    pub fn parse(body: &Map<String, Value>, partial: bool) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = read_text(body.get("name"), "name", TextRules::name(!partial), &mut errors);
        errors.finish(IngredientInput { name })
    }
}

/// Applies `input` to `current`.
///
/// Renaming onto a name another ingredient already has is a validation error
/// on `name`, since names are unique.
pub fn update(
    conn: &mut PgConnection,
    current: Ingredient,
    input: IngredientInput,
) -> ApiResult<IngredientResponse> {
    let Some(name) = input.name else {
        return Ok(current.into());
    };

    match ingredients::rename_ingredient(conn, current.id, &name) {
        Ok(renamed) => Ok(renamed.into()),
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(ApiError::Validation(FieldErrors::single("name", NAME_TAKEN)))
        }
        Err(e) => Err(e.into()),
    }
}
