//! Translation between database rows and the JSON the API speaks.
//!
//! Request bodies are read from a `serde_json::Map` field by field rather
//! than through `#[derive(Deserialize)]` structs. A derived deserializer
//! stops at the first bad field and cannot tell `null` from an absent key,
//! while the API reports every invalid field at once under its own path
//! (`ingredients[1].name`) and ignores unknown keys.

mod fields;
pub mod ingredient;
pub mod recipe;

pub use fields::FieldErrors;
pub use ingredient::{IngredientInput, IngredientResponse};
pub use recipe::{IngredientRef, RecipeDetail, RecipeInput, RecipeSummary};
pub(crate) use fields::json_type_name;
