//! Recipe representations and the recipe write path.
//!
//! The list view and the detail view have separate contracts
//! (`RecipeSummary`, `RecipeDetail`). They currently carry the same
//! fields; both are filled from `RecipeFields` so they can drift apart
//! without touching each other.

use super::fields::{json_type_name, read_text, FieldErrors, TextRules, NOT_NULL};
use super::ingredient::IngredientResponse;
use crate::db::{ingredients, recipes};
use crate::models::{Ingredient, NewRecipe, Recipe, RecipeChanges};
use diesel::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Recipe as shown in the recipe list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<IngredientResponse>,
}

/// Recipe as returned by retrieve, create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<IngredientResponse>,
}

struct RecipeFields {
    id: i64,
    title: String,
    description: String,
    ingredients: Vec<IngredientResponse>,
}

fn recipe_fields(recipe: Recipe, ingredients: Vec<Ingredient>) -> RecipeFields {
    RecipeFields {
        id: recipe.id,
        title: recipe.title,
        description: recipe.description,
        ingredients: ingredients.into_iter().map(IngredientResponse::from).collect(),
    }
}

impl RecipeSummary {
    pub fn build(recipe: Recipe, ingredients: Vec<Ingredient>) -> Self {
        let fields = recipe_fields(recipe, ingredients);
        RecipeSummary {
            id: fields.id,
            title: fields.title,
            description: fields.description,
            ingredients: fields.ingredients,
        }
    }
}

impl RecipeDetail {
    pub fn build(recipe: Recipe, ingredients: Vec<Ingredient>) -> Self {
        let fields = recipe_fields(recipe, ingredients);
        RecipeDetail {
            id: fields.id,
            title: fields.title,
            description: fields.description,
            ingredients: fields.ingredients,
        }
    }
}

/// Ingredient reference inside a recipe write, resolved by name.
#[derive(Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct IngredientRef {
    pub name: String,
}

/// Writable recipe fields. `id` and anything unknown is ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq, ToSchema)]
pub struct RecipeInput {
    /// Required on create and full update
    pub title: Option<String>,
    pub description: Option<String>,
    /// On update: absent keeps the current ingredients, `[]` removes them all
    pub ingredients: Option<Vec<IngredientRef>>,
}

impl RecipeInput {
    /// `partial` is true for PATCH; create and PUT require `title`.
    pub fn parse(body: &Map<String, Value>, partial: bool) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = read_text(body.get("title"), "title", TextRules::name(!partial), &mut errors);
        let description = read_text(
            body.get("description"),
            "description",
            TextRules::free_text(),
            &mut errors,
        );
        let ingredients = read_ingredient_refs(body.get("ingredients"), &mut errors);

        errors.finish(RecipeInput {
            title,
            description,
            ingredients,
        })
    }
}

fn read_ingredient_refs(value: Option<&Value>, errors: &mut FieldErrors) -> Option<Vec<IngredientRef>> {
    let items = match value? {
        Value::Array(items) => items,
        Value::Null => {
            errors.add("ingredients", NOT_NULL);
            return None;
        }
        other => {
            errors.add(
                "ingredients",
                format!(
                    "Expected a list of items but got type \"{}\".",
                    json_type_name(other)
                ),
            );
            return None;
        }
    };

    let mut refs = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let Value::Object(item) = item else {
            errors.add(
                format!("ingredients[{}]", i),
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type_name(item)
                ),
            );
            continue;
        };

        let path = format!("ingredients[{}].name", i);
        if let Some(name) = read_text(item.get("name"), &path, TextRules::name(true), errors) {
            refs.push(IngredientRef { name });
        }
    }

    Some(refs)
}

/// Looks up or creates each referenced ingredient and links it to the recipe.
fn attach_ingredients(
    conn: &mut PgConnection,
    recipe_id: i64,
    refs: &[IngredientRef],
) -> QueryResult<()> {
    for ingredient_ref in refs {
        let ingredient = ingredients::get_or_create_ingredient(conn, &ingredient_ref.name)?;
        recipes::add_association(conn, recipe_id, ingredient.id)?;
    }
    Ok(())
}

/// Inserts the recipe and its ingredients. Expects a validated, non-partial
/// input; call inside a transaction.
pub fn create(conn: &mut PgConnection, input: RecipeInput) -> QueryResult<RecipeDetail> {
    let recipe = recipes::insert_recipe(
        conn,
        &NewRecipe {
            title: input.title.as_deref().unwrap_or_default(),
            description: input.description.as_deref().unwrap_or_default(),
        },
    )?;

    let refs = input.ingredients.unwrap_or_default();
    attach_ingredients(conn, recipe.id, &refs)?;

    let linked = recipes::list_ingredients_for(conn, recipe.id)?;
    Ok(RecipeDetail::build(recipe, linked))
}

/// Applies `input` to `recipe`. Only the fields present in the input change;
/// call inside a transaction.
pub fn update(conn: &mut PgConnection, recipe: Recipe, input: RecipeInput) -> QueryResult<RecipeDetail> {
    if let Some(refs) = &input.ingredients {
        recipes::clear_associations(conn, recipe.id)?;
        attach_ingredients(conn, recipe.id, refs)?;
    }

    let changes = RecipeChanges {
        title: input.title.as_deref(),
        description: input.description.as_deref(),
    };
    let recipe = if changes.is_empty() {
        recipe
    } else {
        recipes::update_recipe(conn, recipe.id, &changes)?
    };

    let linked = recipes::list_ingredients_for(conn, recipe.id)?;
    Ok(RecipeDetail::build(recipe, linked))
}
