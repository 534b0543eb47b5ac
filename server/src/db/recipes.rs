//! Recipe rows and the recipe <-> ingredient association table.

use crate::models::{Ingredient, NewRecipe, Recipe, RecipeChanges, RecipeIngredient};
use crate::schema::{ingredients, recipe_ingredients, recipes};
use diesel::prelude::*;
use std::collections::HashMap;

/// All recipes, newest first.
pub fn list_recipes(conn: &mut PgConnection) -> QueryResult<Vec<Recipe>> {
    recipes::table
        .select(Recipe::as_select())
        .order(recipes::id.desc())
        .load(conn)
}

/// Fails with `diesel::NotFound` when no recipe has this id.
pub fn find_recipe(conn: &mut PgConnection, id: i64) -> QueryResult<Recipe> {
    recipes::table
        .find(id)
        .select(Recipe::as_select())
        .first(conn)
}

pub fn insert_recipe(conn: &mut PgConnection, new_recipe: &NewRecipe) -> QueryResult<Recipe> {
    diesel::insert_into(recipes::table)
        .values(new_recipe)
        .returning(Recipe::as_returning())
        .get_result(conn)
}

/// `changes` must set at least one column.
pub fn update_recipe(
    conn: &mut PgConnection,
    id: i64,
    changes: &RecipeChanges,
) -> QueryResult<Recipe> {
    diesel::update(recipes::table.find(id))
        .set(changes)
        .returning(Recipe::as_returning())
        .get_result(conn)
}

/// Returns the number of deleted rows. Association rows go with the recipe
/// (ON DELETE CASCADE); ingredients stay.
pub fn delete_recipe(conn: &mut PgConnection, id: i64) -> QueryResult<usize> {
    diesel::delete(recipes::table.find(id)).execute(conn)
}

/// Linking an ingredient that is already linked is a no-op.
pub fn add_association(
    conn: &mut PgConnection,
    recipe_id: i64,
    ingredient_id: i64,
) -> QueryResult<()> {
    diesel::insert_into(recipe_ingredients::table)
        .values(RecipeIngredient {
            recipe_id,
            ingredient_id,
        })
        .on_conflict_do_nothing()
        .execute(conn)?;

    Ok(())
}

pub fn clear_associations(conn: &mut PgConnection, recipe_id: i64) -> QueryResult<usize> {
    diesel::delete(recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)))
        .execute(conn)
}

pub fn list_ingredients_for(conn: &mut PgConnection, recipe_id: i64) -> QueryResult<Vec<Ingredient>> {
    recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq(recipe_id))
        .select(Ingredient::as_select())
        .order(ingredients::id.asc())
        .load(conn)
}

/// Ingredients of many recipes in one query, keyed by recipe id. Recipes
/// without ingredients have no entry.
pub fn ingredients_by_recipe(
    conn: &mut PgConnection,
    recipe_ids: &[i64],
) -> QueryResult<HashMap<i64, Vec<Ingredient>>> {
    if recipe_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(i64, Ingredient)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(recipe_ids))
        .select((recipe_ingredients::recipe_id, Ingredient::as_select()))
        .order(ingredients::id.asc())
        .load(conn)?;

    let mut grouped: HashMap<i64, Vec<Ingredient>> = HashMap::new();
    for (recipe_id, ingredient) in rows {
        grouped.entry(recipe_id).or_default().push(ingredient);
    }

    Ok(grouped)
}
