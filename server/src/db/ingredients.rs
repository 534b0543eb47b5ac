use crate::models::{Ingredient, NewIngredient};
use crate::schema::ingredients;
use diesel::prelude::*;

/// All ingredients in reverse lexicographic order of name.
pub fn list_ingredients(conn: &mut PgConnection) -> QueryResult<Vec<Ingredient>> {
    ingredients::table
        .select(Ingredient::as_select())
        .order(ingredients::name.desc())
        .load(conn)
}

/// Fails with `diesel::NotFound` when no ingredient has this id.
pub fn find_ingredient(conn: &mut PgConnection, id: i64) -> QueryResult<Ingredient> {
    ingredients::table
        .find(id)
        .select(Ingredient::as_select())
        .first(conn)
}

/// Returns the ingredient with exactly this name, creating it first if needed.
///
/// The insert is `ON CONFLICT (name) DO NOTHING` against the unique index on
/// `name`, so two writers racing on the same new name end up sharing one row
/// instead of creating a duplicate.
pub fn get_or_create_ingredient(conn: &mut PgConnection, name: &str) -> QueryResult<Ingredient> {
    let inserted = diesel::insert_into(ingredients::table)
        .values(NewIngredient { name })
        .on_conflict(ingredients::name)
        .do_nothing()
        .execute(conn)?;

    if inserted > 0 {
        tracing::debug!(name, "created ingredient");
    }

    ingredients::table
        .filter(ingredients::name.eq(name))
        .select(Ingredient::as_select())
        .first(conn)
}

pub fn rename_ingredient(conn: &mut PgConnection, id: i64, name: &str) -> QueryResult<Ingredient> {
    diesel::update(ingredients::table.find(id))
        .set(ingredients::name.eq(name))
        .returning(Ingredient::as_returning())
        .get_result(conn)
}

/// Returns the number of deleted rows. Links to recipes are dropped with it.
pub fn delete_ingredient(conn: &mut PgConnection, id: i64) -> QueryResult<usize> {
    diesel::delete(ingredients::table.find(id)).execute(conn)
}
