//! Recipe and suggestion persistence

use chrono::NaiveDate;
use home_common::time::format_date;
use home_common::Result;
use sqlx::{FromRow, SqlitePool};

/// Storage-assigned recipe identifier
pub type RecipeId = i64;

/// Recipe as listed in draws and suggestion reports
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
}

/// Insert a recipe with empty notes
pub async fn register_recipe(pool: &SqlitePool, title: &str) -> Result<RecipeId> {
    let result = sqlx::query("INSERT INTO recipes (title, notes) VALUES (?, '')")
        .bind(title)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Every registered recipe
pub async fn all_recipes(pool: &SqlitePool) -> Result<Vec<Recipe>> {
    let recipes = sqlx::query_as::<_, Recipe>("SELECT id, title FROM recipes ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(recipes)
}

/// Recipes suggested on or after `since`
pub async fn suggested_since(pool: &SqlitePool, since: NaiveDate) -> Result<Vec<Recipe>> {
    let recipes = sqlx::query_as::<_, Recipe>(
        r#"
        SELECT recipes.id, recipes.title
        FROM recipe_suggestions
        JOIN recipes ON recipe_suggestions.recipe_id = recipes.id
        WHERE recipe_suggestions.suggested_at >= ?
        ORDER BY recipe_suggestions.rowid
        "#,
    )
    .bind(format_date(since))
    .fetch_all(pool)
    .await?;

    Ok(recipes)
}

/// Store a draw, all or nothing
pub async fn insert_suggestions(
    pool: &SqlitePool,
    recipes: &[Recipe],
    suggested_at: NaiveDate,
) -> Result<()> {
    let suggested_at = format_date(suggested_at);
    let mut tx = pool.begin().await?;

    for recipe in recipes {
        sqlx::query("INSERT INTO recipe_suggestions (recipe_id, suggested_at) VALUES (?, ?)")
            .bind(recipe.id)
            .bind(&suggested_at)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}
