//! Recipe suggestions
//!
//! A draw picks up to [`MAX_SUGGESTIONS`] recipes at random. While any
//! suggestion from the current window is still unexpired, those are reported
//! instead and no new draw happens (no top-up).

use crate::db::{self, Recipe};
use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use home_common::time::end_of_week;
use home_common::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::SqlitePool;
use tracing::info;

/// Upper bound on a single draw
pub const MAX_SUGGESTIONS: usize = 10;

/// How long a suggestion blocks new draws, counted back from the end of week
pub const SUGGESTION_WINDOW_WEEKS: i64 = 2;

/// Outcome of `recipes suggest`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// Unexpired suggestions exist; nothing new was drawn
    AlreadySuggested(Vec<Recipe>),
    /// Fresh draw, already stored
    Drawn(Vec<Recipe>),
}

impl Suggestion {
    pub fn recipes(&self) -> &[Recipe] {
        match self {
            Suggestion::AlreadySuggested(recipes) | Suggestion::Drawn(recipes) => recipes,
        }
    }
}

/// First date whose suggestions are still unexpired at `now`
pub fn suggestion_cutoff<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDate {
    (end_of_week(now) - Duration::weeks(SUGGESTION_WINDOW_WEEKS)).date_naive()
}

/// Uniform shuffle truncated to [`MAX_SUGGESTIONS`]
pub fn draw<R: Rng + ?Sized>(mut recipes: Vec<Recipe>, rng: &mut R) -> Vec<Recipe> {
    recipes.shuffle(rng);
    recipes.truncate(MAX_SUGGESTIONS);
    recipes
}

/// Report unexpired suggestions, or draw and store a new set
pub async fn suggest<Tz: TimeZone, R: Rng + ?Sized>(
    pool: &SqlitePool,
    now: &DateTime<Tz>,
    rng: &mut R,
) -> Result<Suggestion> {
    let already_suggested = db::suggested_since(pool, suggestion_cutoff(now)).await?;
    if !already_suggested.is_empty() {
        info!("{} recipes already suggested", already_suggested.len());
        return Ok(Suggestion::AlreadySuggested(already_suggested));
    }

    let drawn = draw(db::all_recipes(pool).await?, rng);
    db::insert_suggestions(pool, &drawn, now.date_naive()).await?;
    info!("Drew {} recipes", drawn.len());

    Ok(Suggestion::Drawn(drawn))
}

/// Register a recipe; surrounding whitespace is dropped, blank titles refused
pub async fn register(pool: &SqlitePool, title: &str) -> Result<Recipe> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::InvalidInput("recipe title is empty".to_string()));
    }

    let id = db::register_recipe(pool, title).await?;
    info!("Recipe registered: {}", title);

    Ok(Recipe {
        id,
        title: title.to_string(),
    })
}
