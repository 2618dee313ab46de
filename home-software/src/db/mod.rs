//! Database access for home-software
//!
//! All operations take the pool explicitly and return `Result`; none retry.

pub mod recipes;
pub mod routines;

pub use recipes::{
    all_recipes, insert_suggestions, register_recipe, suggested_since, Recipe, RecipeId,
};
pub use routines::{
    all_routines, insert_record, insert_records, matching_routine_ids, records_by_routine,
    routine_id_by_title,
};
