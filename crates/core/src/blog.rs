//! Blog post domain constants and helpers.

use crate::types::DbId;

/// Entity name used in `NotFound` errors and log fields.
pub const ENTITY: &str = "BlogPost";

/// Number of rows the bootstrap routine seeds.
pub const SEED_POST_COUNT: usize = 5;

/// Width of the `title` column. Longer titles are rejected by the store.
pub const TITLE_MAX_LEN: usize = 255;

/// Titles of the seed rows, in insertion order: `"Blog post #0"` .. `"Blog post #4"`.
pub fn seed_titles() -> impl Iterator<Item = String> {
    (0..SEED_POST_COUNT).map(|i| format!("Blog post #{i}"))
}

/// Path of a single blog post, as used in the `Location` header.
pub fn resource_path(id: DbId) -> String {
    format!("/blog/{id}")
}
