//! Blog post entity model and DTO.

use blogpost_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `blog` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: DbId,
    pub title: String,
}

/// Request body for create and update.
///
/// `id` is accepted so clients may send a full object, but it is never
/// written: the store assigns ids on insert and updates take the id from
/// the path.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogPostInput {
    #[serde(default)]
    pub id: Option<DbId>,
    pub title: String,
}
