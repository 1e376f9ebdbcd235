//! Repository for the `blog` table.

use blogpost_core::types::DbId;

use crate::models::blog_post::BlogPost;
use crate::store::Store;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title";

/// Provides CRUD operations for blog posts.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// List every post in storage (id) order. An empty table yields an empty vec.
    pub async fn list(store: &Store) -> Result<Vec<BlogPost>, sqlx::Error> {
        store
            .with_connection("blog_post.list", |conn| {
                Box::pin(async move {
                    let query = format!("SELECT {COLUMNS} FROM blog ORDER BY id");
                    sqlx::query_as::<_, BlogPost>(&query).fetch_all(conn).await
                })
            })
            .await
    }

    /// Find a post by id. Returns `None` if no row matches.
    pub async fn find_by_id(store: &Store, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        store
            .with_connection("blog_post.find_by_id", move |conn| {
                Box::pin(async move {
                    let query = format!("SELECT {COLUMNS} FROM blog WHERE id = $1");
                    sqlx::query_as::<_, BlogPost>(&query)
                        .bind(id)
                        .fetch_optional(conn)
                        .await
                })
            })
            .await
    }

    /// Insert a new post, returning the row with its store-assigned id.
    ///
    /// Insert and id retrieval are a single `INSERT .. RETURNING` statement.
    pub async fn create(store: &Store, title: &str) -> Result<BlogPost, sqlx::Error> {
        let title = title.to_owned();
        store
            .with_connection("blog_post.create", move |conn| {
                Box::pin(async move {
                    let query = format!("INSERT INTO blog (title) VALUES ($1) RETURNING {COLUMNS}");
                    sqlx::query_as::<_, BlogPost>(&query)
                        .bind(title)
                        .fetch_one(conn)
                        .await
                })
            })
            .await
    }

    /// Replace the title of a post.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn update(store: &Store, id: DbId, title: &str) -> Result<bool, sqlx::Error> {
        let title = title.to_owned();
        store
            .with_connection("blog_post.update", move |conn| {
                Box::pin(async move {
                    let result = sqlx::query("UPDATE blog SET title = $2 WHERE id = $1")
                        .bind(id)
                        .bind(title)
                        .execute(conn)
                        .await?;
                    Ok(result.rows_affected() > 0)
                })
            })
            .await
    }

    /// Delete a post.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn delete(store: &Store, id: DbId) -> Result<bool, sqlx::Error> {
        store
            .with_connection("blog_post.delete", move |conn| {
                Box::pin(async move {
                    let result = sqlx::query("DELETE FROM blog WHERE id = $1")
                        .bind(id)
                        .execute(conn)
                        .await?;
                    Ok(result.rows_affected() > 0)
                })
            })
            .await
    }
}
