//! Reset-and-seed routine, run once before the server accepts requests.
//!
//! This is a reset, not a migration: any existing `blog` table and its rows
//! are discarded on every start.

use blogpost_core::blog::{seed_titles, SEED_POST_COUNT, TITLE_MAX_LEN};
use sqlx::Connection;

use crate::store::Store;

/// Drop and recreate the `blog` table, then insert the seed rows.
///
/// All steps run in one transaction. PostgreSQL DDL is transactional, so a
/// failure part-way leaves the previous state untouched.
pub async fn reset_and_seed(store: &Store) -> Result<(), sqlx::Error> {
    store
        .with_connection("blog_post.bootstrap", |conn| {
            Box::pin(async move {
                let mut tx = conn.begin().await?;

                sqlx::query("DROP TABLE IF EXISTS blog")
                    .execute(&mut *tx)
                    .await?;

                let create_table = format!(
                    "CREATE TABLE blog ( \
                        id BIGSERIAL PRIMARY KEY, \
                        title VARCHAR({TITLE_MAX_LEN}) NOT NULL \
                     )"
                );
                sqlx::query(&create_table).execute(&mut *tx).await?;

                for title in seed_titles() {
                    sqlx::query("INSERT INTO blog (title) VALUES ($1)")
                        .bind(title)
                        .execute(&mut *tx)
                        .await?;
                }

                tx.commit().await
            })
        })
        .await?;

    tracing::info!(rows = SEED_POST_COUNT, "Blog table reset and seeded");
    Ok(())
}
