//! Reaction queries

use sqlx::PgPool;
use tracing::{debug, warn};

/// Reaction categories that count as a moderator flag
pub const FLAG_CATEGORIES: [&str; 2] = ["thumbsdown", "vomit"];

/// Record a moderator's negative reaction on a comment
///
/// Only reactions from trusted users flag a comment; the row is stored
/// either way so that the reaction survives a later trust change.
pub async fn flag_comment(
    pool: &PgPool,
    moderator_id: i64,
    comment_id: i64,
    category: &str,
) -> Result<(), sqlx::Error> {
    if !is_flag_category(category) {
        warn!("Reaction {} does not flag comments", category);
    }
    debug!(
        "User {} reacted {} on comment {}",
        moderator_id, category, comment_id
    );

    sqlx::query(
        r#"
        INSERT INTO reactions (user_id, reactable_type, reactable_id, category, created_at)
        VALUES ($1, 'Comment', $2, $3, NOW())
        ON CONFLICT (user_id, reactable_type, reactable_id, category) DO NOTHING
        "#,
    )
    .bind(moderator_id)
    .bind(comment_id)
    .bind(category)
    .execute(pool)
    .await?;

    Ok(())
}

/// Whether a reaction category marks a comment as flagged
pub fn is_flag_category(category: &str) -> bool {
    FLAG_CATEGORIES.contains(&category)
}
