//! Comment queries

use chrono::{DateTime, Utc};
use common::models::Comment;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::reactions::FLAG_CATEGORIES;

/// Insert a new comment with an explicit creation time
pub async fn insert(
    pool: &PgPool,
    user_id: i64,
    commentable_type: &str,
    commentable_id: i64,
    body: &str,
    created_at: DateTime<Utc>,
) -> Result<Comment, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO comments (user_id, commentable_type, commentable_id, body, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, commentable_type, commentable_id, created_at,
                  FALSE AS flagged
        "#,
    )
    .bind(user_id)
    .bind(commentable_type)
    .bind(commentable_id)
    .bind(body)
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    Ok(row_to_comment(row))
}

/// Fetch unflagged comments created within `[since, until]`
///
/// A comment is flagged when a trusted user left one of the
/// [`FLAG_CATEGORIES`] reactions on it.
pub async fn list_unflagged_between(
    pool: &PgPool,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
) -> Result<Vec<Comment>, sqlx::Error> {
    let categories: Vec<String> = FLAG_CATEGORIES.iter().map(|c| c.to_string()).collect();

    let rows = sqlx::query(
        r#"
        SELECT c.id, c.user_id, c.commentable_type, c.commentable_id, c.created_at,
               FALSE AS flagged
        FROM comments c
        WHERE c.created_at >= $1
          AND c.created_at <= $2
          AND NOT EXISTS (
              SELECT 1
              FROM reactions r
              JOIN users u ON u.id = r.user_id
              WHERE r.reactable_type = 'Comment'
                AND r.reactable_id = c.id
                AND u.trusted
                AND r.category = ANY($3)
          )
        ORDER BY c.created_at DESC
        "#,
    )
    .bind(since)
    .bind(until)
    .bind(categories)
    .fetch_all(pool)
    .await?;

    debug!(
        "Fetched {} unflagged comments between {} and {}",
        rows.len(),
        since,
        until
    );

    Ok(rows.into_iter().map(row_to_comment).collect())
}

fn row_to_comment(row: sqlx::postgres::PgRow) -> Comment {
    Comment {
        id: row.get("id"),
        author_id: row.get("user_id"),
        created_at: row.get("created_at"),
        flagged: row.get("flagged"),
        commentable_type: row.get("commentable_type"),
        commentable_id: row.get("commentable_id"),
    }
}
