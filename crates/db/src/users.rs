//! User queries

use sqlx::{PgPool, Row};

/// A stored user
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub trusted: bool,
}

/// Insert a user, or refresh its trust flag if the username exists
pub async fn upsert(pool: &PgPool, username: &str, trusted: bool) -> Result<User, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO users (username, trusted, created_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (username) DO UPDATE
        SET trusted = EXCLUDED.trusted
        RETURNING id, username, trusted
        "#,
    )
    .bind(username)
    .bind(trusted)
    .fetch_one(pool)
    .await?;

    Ok(row_to_user(row))
}

/// Get user by ID
pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query("SELECT id, username, trusted FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(row_to_user))
}

fn row_to_user(row: sqlx::postgres::PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        trusted: row.get("trusted"),
    }
}
