//! Comment storage seam

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::models::Comment;
use common::{Error, Result};
use sqlx::PgPool;

/// Read access to comments for aggregation
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Unflagged comments with `since <= created_at <= until`
    async fn fetch_unflagged_between(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Comment>>;
}

/// Postgres-backed comment source
#[derive(Clone)]
pub struct PgCommentSource {
    pool: PgPool,
}

impl PgCommentSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentSource for PgCommentSource {
    async fn fetch_unflagged_between(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Comment>> {
        db::comments::list_unflagged_between(&self.pool, since, until)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }
}

/// In-memory comments, filtered the same way the database filters them
#[async_trait]
impl CommentSource for Vec<Comment> {
    async fn fetch_unflagged_between(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Comment>> {
        Ok(self
            .iter()
            .filter(|c| !c.flagged && c.created_at >= since && c.created_at <= until)
            .cloned()
            .collect())
    }
}
