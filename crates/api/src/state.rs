//! Application state

use processor::{PgCommentSource, WellnessQuery};
use sqlx::PgPool;

/// Shared application state
pub struct AppState {
    pub wellness: WellnessQuery<PgCommentSource>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            wellness: WellnessQuery::new(PgCommentSource::new(pool)),
        }
    }
}
