//! Comment queries against a live Postgres
//!
//! Skipped unless DATABASE_URL points at a scratch database.

use chrono::{Duration, Utc};
use sqlx::PgPool;

async fn pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = db::create_pool(&url, 2).await.expect("connect");
    db::run_migrations(&pool).await.expect("migrate");
    Some(pool)
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

#[tokio::test]
async fn test_list_unflagged_between_applies_window_and_flags() {
    let Some(pool) = pool().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };

    let now = Utc::now();
    let author = db::users::upsert(&pool, &unique("author"), false).await.unwrap();
    let moderator = db::users::upsert(&pool, &unique("mod"), true).await.unwrap();
    let bystander = db::users::upsert(&pool, &unique("bystander"), false).await.unwrap();

    let kept = db::comments::insert(&pool, author.id, "Article", 1, "hi", now - Duration::days(5))
        .await
        .unwrap();
    let flagged = db::comments::insert(&pool, author.id, "Article", 1, "meh", now - Duration::days(6))
        .await
        .unwrap();
    let disliked = db::comments::insert(&pool, author.id, "Article", 2, "ok", now - Duration::days(8))
        .await
        .unwrap();
    let too_old = db::comments::insert(&pool, author.id, "Article", 2, "old", now - Duration::days(300))
        .await
        .unwrap();

    db::reactions::flag_comment(&pool, moderator.id, flagged.id, "vomit")
        .await
        .unwrap();
    // Untrusted users cannot flag
    db::reactions::flag_comment(&pool, bystander.id, disliked.id, "thumbsdown")
        .await
        .unwrap();
    // Flagging twice is a no-op
    db::reactions::flag_comment(&pool, moderator.id, flagged.id, "vomit")
        .await
        .unwrap();

    let comments =
        db::comments::list_unflagged_between(&pool, now - Duration::weeks(32), now - Duration::days(3))
            .await
            .unwrap();
    let ids: Vec<i64> = comments
        .iter()
        .filter(|c| c.author_id == author.id)
        .map(|c| c.id)
        .collect();

    assert!(ids.contains(&kept.id));
    assert!(ids.contains(&disliked.id));
    assert!(!ids.contains(&flagged.id));
    assert!(!ids.contains(&too_old.id));
    assert!(comments.iter().all(|c| !c.flagged));

    // Promoting the bystander turns their earlier reaction into a flag
    let name = bystander.username.clone();
    let promoted = db::users::upsert(&pool, &name, true).await.unwrap();
    assert_eq!(promoted.id, bystander.id);

    let fetched = db::users::get_by_id(&pool, bystander.id).await.unwrap().unwrap();
    assert!(fetched.trusted);
    assert_eq!(fetched.username, name);

    let comments =
        db::comments::list_unflagged_between(&pool, now - Duration::weeks(32), now - Duration::days(3))
            .await
            .unwrap();
    assert!(!comments.iter().any(|c| c.id == disliked.id));
}
