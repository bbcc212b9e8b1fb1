//! Community wellness candidate query
//!
//! Finds users who posted at least [`MIN_COMMENTS_PER_WEEK`] qualifying
//! comments in a week, for any week inside the lookback window. Weeks are
//! elapsed 7-day spans counted back from "now", not calendar weeks, so
//! every call re-buckets relative to the injected clock.
//!
//! A comment qualifies when it is unflagged and at least
//! [`MATURITY_DAYS`] old, which leaves moderators time to flag it first.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use common::models::{CandidateResult, Comment, WeeklyCount};
use common::Result;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::source::CommentSource;

/// How far back comments are considered
pub const LOOKBACK_WEEKS: i64 = 32;

/// Minimum comment age before it counts
pub const MATURITY_DAYS: i64 = 3;

/// Qualifying comments needed for a week to be reported
pub const MIN_COMMENTS_PER_WEEK: i64 = 2;

/// Inclusive creation-time range of comments that can count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl Window {
    pub fn ending_at(now: DateTime<Utc>) -> Self {
        Self {
            since: now - Duration::weeks(LOOKBACK_WEEKS),
            until: now - Duration::days(MATURITY_DAYS),
        }
    }

    pub fn contains(&self, created_at: DateTime<Utc>) -> bool {
        created_at >= self.since && created_at <= self.until
    }
}

/// 1-indexed week bucket; bucket 1 is the most recent 7 days
pub fn weeks_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed = (now - created_at).num_seconds();
    elapsed.div_euclid(Duration::weeks(1).num_seconds()) + 1
}

/// Whether a comment counts toward its week
pub fn is_countable(comment: &Comment, window: &Window) -> bool {
    !comment.flagged && window.contains(comment.created_at)
}

/// Count countable comments per (user, week)
pub fn bucket_counts(comments: &[Comment], now: DateTime<Utc>) -> BTreeMap<(i64, i64), i64> {
    let window = Window::ending_at(now);
    let mut buckets = BTreeMap::new();

    for comment in comments.iter().filter(|c| is_countable(c, &window)) {
        let key = (comment.author_id, weeks_ago(comment.created_at, now));
        *buckets.entry(key).or_insert(0) += 1;
    }

    buckets
}

/// Regroup bucket counts per user, weeks ascending
pub fn group_by_user(buckets: BTreeMap<(i64, i64), i64>) -> BTreeMap<i64, Vec<WeeklyCount>> {
    let mut users: BTreeMap<i64, Vec<WeeklyCount>> = BTreeMap::new();

    // BTreeMap iterates (user, week) in order, so each user's weeks arrive sorted
    for ((user_id, weeks_ago), count) in buckets {
        users
            .entry(user_id)
            .or_default()
            .push(WeeklyCount { weeks_ago, count });
    }

    users
}

/// Drop weeks under the threshold, then users left with no weeks
pub fn retain_qualifying(
    mut users: BTreeMap<i64, Vec<WeeklyCount>>,
) -> BTreeMap<i64, Vec<WeeklyCount>> {
    for weeks in users.values_mut() {
        weeks.retain(|w| w.count >= MIN_COMMENTS_PER_WEEK);
    }

    users.retain(|user_id, weeks| {
        if weeks.is_empty() {
            debug!("User {} has no qualifying weeks", user_id);
            false
        } else {
            true
        }
    });

    users
}

/// Full in-memory pipeline over already-fetched comments
///
/// Results are ordered by ascending user id.
pub fn aggregate(comments: &[Comment], now: DateTime<Utc>) -> Vec<CandidateResult> {
    let buckets = bucket_counts(comments, now);
    let users = retain_qualifying(group_by_user(buckets));

    users
        .iter()
        .map(|(user_id, weeks)| CandidateResult::from_weeks(*user_id, weeks))
        .collect()
}

/// Computes wellness candidates from a comment store
pub struct WellnessQuery<S, C = SystemClock> {
    source: S,
    clock: C,
}

impl<S: CommentSource> WellnessQuery<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            clock: SystemClock,
        }
    }
}

impl<S: CommentSource, C: Clock> WellnessQuery<S, C> {
    pub fn with_clock(source: S, clock: C) -> Self {
        Self { source, clock }
    }

    /// Run the query as of the clock's current time
    pub async fn call(&self) -> Result<Vec<CandidateResult>> {
        let now = self.clock.now();
        let window = Window::ending_at(now);

        info!(
            "Computing wellness candidates for comments between {} and {}",
            window.since, window.until
        );

        let comments = self
            .source
            .fetch_unflagged_between(window.since, window.until)
            .await?;
        debug!("Fetched {} comments", comments.len());

        let candidates = aggregate(&comments, now);
        info!("Found {} wellness candidates", candidates.len());

        Ok(candidates)
    }
}
