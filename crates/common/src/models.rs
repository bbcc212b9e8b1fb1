//! Domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user comment as seen by the wellness report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    /// True once a trusted moderator has reacted negatively
    pub flagged: bool,
    pub commentable_type: String,
    pub commentable_id: i64,
}

/// Qualifying comment count for one user in one week bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyCount {
    pub weeks_ago: i64,
    pub count: i64,
}

/// A user surfaced for recognition, one row per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub user_id: i64,
    /// Comma-joined ascending week buckets, e.g. "1,2,4"
    pub serialized_weeks_ago: String,
    /// Comma-joined counts aligned with `serialized_weeks_ago`
    pub serialized_comment_counts: String,
}

impl CandidateResult {
    /// Build a result from weekly counts already sorted by `weeks_ago`
    pub fn from_weeks(user_id: i64, weeks: &[WeeklyCount]) -> Self {
        Self {
            user_id,
            serialized_weeks_ago: join(weeks.iter().map(|w| w.weeks_ago)),
            serialized_comment_counts: join(weeks.iter().map(|w| w.count)),
        }
    }

    pub fn weeks_ago(&self) -> Vec<i64> {
        split(&self.serialized_weeks_ago)
    }

    pub fn comment_counts(&self) -> Vec<i64> {
        split(&self.serialized_comment_counts)
    }
}

fn join(values: impl Iterator<Item = i64>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(",")
}

fn split(serialized: &str) -> Vec<i64> {
    serialized
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_weeks_joins_in_order() {
        let weeks = [
            WeeklyCount { weeks_ago: 1, count: 2 },
            WeeklyCount { weeks_ago: 3, count: 5 },
        ];
        let result = CandidateResult::from_weeks(42, &weeks);

        assert_eq!(result.serialized_weeks_ago, "1,3");
        assert_eq!(result.serialized_comment_counts, "2,5");
        assert_eq!(result.weeks_ago(), vec![1, 3]);
        assert_eq!(result.comment_counts(), vec![2, 5]);
    }

    #[test]
    fn test_json_uses_report_keys() {
        let result = CandidateResult::from_weeks(7, &[WeeklyCount { weeks_ago: 2, count: 3 }]);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["user_id"], 7);
        assert_eq!(json["serialized_weeks_ago"], "2");
        assert_eq!(json["serialized_comment_counts"], "3");
    }
}
