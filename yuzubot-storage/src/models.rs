//! Row models shared by the repositories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One captured room-counter snapshot. `list` is the opaque JSON blob of
/// the live room list at capture time; `day`/`hour` record when the capture
/// was taken and feed the leaderboard footer.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SnapshotRecord {
    pub id: i64,
    pub list: String,
    pub day: String,
    pub hour: i64,
    pub created_at: DateTime<Utc>,
}

/// One member's message count for a (room, day) ranking query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberCount {
    pub account_id: i64,
    pub count: i64,
}
