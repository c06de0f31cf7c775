//! Insert-only room-counter snapshots. A new capture never merges with or
//! overwrites an older one; `latest` is simply the highest-id row.

use chrono::Utc;
use tracing::info;

use crate::models::SnapshotRecord;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SnapshotRepository {
    pool_manager: SqlitePoolManager,
}

impl SnapshotRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, sqlx::Error> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS room_snapshots (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                list TEXT NOT NULL,
                day TEXT NOT NULL,
                hour INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    /// Appends a snapshot of the live room list.
    pub async fn insert(&self, list_json: &str, day: &str, hour: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO room_snapshots (list, day, hour, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(list_json)
        .bind(day)
        .bind(hour)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        info!(day, hour, "room snapshot stored");
        Ok(())
    }

    /// Returns the most recently inserted snapshot, if any.
    pub async fn latest(&self) -> Result<Option<SnapshotRecord>, sqlx::Error> {
        sqlx::query_as::<_, SnapshotRecord>(
            "SELECT id, list, day, hour, created_at FROM room_snapshots ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(self.pool_manager.pool())
        .await
    }
}
