//! Per (room, sender, day) message counter behind the same-day member
//! ranking. Day keys partition the data, so counts reset implicitly at
//! midnight without a cleanup job.

use crate::models::MemberCount;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct MessageCountRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageCountRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, sqlx::Error> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS message_counts (
                room_id INTEGER NOT NULL,
                account_id INTEGER NOT NULL,
                day TEXT NOT NULL,
                count INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (room_id, account_id, day)
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    /// Adds one to the sender's counter for the day.
    pub async fn increment(
        &self,
        room_id: i64,
        account_id: i64,
        day: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO message_counts (room_id, account_id, day, count)
            VALUES (?, ?, ?, 1)
            ON CONFLICT (room_id, account_id, day) DO UPDATE SET count = count + 1
            "#,
        )
        .bind(room_id)
        .bind(account_id)
        .bind(day)
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    /// Member counts for (room, day), sorted descending.
    pub async fn top_for_day(&self, room_id: i64, day: &str) -> Result<Vec<MemberCount>, sqlx::Error> {
        sqlx::query_as::<_, MemberCount>(
            r#"
            SELECT account_id, count FROM message_counts
            WHERE room_id = ? AND day = ?
            ORDER BY count DESC
            "#,
        )
        .bind(room_id)
        .bind(day)
        .fetch_all(self.pool_manager.pool())
        .await
    }
}
