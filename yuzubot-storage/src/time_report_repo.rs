//! Rooms opted into the hourly time report.

use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct TimeReportRepository {
    pool_manager: SqlitePoolManager,
}

impl TimeReportRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, sqlx::Error> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        sqlx::query("CREATE TABLE IF NOT EXISTS time_report_rooms (room_id INTEGER PRIMARY KEY)")
            .execute(self.pool_manager.pool())
            .await?;
        Ok(())
    }

    /// Opts a room in. Returns `false` when it was already opted in.
    pub async fn enable(&self, room_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO time_report_rooms (room_id) VALUES (?) ON CONFLICT (room_id) DO NOTHING",
        )
        .bind(room_id)
        .execute(self.pool_manager.pool())
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Opts a room out. Returns `false` when it was not opted in.
    pub async fn disable(&self, room_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM time_report_rooms WHERE room_id = ?")
            .bind(room_id)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Every opted-in room id.
    pub async fn all_rooms(&self) -> Result<Vec<i64>, sqlx::Error> {
        let rows: Vec<(i64,)> = sqlx::query_as("SELECT room_id FROM time_report_rooms")
            .fetch_all(self.pool_manager.pool())
            .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
