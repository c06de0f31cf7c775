//! Fortune-draw history: at most one row per (sender, day).

use crate::sqlite_pool::SqlitePoolManager;
use tracing::info;

#[derive(Clone)]
pub struct FortuneRepository {
    pool_manager: SqlitePoolManager,
}

impl FortuneRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, sqlx::Error> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS fortune_logs (
                account_id INTEGER NOT NULL,
                day TEXT NOT NULL,
                fortune TEXT NOT NULL,
                PRIMARY KEY (account_id, day)
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    /// Records a draw for (sender, day). Returns `false` without touching
    /// the table when the sender already drew that day.
    pub async fn try_draw(
        &self,
        account_id: i64,
        day: &str,
        fortune: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO fortune_logs (account_id, day, fortune)
            VALUES (?, ?, ?)
            ON CONFLICT (account_id, day) DO NOTHING
            "#,
        )
        .bind(account_id)
        .bind(day)
        .bind(fortune)
        .execute(self.pool_manager.pool())
        .await?;

        let inserted = result.rows_affected() == 1;
        info!(account_id, day, fortune, inserted, "fortune draw recorded");
        Ok(inserted)
    }
}
