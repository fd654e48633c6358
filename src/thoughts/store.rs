use sqlx::SqlitePool;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use super::model::{now_millis, LikeSummary, Thought};

type ThoughtRow = (String, String, i64, i64);

/// Handle over the `thoughts` table. Cheap to clone, shares the pool.
#[derive(Debug, Clone)]
pub struct Thoughts {
    db_pool: SqlitePool,
}

impl Thoughts {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub fn is_ready(&self) -> bool {
        !self.db_pool.is_closed()
    }

    pub async fn close(&self) {
        self.db_pool.close().await;
    }

    /// Newest first; ties keep insertion order reversed.
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<Thought>, sqlx::Error> {
        let rows: Vec<ThoughtRow> =
            sqlx::query_as("SELECT id,message,hearts,created_at FROM thoughts ORDER BY created_at DESC, rowid DESC LIMIT ?")
            .bind(limit)
            .fetch_all(&self.db_pool)
            .await?;

        rows.into_iter().map(from_row).collect()
    }

    pub async fn insert(&self, message: String) -> Result<Thought, sqlx::Error> {
        let thought = Thought {
            id: Uuid::now_v7(),
            message,
            hearts: 0,
            created_at: now_millis(),
        };

        sqlx::query("INSERT INTO thoughts (id,message,hearts,created_at) VALUES (?,?,?,?)")
            .bind(thought.id.to_string())
            .bind(&thought.message)
            .bind(thought.hearts)
            .bind(to_nanos(thought.created_at)?)
            .execute(&self.db_pool)
            .await?;

        debug!("inserted thought {}", thought.id);
        Ok(thought)
    }

    pub async fn like(&self, id: Uuid) -> Result<LikeSummary, sqlx::Error> {
        let result = sqlx::query("UPDATE thoughts SET hearts = hearts + 1 WHERE id=?")
            .bind(id.to_string())
            .execute(&self.db_pool)
            .await?;

        Ok(LikeSummary::matched(result.rows_affected()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Thought>, sqlx::Error> {
        let row: Option<ThoughtRow> =
            sqlx::query_as("DELETE FROM thoughts WHERE id=? RETURNING id,message,hearts,created_at")
            .bind(id.to_string())
            .fetch_optional(&self.db_pool)
            .await?;

        row.map(from_row).transpose()
    }

    #[cfg(test)]
    pub async fn find(&self, id: Uuid) -> Result<Option<Thought>, sqlx::Error> {
        let row: Option<ThoughtRow> = sqlx::query_as("SELECT id,message,hearts,created_at FROM thoughts WHERE id=?")
            .bind(id.to_string())
            .fetch_optional(&self.db_pool)
            .await?;

        row.map(from_row).transpose()
    }
}

fn from_row((id, message, hearts, created_at): ThoughtRow) -> Result<Thought, sqlx::Error> {
    Ok(Thought {
        id: Uuid::parse_str(&id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        message,
        hearts,
        created_at: OffsetDateTime::from_unix_timestamp_nanos(created_at.into())
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
    })
}

fn to_nanos(at: OffsetDateTime) -> Result<i64, sqlx::Error> {
    i64::try_from(at.unix_timestamp_nanos()).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
