//! `PostgreSQL` implementation of the `ProgressRepository` trait.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;

use hustle_core::error::DomainError;
use hustle_core::repository::{ProgressRecord, ProgressRepository};

/// PostgreSQL-backed progress repository. One row per player, guarded by a
/// version column for optimistic concurrency.
#[derive(Debug, Clone)]
pub struct PgProgressRepository {
    pool: PgPool,
}

impl PgProgressRepository {
    /// Creates a new `PgProgressRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn infrastructure(err: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("progress store error: {err}"))
}

#[async_trait]
impl ProgressRepository for PgProgressRepository {
    async fn load(&self, phone_number: &str) -> Result<Option<ProgressRecord>, DomainError> {
        let row = sqlx::query(
            "SELECT phone_number, game, status, net_worth, days_survived, current_q, version, updated_at
             FROM player_progress WHERE phone_number = $1",
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| infrastructure(&e))?;

        row.map(|row| -> Result<ProgressRecord, sqlx::Error> {
            Ok(ProgressRecord {
                phone_number: row.try_get("phone_number")?,
                game: row.try_get("game")?,
                status: row.try_get("status")?,
                net_worth: row.try_get("net_worth")?,
                days_survived: row.try_get("days_survived")?,
                current_q: row.try_get("current_q")?,
                version: row.try_get("version")?,
                updated_at: row.try_get("updated_at")?,
            })
        })
        .transpose()
        .map_err(|e| infrastructure(&e))
    }

    async fn save(
        &self,
        record: &ProgressRecord,
        expected_version: i64,
    ) -> Result<(), DomainError> {
        let new_version = expected_version + 1;
        let written = if expected_version == 0 {
            sqlx::query(
                "INSERT INTO player_progress
                    (phone_number, game, status, net_worth, days_survived, current_q, version, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                 ON CONFLICT (phone_number) DO NOTHING",
            )
            .bind(&record.phone_number)
            .bind(&record.game)
            .bind(&record.status)
            .bind(record.net_worth)
            .bind(record.days_survived)
            .bind(&record.current_q)
            .bind(new_version)
            .bind(record.updated_at)
            .execute(&self.pool)
            .await
        } else {
            sqlx::query(
                "UPDATE player_progress
                 SET game = $2, status = $3, net_worth = $4, days_survived = $5,
                     current_q = $6, version = $7, updated_at = $8
                 WHERE phone_number = $1 AND version = $9",
            )
            .bind(&record.phone_number)
            .bind(&record.game)
            .bind(&record.status)
            .bind(record.net_worth)
            .bind(record.days_survived)
            .bind(&record.current_q)
            .bind(new_version)
            .bind(record.updated_at)
            .bind(expected_version)
            .execute(&self.pool)
            .await
        };
        let result = written.map_err(|e| infrastructure(&e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ConcurrencyConflict {
                phone_number: record.phone_number.clone(),
                expected: expected_version,
            });
        }

        debug!(phone_number = %record.phone_number, version = new_version, "progress row written");
        Ok(())
    }
}
