use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::PerformanceStore;
use crate::models::{NewPerformance, Performance, PerformanceFilters};
use crate::utils::errors::{
    constraint_violation, route_already_completed, route_not_found, AppError, AppResult,
    ConstraintKind,
};

pub struct PerformanceRepository {
    pool: PgPool,
}

impl PerformanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar un performance sobre cualquier ejecutor (pool o transacción).
    ///
    /// La PK `route_id` convierte un segundo cierre concurrente en
    /// `InvalidState`.
    pub(crate) async fn insert<'e, E>(
        executor: E,
        performance: NewPerformance,
        created_at: DateTime<Utc>,
    ) -> AppResult<Performance>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        let route_id = performance.route_id;

        sqlx::query_as::<_, Performance>(
            r#"
            INSERT INTO performances (route_id, distance_km, fuel_consumed, duration, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(performance.route_id)
        .bind(performance.distance_km)
        .bind(performance.fuel_consumed)
        .bind(performance.duration)
        .bind(performance.notes)
        .bind(created_at)
        .fetch_one(executor)
        .await
        .map_err(|e| match constraint_violation(&e) {
            Some(ConstraintKind::Unique) => route_already_completed(),
            Some(ConstraintKind::ForeignKey) => route_not_found(route_id),
            None => AppError::Database(e),
        })
    }

    /// Borrar el performance de una ruta sobre cualquier ejecutor
    pub(crate) async fn delete_for_route<'e, E>(executor: E, route_id: Uuid) -> AppResult<bool>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM performances WHERE route_id = $1")
            .bind(route_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PerformanceStore for PerformanceRepository {
    async fn find_by_route_id(&self, route_id: Uuid) -> AppResult<Option<Performance>> {
        let performance =
            sqlx::query_as::<_, Performance>("SELECT * FROM performances WHERE route_id = $1")
                .bind(route_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(performance)
    }

    async fn list(&self, filters: &PerformanceFilters) -> AppResult<Vec<Performance>> {
        let performances = sqlx::query_as::<_, Performance>(
            r#"
            SELECT * FROM performances
            ORDER BY created_at DESC, route_id DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(filters.skip)
        .bind(filters.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(performances)
    }

    async fn create(&self, performance: NewPerformance) -> AppResult<Performance> {
        Self::insert(&self.pool, performance, Utc::now()).await
    }

    async fn delete_by_route_id(&self, route_id: Uuid) -> AppResult<bool> {
        Self::delete_for_route(&self.pool, route_id).await
    }
}
