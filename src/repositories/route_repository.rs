use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, error};
use uuid::Uuid;

use super::{PerformanceRepository, RouteStore};
use crate::models::{NewPerformance, NewRoute, Performance, Route, RouteFilters};
use crate::utils::errors::{
    constraint_violation, route_already_completed, route_not_found, AppError,
    AppResult, ConstraintKind,
};

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn complete_in_transaction(
        tx: &mut Transaction<'_, Postgres>,
        performance: NewPerformance,
        completed_at: DateTime<Utc>,
    ) -> AppResult<(Route, Performance)> {
        let route_id = performance.route_id;

        // Bloquear la fila para serializar cierres concurrentes
        let mut route =
            sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1 FOR UPDATE")
                .bind(route_id)
                .fetch_optional(&mut **tx)
                .await?
                .ok_or_else(|| route_not_found(route_id))?;

        if route.is_completed() {
            return Err(route_already_completed());
        }

        route.mark_completed(completed_at);

        let route = sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET status = $2, completed_at = $3, updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(route.id)
        .bind(route.status)
        .bind(route.completed_at)
        .bind(route.updated_at)
        .fetch_one(&mut **tx)
        .await?;

        let performance = PerformanceRepository::insert(&mut **tx, performance, completed_at).await?;

        Ok((route, performance))
    }
}

#[async_trait]
impl RouteStore for RouteRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    async fn list(&self, filters: &RouteFilters) -> AppResult<Vec<Route>> {
        let routes = sqlx::query_as::<_, Route>(
            r#"
            SELECT * FROM routes
            WHERE ($1::route_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR vehicle_id = $2)
            ORDER BY created_at ASC, id ASC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(filters.status)
        .bind(filters.vehicle_id)
        .bind(filters.skip)
        .bind(filters.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    async fn create(&self, route: NewRoute) -> AppResult<Route> {
        let vehicle_id = route.vehicle_id;
        let route = Route::assigned(Uuid::new_v4(), route, Utc::now());

        sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (id, vehicle_id, origin, destination, status, assigned_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(route.id)
        .bind(route.vehicle_id)
        .bind(&route.origin)
        .bind(&route.destination)
        .bind(route.status)
        .bind(route.assigned_at)
        .bind(route.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match constraint_violation(&e) {
            Some(ConstraintKind::ForeignKey) => {
                AppError::BadRequest(format!("Vehículo con ID {} no existe", vehicle_id))
            }
            _ => AppError::Database(e),
        })
    }

    async fn save(&self, route: &Route) -> AppResult<Route> {
        sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET status = $2, started_at = $3, completed_at = $4, updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(route.id)
        .bind(route.status)
        .bind(route.started_at)
        .bind(route.completed_at)
        .bind(route.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| route_not_found(route.id))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        // Sin commit, el drop de la transacción hace rollback
        let mut tx = self.pool.begin().await?;

        if PerformanceRepository::delete_for_route(&mut *tx, id).await? {
            debug!("Performance de la ruta {} eliminado", id);
        }

        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn complete_with_performance(
        &self,
        performance: NewPerformance,
        completed_at: DateTime<Utc>,
    ) -> AppResult<(Route, Performance)> {
        let route_id = performance.route_id;
        let mut tx = self.pool.begin().await?;

        match Self::complete_in_transaction(&mut tx, performance, completed_at).await {
            Ok(result) => {
                tx.commit().await?;
                debug!("Transacción de cierre confirmada para ruta {}", route_id);
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_error) = tx.rollback().await {
                    error!(
                        "❌ Error en rollback del cierre de ruta {}: {}",
                        route_id, rollback_error
                    );
                }
                Err(e)
            }
        }
    }
}
