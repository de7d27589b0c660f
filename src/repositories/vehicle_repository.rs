use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::VehicleStore;
use crate::models::{NewVehicle, Vehicle, VehicleChanges, VehicleFilters};
use crate::utils::errors::{bad_request_error, constraint_violation, AppError, AppResult, ConstraintKind};

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, plate_number: &str) -> AppError {
    match constraint_violation(&e) {
        Some(ConstraintKind::Unique) => AppError::BadRequest(format!(
            "Ya existe un vehículo con la placa {}",
            plate_number
        )),
        Some(ConstraintKind::ForeignKey) => {
            bad_request_error("El vehículo tiene rutas asociadas y no puede eliminarse")
        }
        None => AppError::Database(e),
    }
}

#[async_trait]
impl VehicleStore for VehicleRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn find_by_plate_number(&self, plate_number: &str) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE plate_number = $1")
            .bind(plate_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn exists_by_plate_number(&self, plate_number: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate_number = $1)")
                .bind(plate_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1 = FALSE OR is_active = TRUE)
            ORDER BY created_at ASC, id ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(filters.active_only)
        .bind(filters.skip)
        .bind(filters.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let vehicle = Vehicle::registered(Uuid::new_v4(), vehicle, Utc::now());

        sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, user_id, plate_number, brand, model, year, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.user_id)
        .bind(&vehicle.plate_number)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.is_active)
        .bind(vehicle.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &vehicle.plate_number))
    }

    async fn update(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Option<Vehicle>> {
        let Some(mut vehicle) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        vehicle.apply_changes(changes, Utc::now());

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET user_id = $2, plate_number = $3, brand = $4, model = $5, year = $6,
                is_active = $7, updated_at = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.user_id)
        .bind(&vehicle.plate_number)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.is_active)
        .bind(vehicle.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &vehicle.plate_number))?;

        Ok(vehicle)
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET is_active = FALSE, updated_at = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, ""))?;

        Ok(result.rows_affected() > 0)
    }
}
