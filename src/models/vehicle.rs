//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Mapea exactamente a la tabla `vehicles` del schema PostgreSQL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::default_limit;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub plate_number: String,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Datos para insertar un vehículo nuevo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub user_id: Option<Uuid>,
    pub plate_number: String,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
}

/// Cambios parciales sobre un vehículo
#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    pub user_id: Option<Uuid>,
    pub plate_number: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub is_active: Option<bool>,
}

impl VehicleChanges {
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Default::default()
        }
    }
}

impl Vehicle {
    pub fn registered(id: Uuid, new_vehicle: NewVehicle, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new_vehicle.user_id,
            plate_number: new_vehicle.plate_number,
            brand: new_vehicle.brand,
            model: new_vehicle.model,
            year: new_vehicle.year,
            is_active: true,
            created_at: now,
            updated_at: None,
        }
    }

    pub fn apply_changes(&mut self, changes: VehicleChanges, now: DateTime<Utc>) {
        if let Some(user_id) = changes.user_id {
            self.user_id = Some(user_id);
        }
        if let Some(plate_number) = changes.plate_number {
            self.plate_number = plate_number;
        }
        if let Some(brand) = changes.brand {
            self.brand = brand;
        }
        if let Some(model) = changes.model {
            self.model = model;
        }
        if let Some(year) = changes.year {
            self.year = Some(year);
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Some(now);
    }
}

/// Filtros para búsqueda de vehículos
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VehicleFilters {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 500))]
    pub limit: i64,

    #[serde(default)]
    pub active_only: bool,
}

impl Default for VehicleFilters {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
            active_only: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_changes_only_touches_present_fields() {
        let now = Utc::now();
        let mut vehicle = Vehicle::registered(
            Uuid::new_v4(),
            NewVehicle {
                user_id: None,
                plate_number: "ABC-123".to_string(),
                brand: "Toyota".to_string(),
                model: "Corolla".to_string(),
                year: Some(2020),
            },
            now,
        );
        assert!(vehicle.is_active);

        vehicle.apply_changes(
            VehicleChanges {
                brand: Some("Mazda".to_string()),
                is_active: Some(false),
                ..Default::default()
            },
            now,
        );

        assert_eq!(vehicle.brand, "Mazda");
        assert_eq!(vehicle.model, "Corolla");
        assert_eq!(vehicle.plate_number, "ABC-123");
        assert_eq!(vehicle.year, Some(2020));
        assert!(!vehicle.is_active);
        assert_eq!(vehicle.updated_at, Some(now));
    }
}
