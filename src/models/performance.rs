//! Modelo de Performance
//!
//! Resultado de una ruta completada. Se crea una sola vez, en el cierre de
//! la ruta, y nunca se actualiza.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::default_limit;

/// Performance - mapea a la tabla performances (PK = route_id)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Performance {
    pub route_id: Uuid,
    pub distance_km: f64,
    pub fuel_consumed: f64,
    /// Duración en minutos
    pub duration: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Datos para insertar un performance
#[derive(Debug, Clone, PartialEq)]
pub struct NewPerformance {
    pub route_id: Uuid,
    pub distance_km: f64,
    pub fuel_consumed: f64,
    pub duration: i32,
    pub notes: Option<String>,
}

impl NewPerformance {
    pub fn recorded_at(self, now: DateTime<Utc>) -> Performance {
        Performance {
            route_id: self.route_id,
            distance_km: self.distance_km,
            fuel_consumed: self.fuel_consumed,
            duration: self.duration,
            notes: self.notes,
            created_at: now,
        }
    }
}

/// Filtros para listado de performances
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PerformanceFilters {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 500))]
    pub limit: i64,
}

impl Default for PerformanceFilters {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}
