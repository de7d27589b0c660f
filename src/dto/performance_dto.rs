use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Performance;

// Response de performance; la duración se expone en minutos
#[derive(Debug, Serialize, Deserialize)]
pub struct PerformanceResponse {
    pub route_id: Uuid,
    pub distance_km: f64,
    pub fuel_consumed: f64,
    pub duration_minutes: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Performance> for PerformanceResponse {
    fn from(performance: Performance) -> Self {
        Self {
            route_id: performance.route_id,
            distance_km: performance.distance_km,
            fuel_consumed: performance.fuel_consumed,
            duration_minutes: performance.duration,
            notes: performance.notes,
            created_at: performance.created_at,
        }
    }
}
