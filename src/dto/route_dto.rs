use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::models::{NewPerformance, NewRoute, Route, RouteChanges, RouteStatus};
use crate::utils::validation::{validate_non_negative, validate_positive};

/// Mensaje fijo devuelto al completar una ruta
pub const ROUTE_COMPLETED_MESSAGE: &str = "Ruta completada y performance creado";

// Request para crear una ruta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteRequest {
    pub vehicle_id: Uuid,
    pub origin: String,
    pub destination: String,
}

impl From<CreateRouteRequest> for NewRoute {
    fn from(request: CreateRouteRequest) -> Self {
        Self {
            vehicle_id: request.vehicle_id,
            origin: request.origin,
            destination: request.destination,
        }
    }
}

// Request para actualizar el estado de una ruta
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRouteRequest {
    pub status: Option<RouteStatus>,
}

impl From<UpdateRouteRequest> for RouteChanges {
    fn from(request: UpdateRouteRequest) -> Self {
        Self {
            status: request.status,
        }
    }
}

// Request para completar una ruta y registrar su performance
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompleteRouteRequest {
    pub distance_km: f64,
    pub fuel_consumed: f64,
    #[validate(range(min = 1))]
    pub duration_minutes: i32,
    pub notes: Option<String>,
}

impl CompleteRouteRequest {
    /// Validar atributos y los rangos de números reales (`distance_km > 0`,
    /// `fuel_consumed >= 0`) que `validator` no cubre.
    pub fn validate_payload(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if let Err(error) = validate_positive(self.distance_km) {
            errors.add("distance_km", error);
        }
        if let Err(error) = validate_non_negative(self.fuel_consumed) {
            errors.add("fuel_consumed", error);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn into_performance(self, route_id: Uuid) -> NewPerformance {
        NewPerformance {
            route_id,
            distance_km: self.distance_km,
            fuel_consumed: self.fuel_consumed,
            duration: self.duration_minutes,
            notes: self.notes,
        }
    }
}

// Response de ruta
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub origin: String,
    pub destination: String,
    pub status: RouteStatus,
    pub assigned_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id,
            vehicle_id: route.vehicle_id,
            origin: route.origin,
            destination: route.destination,
            status: route.status,
            assigned_at: route.assigned_at,
            started_at: route.started_at,
            completed_at: route.completed_at,
            created_at: route.created_at,
            updated_at: route.updated_at,
        }
    }
}

// Confirmación de cierre de ruta
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CompleteRouteResponse {
    pub message: String,
    pub route_id: Uuid,
}

impl CompleteRouteResponse {
    pub fn new(route_id: Uuid) -> Self {
        Self {
            message: ROUTE_COMPLETED_MESSAGE.to_string(),
            route_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(distance_km: f64, fuel_consumed: f64, duration_minutes: i32) -> CompleteRouteRequest {
        CompleteRouteRequest {
            distance_km,
            fuel_consumed,
            duration_minutes,
            notes: None,
        }
    }

    #[test]
    fn test_complete_payload_bounds() {
        assert!(payload(12.5, 1.2, 30).validate_payload().is_ok());
        assert!(payload(12.5, 0.0, 1).validate_payload().is_ok());

        let errors = payload(0.0, -1.0, 0).validate_payload().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("distance_km"));
        assert!(fields.contains_key("fuel_consumed"));
        assert!(fields.contains_key("duration_minutes"));
    }

    #[test]
    fn test_duration_maps_to_performance() {
        let route_id = Uuid::new_v4();
        let performance = CompleteRouteRequest {
            notes: Some("sin incidencias".to_string()),
            ..payload(12.5, 1.2, 30)
        }
        .into_performance(route_id);

        assert_eq!(performance.route_id, route_id);
        assert_eq!(performance.duration, 30);
        assert_eq!(performance.notes.as_deref(), Some("sin incidencias"));
    }
}
