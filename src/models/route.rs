//! Modelo de Route
//!
//! Este módulo contiene el struct Route, su máquina de estados y los filtros
//! de búsqueda. Mapea exactamente a la tabla `routes` del schema PostgreSQL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;
use validator::Validate;

use super::default_limit;

/// Estado de la ruta - mapea al ENUM route_status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "route_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    #[default]
    Assigned,
    InProgress,
    Completed,
}

impl RouteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Assigned => "assigned",
            RouteStatus::InProgress => "in_progress",
            RouteStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route principal - mapea exactamente a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Route {
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

/// Datos para insertar una ruta nueva
#[derive(Debug, Clone)]
pub struct NewRoute {
    pub vehicle_id: Uuid,
    pub origin: String,
    pub destination: String,
}

/// Cambios parciales sobre una ruta existente.
///
/// Solo el estado es editable; un campo `None` no se toca.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteChanges {
    pub status: Option<RouteStatus>,
}

impl RouteChanges {
    pub fn status(status: RouteStatus) -> Self {
        Self { status: Some(status) }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
    }
}

impl Route {
    /// Construir una ruta recién asignada
    pub fn assigned(id: Uuid, new_route: NewRoute, now: DateTime<Utc>) -> Self {
        Self {
            id,
            vehicle_id: new_route.vehicle_id,
            origin: new_route.origin,
            destination: new_route.destination,
            status: RouteStatus::Assigned,
            assigned_at: now,
            started_at: None,
            completed_at: None,
            created_at: now,
            updated_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == RouteStatus::Completed
    }

    /// Asignar el estado sin efectos secundarios
    pub fn set_status(&mut self, status: RouteStatus) {
        self.status = status;
    }

    /// Aplicar un update parcial y luego los efectos ligados al estado destino.
    ///
    /// No se valida la transición contra el estado actual.
    pub fn apply_changes(&mut self, changes: &RouteChanges, now: DateTime<Utc>) {
        if changes.is_empty() {
            return;
        }

        if let Some(status) = changes.status {
            self.set_status(status);
            self.on_status_assigned(status, now);
        }

        self.updated_at = Some(now);
    }

    /// Efectos del estado destino: `started_at` se fija una sola vez,
    /// `completed_at` se reescribe siempre que el destino sea COMPLETED.
    fn on_status_assigned(&mut self, target: RouteStatus, now: DateTime<Utc>) {
        match target {
            RouteStatus::InProgress if self.started_at.is_none() => {
                self.started_at = Some(now);
            }
            RouteStatus::Completed => {
                self.completed_at = Some(now);
            }
            _ => {}
        }
    }

    /// Marcar la ruta como completada dentro de la transacción de cierre
    pub fn mark_completed(&mut self, now: DateTime<Utc>) {
        self.status = RouteStatus::Completed;
        self.completed_at = Some(now);
        self.updated_at = Some(now);
    }
}

/// Filtros para búsqueda de rutas
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RouteFilters {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 500))]
    pub limit: i64,

    pub status: Option<RouteStatus>,
    pub vehicle_id: Option<Uuid>,
}

impl Default for RouteFilters {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
            status: None,
            vehicle_id: None,
        }
    }
}

impl RouteFilters {
    pub fn matches(&self, route: &Route) -> bool {
        self.status.map_or(true, |status| route.status == status)
            && self.vehicle_id.map_or(true, |vehicle_id| route.vehicle_id == vehicle_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_route() -> Route {
        Route::assigned(
            Uuid::new_v4(),
            NewRoute {
                vehicle_id: Uuid::new_v4(),
                origin: "A".to_string(),
                destination: "B".to_string(),
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_new_route_is_assigned() {
        let route = sample_route();
        assert_eq!(route.status, RouteStatus::Assigned);
        assert!(route.started_at.is_none());
        assert!(route.completed_at.is_none());
        assert!(route.updated_at.is_none());
        assert_eq!(route.assigned_at, route.created_at);
    }

    #[test]
    fn test_in_progress_sets_started_at_once() {
        let mut route = sample_route();
        let first = Utc::now();
        route.apply_changes(&RouteChanges::status(RouteStatus::InProgress), first);
        assert_eq!(route.started_at, Some(first));

        let later = first + Duration::minutes(5);
        route.apply_changes(&RouteChanges::status(RouteStatus::Assigned), later);
        route.apply_changes(&RouteChanges::status(RouteStatus::InProgress), later);
        assert_eq!(route.status, RouteStatus::InProgress);
        assert_eq!(route.started_at, Some(first));
        assert_eq!(route.updated_at, Some(later));
    }

    #[test]
    fn test_completed_always_rewrites_completed_at() {
        let mut route = sample_route();
        let first = Utc::now();
        route.apply_changes(&RouteChanges::status(RouteStatus::Completed), first);
        assert_eq!(route.completed_at, Some(first));
        assert!(route.started_at.is_none());

        let later = first + Duration::minutes(1);
        route.apply_changes(&RouteChanges::status(RouteStatus::Completed), later);
        assert_eq!(route.completed_at, Some(later));
    }

    #[test]
    fn test_empty_changes_leave_route_untouched() {
        let mut route = sample_route();
        let before = route.clone();
        route.apply_changes(&RouteChanges::default(), Utc::now());
        assert_eq!(route, before);
    }

    #[test]
    fn test_mark_completed() {
        let mut route = sample_route();
        let now = Utc::now();
        route.mark_completed(now);
        assert!(route.is_completed());
        assert_eq!(route.completed_at, Some(now));
        assert_eq!(route.updated_at, Some(now));
    }

    #[test]
    fn test_filters_match() {
        let route = sample_route();
        let mut filters = RouteFilters::default();
        assert!(filters.matches(&route));

        filters.status = Some(RouteStatus::Completed);
        assert!(!filters.matches(&route));

        filters.status = Some(RouteStatus::Assigned);
        filters.vehicle_id = Some(route.vehicle_id);
        assert!(filters.matches(&route));

        filters.vehicle_id = Some(Uuid::new_v4());
        assert!(!filters.matches(&route));
    }

    #[test]
    fn test_filters_limit_bounds() {
        let mut filters = RouteFilters::default();
        assert!(filters.validate().is_ok());

        filters.limit = 501;
        assert!(filters.validate().is_err());

        filters.limit = 0;
        assert!(filters.validate().is_err());

        filters.limit = 500;
        filters.skip = -1;
        assert!(filters.validate().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&RouteStatus::InProgress).unwrap(), "\"in_progress\"");
        let status: RouteStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, RouteStatus::Completed);
    }
}
