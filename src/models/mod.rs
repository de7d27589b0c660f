//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL, junto con los filtros de listado.

pub mod performance;
pub mod route;
pub mod vehicle;

pub use performance::{NewPerformance, Performance, PerformanceFilters};
pub use route::{NewRoute, Route, RouteChanges, RouteFilters, RouteStatus};
pub use vehicle::{NewVehicle, Vehicle, VehicleChanges, VehicleFilters};

/// Límite por defecto de los listados paginados
pub fn default_limit() -> i64 {
    100
}
