//! Servicios de negocio
//!
//! Reglas de dominio sobre los repositorios: ciclo de vida de rutas,
//! validación de vehículos y consulta de performances.

pub mod performance_service;
pub mod route_service;
pub mod vehicle_service;

pub use performance_service::PerformanceService;
pub use route_service::RouteService;
pub use vehicle_service::VehicleService;
