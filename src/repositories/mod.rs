//! Repositorios
//!
//! Contratos de persistencia por entidad y sus dos implementaciones:
//! PostgreSQL (`sqlx`) y memoria (`MemoryStore`).

pub mod memory_store;
pub mod performance_repository;
pub mod route_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    NewPerformance, NewRoute, NewVehicle, Performance, PerformanceFilters, Route, RouteFilters,
    Vehicle, VehicleChanges, VehicleFilters,
};
use crate::utils::errors::AppResult;

pub use memory_store::MemoryStore;
pub use performance_repository::PerformanceRepository;
pub use route_repository::RouteRepository;
pub use vehicle_repository::VehicleRepository;

#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    /// Búsqueda exacta por placa (sensible a mayúsculas)
    async fn find_by_plate_number(&self, plate_number: &str) -> AppResult<Option<Vehicle>>;

    async fn exists_by_plate_number(&self, plate_number: &str) -> AppResult<bool> {
        Ok(self.find_by_plate_number(plate_number).await?.is_some())
    }

    /// Listado en orden de creación
    async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>>;

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;

    async fn update(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Option<Vehicle>>;

    /// Marcar como inactivo sin borrar el registro
    async fn soft_delete(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    /// Borrado físico; falla si alguna ruta referencia el vehículo
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait RouteStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>>;

    /// Listado filtrado y paginado en orden de creación
    async fn list(&self, filters: &RouteFilters) -> AppResult<Vec<Route>>;

    /// Insertar en estado ASSIGNED; falla si el vehículo no existe
    async fn create(&self, route: NewRoute) -> AppResult<Route>;

    /// Persistir estado y timestamps de una ruta ya modificada
    async fn save(&self, route: &Route) -> AppResult<Route>;

    /// Borrar la ruta y su performance, si lo tiene, en una sola operación
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Cerrar la ruta e insertar su performance en una sola unidad atómica.
    ///
    /// Si cualquiera de las dos escrituras falla no queda ningún cambio
    /// visible. Un performance ya existente para la ruta se reporta como
    /// `InvalidState`.
    async fn complete_with_performance(
        &self,
        performance: NewPerformance,
        completed_at: DateTime<Utc>,
    ) -> AppResult<(Route, Performance)>;
}

#[async_trait]
pub trait PerformanceStore: Send + Sync {
    async fn find_by_route_id(&self, route_id: Uuid) -> AppResult<Option<Performance>>;

    /// Listado del más reciente al más antiguo
    async fn list(&self, filters: &PerformanceFilters) -> AppResult<Vec<Performance>>;

    async fn create(&self, performance: NewPerformance) -> AppResult<Performance>;

    async fn delete_by_route_id(&self, route_id: Uuid) -> AppResult<bool>;
}
