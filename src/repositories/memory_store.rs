//! Almacén en memoria
//!
//! Implementa los tres contratos de persistencia sobre tablas protegidas por
//! un único `RwLock`, de modo que el cierre de ruta es atómico: todas las
//! comprobaciones se hacen antes de la primera escritura y ambas escrituras
//! ocurren bajo el mismo lock de escritura.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PerformanceStore, RouteStore, VehicleStore};
use crate::models::{
    NewPerformance, NewRoute, NewVehicle, Performance, PerformanceFilters, Route, RouteFilters,
    Vehicle, VehicleChanges, VehicleFilters,
};
use crate::utils::errors::{
    bad_request_error, route_already_completed, route_not_found, AppError, AppResult,
};

#[derive(Debug, Default)]
struct Tables {
    // Orden de inserción = orden de creación
    vehicles: Vec<Vehicle>,
    routes: Vec<Route>,
    performances: Vec<Performance>,
}

impl Tables {
    fn plate_taken(&self, plate_number: &str, except: Option<Uuid>) -> bool {
        self.vehicles
            .iter()
            .any(|v| v.plate_number == plate_number && Some(v.id) != except)
    }

    fn has_performance(&self, route_id: Uuid) -> bool {
        self.performances.iter().any(|p| p.route_id == route_id)
    }
}

fn page<T>(items: impl Iterator<Item = T>, skip: i64, limit: i64) -> Vec<T> {
    items
        .skip(usize::try_from(skip).unwrap_or(0))
        .take(usize::try_from(limit).unwrap_or(0))
        .collect()
}

fn duplicate_plate(plate_number: &str) -> AppError {
    AppError::BadRequest(format!("Ya existe un vehículo con la placa {}", plate_number))
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables.vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn find_by_plate_number(&self, plate_number: &str) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .iter()
            .find(|v| v.plate_number == plate_number)
            .cloned())
    }

    async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.read().await;
        let matching = tables
            .vehicles
            .iter()
            .filter(|v| !filters.active_only || v.is_active)
            .cloned();
        Ok(page(matching, filters.skip, filters.limit))
    }

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        if tables.plate_taken(&vehicle.plate_number, None) {
            return Err(duplicate_plate(&vehicle.plate_number));
        }

        let vehicle = Vehicle::registered(Uuid::new_v4(), vehicle, Utc::now());
        tables.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Option<Vehicle>> {
        let mut tables = self.tables.write().await;
        if let Some(plate_number) = &changes.plate_number {
            if tables.plate_taken(plate_number, Some(id)) {
                return Err(duplicate_plate(plate_number));
            }
        }

        let Some(vehicle) = tables.vehicles.iter_mut().find(|v| v.id == id) else {
            return Ok(None);
        };
        vehicle.apply_changes(changes, Utc::now());
        Ok(Some(vehicle.clone()))
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        self.update(id, VehicleChanges::active(false)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.routes.iter().any(|r| r.vehicle_id == id) {
            return Err(bad_request_error(
                "El vehículo tiene rutas asociadas y no puede eliminarse",
            ));
        }

        let before = tables.vehicles.len();
        tables.vehicles.retain(|v| v.id != id);
        Ok(tables.vehicles.len() < before)
    }
}

#[async_trait]
impl RouteStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        let tables = self.tables.read().await;
        Ok(tables.routes.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, filters: &RouteFilters) -> AppResult<Vec<Route>> {
        let tables = self.tables.read().await;
        let matching = tables.routes.iter().filter(|r| filters.matches(r)).cloned();
        Ok(page(matching, filters.skip, filters.limit))
    }

    async fn create(&self, route: NewRoute) -> AppResult<Route> {
        let mut tables = self.tables.write().await;
        if !tables.vehicles.iter().any(|v| v.id == route.vehicle_id) {
            return Err(AppError::BadRequest(format!(
                "Vehículo con ID {} no existe",
                route.vehicle_id
            )));
        }

        let route = Route::assigned(Uuid::new_v4(), route, Utc::now());
        tables.routes.push(route.clone());
        Ok(route)
    }

    async fn save(&self, route: &Route) -> AppResult<Route> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .routes
            .iter_mut()
            .find(|r| r.id == route.id)
            .ok_or_else(|| route_not_found(route.id))?;

        stored.status = route.status;
        stored.started_at = route.started_at;
        stored.completed_at = route.completed_at;
        stored.updated_at = route.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.routes.len();
        tables.routes.retain(|r| r.id != id);
        let deleted = tables.routes.len() < before;

        // Igual que ON DELETE CASCADE en performances.route_id
        if deleted {
            tables.performances.retain(|p| p.route_id != id);
        }
        Ok(deleted)
    }

    async fn complete_with_performance(
        &self,
        performance: NewPerformance,
        completed_at: DateTime<Utc>,
    ) -> AppResult<(Route, Performance)> {
        let route_id = performance.route_id;
        let mut tables = self.tables.write().await;

        if tables.has_performance(route_id) {
            return Err(route_already_completed());
        }

        let route = tables
            .routes
            .iter_mut()
            .find(|r| r.id == route_id)
            .ok_or_else(|| route_not_found(route_id))?;

        if route.is_completed() {
            return Err(route_already_completed());
        }

        route.mark_completed(completed_at);
        let route = route.clone();

        let performance = performance.recorded_at(completed_at);
        tables.performances.push(performance.clone());

        Ok((route, performance))
    }
}

#[async_trait]
impl PerformanceStore for MemoryStore {
    async fn find_by_route_id(&self, route_id: Uuid) -> AppResult<Option<Performance>> {
        let tables = self.tables.read().await;
        Ok(tables
            .performances
            .iter()
            .find(|p| p.route_id == route_id)
            .cloned())
    }

    async fn list(&self, filters: &PerformanceFilters) -> AppResult<Vec<Performance>> {
        let tables = self.tables.read().await;
        let mut performances = tables.performances.clone();
        // Mismo orden que Postgres: created_at DESC, route_id DESC
        performances.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.route_id.cmp(&a.route_id))
        });
        Ok(page(performances.into_iter(), filters.skip, filters.limit))
    }

    async fn create(&self, performance: NewPerformance) -> AppResult<Performance> {
        let mut tables = self.tables.write().await;
        if tables.has_performance(performance.route_id) {
            return Err(route_already_completed());
        }
        if !tables.routes.iter().any(|r| r.id == performance.route_id) {
            return Err(route_not_found(performance.route_id));
        }

        let performance = performance.recorded_at(Utc::now());
        tables.performances.push(performance.clone());
        Ok(performance)
    }

    async fn delete_by_route_id(&self, route_id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.performances.len();
        tables.performances.retain(|p| p.route_id != route_id);
        Ok(tables.performances.len() < before)
    }
}
