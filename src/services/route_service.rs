//! Servicio de rutas
//!
//! Ciclo de vida de una ruta (ASSIGNED → IN_PROGRESS → COMPLETED) y
//! consultas con verificación de existencia del vehículo.
//!
//! Hay dos caminos para llegar a COMPLETED:
//! - `update_route`: parche de campos; los efectos dependen solo del estado
//!   destino y no crea performance.
//! - `complete_route`: operación de negocio; rechaza rutas ya completadas y
//!   registra el performance en la misma transacción.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::dto::route_dto::{CompleteRouteRequest, CompleteRouteResponse};
use crate::dto::MessageResponse;
use crate::models::{NewRoute, Route, RouteChanges, RouteFilters};
use crate::repositories::{RouteStore, VehicleStore};
use crate::state::AppState;
use crate::utils::errors::{route_already_completed, route_not_found, AppError, AppResult};

pub struct RouteService {
    routes: Arc<dyn RouteStore>,
    vehicles: Arc<dyn VehicleStore>,
}

impl RouteService {
    pub fn new(state: &AppState) -> Self {
        Self {
            routes: state.routes.clone(),
            vehicles: state.vehicles.clone(),
        }
    }

    pub async fn get_route(&self, id: Uuid) -> AppResult<Route> {
        debug!("🔍 Buscando ruta {}", id);
        self.routes
            .find_by_id(id)
            .await?
            .ok_or_else(|| route_not_found(id))
    }

    pub async fn list_routes(&self, filters: &RouteFilters) -> AppResult<Vec<Route>> {
        debug!("🔍 Listando rutas con filtros {:?}", filters);
        self.routes.list(filters).await
    }

    pub async fn create_route(&self, new_route: NewRoute) -> AppResult<Route> {
        if self.vehicles.find_by_id(new_route.vehicle_id).await?.is_none() {
            warn!("Ruta rechazada: vehículo {} inexistente", new_route.vehicle_id);
            return Err(AppError::BadRequest(format!(
                "Vehículo con ID {} no existe",
                new_route.vehicle_id
            )));
        }

        let route = self.routes.create(new_route).await?;
        info!("🚚 Ruta {} asignada al vehículo {}", route.id, route.vehicle_id);
        Ok(route)
    }

    /// Aplicar un cambio de estado sin validar la transición
    pub async fn update_route(&self, id: Uuid, changes: RouteChanges) -> AppResult<Route> {
        let mut route = self.get_route(id).await?;

        if changes.is_empty() {
            return Ok(route);
        }

        route.apply_changes(&changes, Utc::now());
        let route = self.routes.save(&route).await?;
        info!("📝 Ruta {} actualizada a estado {}", route.id, route.status);
        Ok(route)
    }

    /// Completar la ruta y registrar su performance de forma atómica
    pub async fn complete_route(
        &self,
        id: Uuid,
        payload: CompleteRouteRequest,
    ) -> AppResult<CompleteRouteResponse> {
        let route = self
            .routes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))?;

        if route.is_completed() {
            warn!("Ruta {} ya estaba completada", id);
            return Err(route_already_completed());
        }

        let (route, performance) = self
            .routes
            .complete_with_performance(payload.into_performance(route.id), Utc::now())
            .await?;

        info!(
            "✅ Ruta {} completada: {} km, {} min",
            route.id, performance.distance_km, performance.duration
        );
        Ok(CompleteRouteResponse::new(route.id))
    }

    /// Borrar la ruta junto con su performance, si lo tiene
    pub async fn delete_route(&self, id: Uuid) -> AppResult<MessageResponse> {
        self.get_route(id).await?;

        if !self.routes.delete(id).await? {
            return Err(route_not_found(id));
        }

        info!("🗑️ Ruta {} eliminada", id);
        Ok(MessageResponse::new(format!("Ruta {} eliminada correctamente", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvironmentConfig;
    use crate::dto::route_dto::ROUTE_COMPLETED_MESSAGE;
    use crate::models::{NewVehicle, RouteStatus};
    use crate::repositories::PerformanceStore;

    struct Fixture {
        state: AppState,
        service: RouteService,
        vehicle_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let state = AppState::in_memory(EnvironmentConfig::default());
        let vehicle = state
            .vehicles
            .create(NewVehicle {
                user_id: None,
                plate_number: "ABC-123".to_string(),
                brand: "Toyota".to_string(),
                model: "Corolla".to_string(),
                year: None,
            })
            .await
            .unwrap();
        let service = RouteService::new(&state);
        Fixture {
            state,
            service,
            vehicle_id: vehicle.id,
        }
    }

    fn new_route(vehicle_id: Uuid) -> NewRoute {
        NewRoute {
            vehicle_id,
            origin: "A".to_string(),
            destination: "B".to_string(),
        }
    }

    fn payload() -> CompleteRouteRequest {
        CompleteRouteRequest {
            distance_km: 12.5,
            fuel_consumed: 1.2,
            duration_minutes: 30,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_route_with_unknown_vehicle_fails() {
        let f = fixture().await;
        let result = f.service.create_route(new_route(Uuid::new_v4())).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_route_starts_assigned() {
        let f = fixture().await;
        let route = f.service.create_route(new_route(f.vehicle_id)).await.unwrap();
        assert_eq!(route.status, RouteStatus::Assigned);
        assert!(route.started_at.is_none());
        assert!(route.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_get_missing_route_is_not_found() {
        let f = fixture().await;
        let result = f.service.get_route(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_missing_route_is_not_found() {
        let f = fixture().await;
        let result = f
            .service
            .update_route(Uuid::new_v4(), RouteChanges::status(RouteStatus::InProgress))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_started_at_is_never_reset() {
        let f = fixture().await;
        let route = f.service.create_route(new_route(f.vehicle_id)).await.unwrap();

        let started = f
            .service
            .update_route(route.id, RouteChanges::status(RouteStatus::InProgress))
            .await
            .unwrap();
        let started_at = started.started_at.expect("started_at set");

        f.service
            .update_route(route.id, RouteChanges::status(RouteStatus::Assigned))
            .await
            .unwrap();
        let again = f
            .service
            .update_route(route.id, RouteChanges::status(RouteStatus::InProgress))
            .await
            .unwrap();
        assert_eq!(again.started_at, Some(started_at));
    }

    #[tokio::test]
    async fn test_generic_update_to_completed_creates_no_performance() {
        let f = fixture().await;
        let route = f.service.create_route(new_route(f.vehicle_id)).await.unwrap();

        let updated = f
            .service
            .update_route(route.id, RouteChanges::status(RouteStatus::Completed))
            .await
            .unwrap();
        assert_eq!(updated.status, RouteStatus::Completed);
        assert!(updated.completed_at.is_some());
        assert!(f
            .state
            .performances
            .find_by_route_id(route.id)
            .await
            .unwrap()
            .is_none());

        // El update genérico no rechaza re-completar
        let again = f
            .service
            .update_route(route.id, RouteChanges::status(RouteStatus::Completed))
            .await
            .unwrap();
        assert!(again.completed_at >= updated.completed_at);
    }

    #[tokio::test]
    async fn test_complete_route_records_performance() {
        let f = fixture().await;
        let route = f.service.create_route(new_route(f.vehicle_id)).await.unwrap();

        let response = f.service.complete_route(route.id, payload()).await.unwrap();
        assert_eq!(response.route_id, route.id);
        assert_eq!(response.message, ROUTE_COMPLETED_MESSAGE);

        let completed = f.service.get_route(route.id).await.unwrap();
        assert_eq!(completed.status, RouteStatus::Completed);
        assert!(completed.completed_at.is_some());

        let performance = f
            .state
            .performances
            .find_by_route_id(route.id)
            .await
            .unwrap()
            .expect("performance recorded");
        assert_eq!(performance.distance_km, 12.5);
        assert_eq!(performance.fuel_consumed, 1.2);
        assert_eq!(performance.duration, 30);
        assert!(performance.notes.is_none());
    }

    #[tokio::test]
    async fn test_complete_twice_is_invalid_state() {
        let f = fixture().await;
        let route = f.service.create_route(new_route(f.vehicle_id)).await.unwrap();
        f.service.complete_route(route.id, payload()).await.unwrap();
        let before = f.service.get_route(route.id).await.unwrap();

        let result = f
            .service
            .complete_route(
                route.id,
                CompleteRouteRequest {
                    distance_km: 99.0,
                    ..payload()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::InvalidState(_))));

        let after = f.service.get_route(route.id).await.unwrap();
        assert_eq!(after, before);
        let performance = f
            .state
            .performances
            .find_by_route_id(route.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(performance.distance_km, 12.5);
    }

    #[tokio::test]
    async fn test_complete_after_forced_reopen_rolls_back() {
        let f = fixture().await;
        let route = f.service.create_route(new_route(f.vehicle_id)).await.unwrap();
        f.service.complete_route(route.id, payload()).await.unwrap();

        // Reabrir por el camino genérico deja el performance existente
        let reopened = f
            .service
            .update_route(route.id, RouteChanges::status(RouteStatus::InProgress))
            .await
            .unwrap();

        let result = f.service.complete_route(route.id, payload()).await;
        assert!(matches!(result, Err(AppError::InvalidState(_))));

        let after = f.service.get_route(route.id).await.unwrap();
        assert_eq!(after, reopened);
        assert_eq!(after.status, RouteStatus::InProgress);
    }

    #[tokio::test]
    async fn test_complete_missing_route_is_not_found() {
        let f = fixture().await;
        let result = f.service.complete_route(Uuid::new_v4(), payload()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_route_cascades_performance() {
        let f = fixture().await;
        let route = f.service.create_route(new_route(f.vehicle_id)).await.unwrap();
        f.service.complete_route(route.id, payload()).await.unwrap();

        let response = f.service.delete_route(route.id).await.unwrap();
        assert_eq!(response.message, format!("Ruta {} eliminada correctamente", route.id));

        assert!(f
            .state
            .performances
            .find_by_route_id(route.id)
            .await
            .unwrap()
            .is_none());
        assert!(matches!(
            f.service.delete_route(route.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_filters_by_status_and_vehicle() {
        let f = fixture().await;
        let other_vehicle = f
            .state
            .vehicles
            .create(NewVehicle {
                user_id: None,
                plate_number: "XYZ-999".to_string(),
                brand: "Ford".to_string(),
                model: "Transit".to_string(),
                year: Some(2019),
            })
            .await
            .unwrap();

        let first = f.service.create_route(new_route(f.vehicle_id)).await.unwrap();
        let second = f.service.create_route(new_route(f.vehicle_id)).await.unwrap();
        let third = f.service.create_route(new_route(other_vehicle.id)).await.unwrap();
        f.service.complete_route(second.id, payload()).await.unwrap();

        let completed = f
            .service
            .list_routes(&RouteFilters {
                status: Some(RouteStatus::Completed),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, second.id);

        let for_vehicle: Vec<Uuid> = f
            .service
            .list_routes(&RouteFilters {
                vehicle_id: Some(f.vehicle_id),
                ..Default::default()
            })
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(for_vehicle, vec![first.id, second.id]);

        let all = f.service.list_routes(&RouteFilters::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].id, third.id);
    }
}
