use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    CreateVehicleRequest, DeleteVehicleQuery, UpdateVehicleRequest, VehicleResponse,
};
use crate::dto::MessageResponse;
use crate::models::VehicleFilters;
use crate::services::VehicleService;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extractors::{ApiJson, ApiPath, ApiQuery};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", get(get_vehicle).put(update_vehicle).delete(delete_vehicle))
        .route("/:id/activate", patch(activate_vehicle))
        .route("/:id/deactivate", patch(deactivate_vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<VehicleFilters>,
) -> AppResult<Json<Vec<VehicleResponse>>> {
    filters.validate()?;
    let vehicles = VehicleService::new(&state).list_vehicles(&filters).await?;
    Ok(Json(vehicles.into_iter().map(VehicleResponse::from).collect()))
}

async fn get_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<VehicleResponse>> {
    let vehicle = VehicleService::new(&state).get_vehicle(id).await?;
    Ok(Json(vehicle.into()))
}

async fn create_vehicle(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateVehicleRequest>,
) -> AppResult<(StatusCode, Json<VehicleResponse>)> {
    request.validate()?;
    let vehicle = VehicleService::new(&state).create_vehicle(request.into()).await?;
    Ok((StatusCode::CREATED, Json(vehicle.into())))
}

async fn update_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateVehicleRequest>,
) -> AppResult<Json<VehicleResponse>> {
    request.validate()?;
    let vehicle = VehicleService::new(&state)
        .update_vehicle(id, request.into())
        .await?;
    Ok(Json(vehicle.into()))
}

async fn activate_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<VehicleResponse>> {
    let vehicle = VehicleService::new(&state).set_active(id, true).await?;
    Ok(Json(vehicle.into()))
}

async fn deactivate_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<VehicleResponse>> {
    let vehicle = VehicleService::new(&state).set_active(id, false).await?;
    Ok(Json(vehicle.into()))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<DeleteVehicleQuery>,
) -> AppResult<Json<MessageResponse>> {
    let response = VehicleService::new(&state)
        .delete_vehicle(id, query.soft)
        .await?;
    Ok(Json(response))
}
