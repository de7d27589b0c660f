use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::route_dto::{
    CompleteRouteRequest, CompleteRouteResponse, CreateRouteRequest, RouteResponse,
    UpdateRouteRequest,
};
use crate::dto::MessageResponse;
use crate::models::RouteFilters;
use crate::services::RouteService;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extractors::{ApiJson, ApiPath, ApiQuery};

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes).post(create_route))
        .route("/:id", get(get_route).put(update_route).delete(delete_route))
        .route("/:id/complete", patch(complete_route))
}

async fn list_routes(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<RouteFilters>,
) -> AppResult<Json<Vec<RouteResponse>>> {
    filters.validate()?;
    let routes = RouteService::new(&state).list_routes(&filters).await?;
    Ok(Json(routes.into_iter().map(RouteResponse::from).collect()))
}

async fn get_route(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<RouteResponse>> {
    let route = RouteService::new(&state).get_route(id).await?;
    Ok(Json(route.into()))
}

async fn create_route(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateRouteRequest>,
) -> AppResult<(StatusCode, Json<RouteResponse>)> {
    request.validate()?;
    let route = RouteService::new(&state).create_route(request.into()).await?;
    Ok((StatusCode::CREATED, Json(route.into())))
}

async fn update_route(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateRouteRequest>,
) -> AppResult<Json<RouteResponse>> {
    let route = RouteService::new(&state)
        .update_route(id, request.into())
        .await?;
    Ok(Json(route.into()))
}

async fn complete_route(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CompleteRouteRequest>,
) -> AppResult<Json<CompleteRouteResponse>> {
    request.validate_payload()?;
    let response = RouteService::new(&state).complete_route(id, request).await?;
    Ok(Json(response))
}

async fn delete_route(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let response = RouteService::new(&state).delete_route(id).await?;
    Ok(Json(response))
}
