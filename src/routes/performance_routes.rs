use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::performance_dto::PerformanceResponse;
use crate::models::PerformanceFilters;
use crate::services::PerformanceService;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extractors::{ApiPath, ApiQuery};

pub fn create_performance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_performances))
        .route("/:route_id", get(get_performance))
}

async fn list_performances(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<PerformanceFilters>,
) -> AppResult<Json<Vec<PerformanceResponse>>> {
    filters.validate()?;
    let performances = PerformanceService::new(&state)
        .list_performances(&filters)
        .await?;
    Ok(Json(performances.into_iter().map(PerformanceResponse::from).collect()))
}

async fn get_performance(
    State(state): State<AppState>,
    ApiPath(route_id): ApiPath<Uuid>,
) -> AppResult<Json<PerformanceResponse>> {
    let performance = PerformanceService::new(&state).get_by_route(route_id).await?;
    Ok(Json(performance.into()))
}
