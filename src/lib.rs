//! Fleet Routes API
//!
//! Gestión de vehículos, ciclo de vida de rutas y registro de performance
//! al completar cada ruta.

pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors_layer;
use crate::routes::{
    health_routes::health_check, performance_routes::create_performance_router,
    route_routes::create_route_router, vehicle_routes::create_vehicle_router,
};
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/vehicles", create_vehicle_router())
        .nest("/api/routes", create_route_router())
        .nest("/api/performances", create_performance_router())
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
