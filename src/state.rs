//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::EnvironmentConfig;
use crate::repositories::{
    MemoryStore, PerformanceRepository, PerformanceStore, RouteRepository, RouteStore,
    VehicleRepository, VehicleStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub vehicles: Arc<dyn VehicleStore>,
    pub routes: Arc<dyn RouteStore>,
    pub performances: Arc<dyn PerformanceStore>,
}

impl AppState {
    /// Estado respaldado por PostgreSQL
    pub fn with_postgres(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            config: Arc::new(config),
            vehicles: Arc::new(VehicleRepository::new(pool.clone())),
            routes: Arc::new(RouteRepository::new(pool.clone())),
            performances: Arc::new(PerformanceRepository::new(pool)),
        }
    }

    /// Estado respaldado por el almacén en memoria
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        let store = MemoryStore::new();
        Self {
            config: Arc::new(config),
            vehicles: Arc::new(store.clone()),
            routes: Arc::new(store.clone()),
            performances: Arc::new(store),
        }
    }
}
