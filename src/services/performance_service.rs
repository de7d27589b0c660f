use std::sync::Arc;

use uuid::Uuid;

use crate::models::{Performance, PerformanceFilters};
use crate::repositories::PerformanceStore;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct PerformanceService {
    performances: Arc<dyn PerformanceStore>,
}

impl PerformanceService {
    pub fn new(state: &AppState) -> Self {
        Self {
            performances: state.performances.clone(),
        }
    }

    pub async fn list_performances(&self, filters: &PerformanceFilters) -> AppResult<Vec<Performance>> {
        self.performances.list(filters).await
    }

    pub async fn get_by_route(&self, route_id: Uuid) -> AppResult<Performance> {
        self.performances
            .find_by_route_id(route_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Performance de la ruta {} no encontrado", route_id))
            })
    }
}
