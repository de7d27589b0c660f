//! DTOs de la API
//!
//! Requests y responses serializados en la frontera HTTP.

pub mod performance_dto;
pub mod route_dto;
pub mod vehicle_dto;

use serde::{Deserialize, Serialize};

// Response con un único mensaje de confirmación
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
