use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{NewVehicle, Vehicle, VehicleChanges};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    pub user_id: Option<Uuid>,

    #[validate(length(min = 1))]
    pub plate_number: String,

    #[validate(length(min = 1))]
    pub brand: String,

    #[validate(length(min = 1))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
}

impl From<CreateVehicleRequest> for NewVehicle {
    fn from(request: CreateVehicleRequest) -> Self {
        Self {
            user_id: request.user_id,
            plate_number: request.plate_number,
            brand: request.brand,
            model: request.model,
            year: request.year,
        }
    }
}

// Request para actualizar un vehículo
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    pub user_id: Option<Uuid>,

    #[validate(length(min = 1))]
    pub plate_number: Option<String>,

    #[validate(length(min = 1))]
    pub brand: Option<String>,

    #[validate(length(min = 1))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    pub is_active: Option<bool>,
}

impl From<UpdateVehicleRequest> for VehicleChanges {
    fn from(request: UpdateVehicleRequest) -> Self {
        Self {
            user_id: request.user_id,
            plate_number: request.plate_number,
            brand: request.brand,
            model: request.model,
            year: request.year,
            is_active: request.is_active,
        }
    }
}

// Query para el borrado de vehículos
#[derive(Debug, Deserialize)]
pub struct DeleteVehicleQuery {
    #[serde(default = "default_soft")]
    pub soft: bool,
}

fn default_soft() -> bool {
    true
}

// Response de vehículo
#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub plate_number: String,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            user_id: vehicle.user_id,
            plate_number: vehicle.plate_number,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            is_active: vehicle.is_active,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}
