use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::dto::MessageResponse;
use crate::models::{NewVehicle, Vehicle, VehicleChanges, VehicleFilters};
use crate::repositories::VehicleStore;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, vehicle_not_found, AppError, AppResult};
use crate::utils::validation::validate_plate_number;

pub struct VehicleService {
    vehicles: Arc<dyn VehicleStore>,
}

fn duplicate_plate(plate_number: &str) -> AppError {
    AppError::BadRequest(format!("Ya existe un vehículo con la placa {}", plate_number))
}

fn check_plate_format(plate_number: &str) -> AppResult<()> {
    validate_plate_number(plate_number).map_err(|_| bad_request_error("Formato de placa inválido"))
}

impl VehicleService {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
        }
    }

    pub async fn get_vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        debug!("🔍 Buscando vehículo {}", id);
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| vehicle_not_found(id))
    }

    pub async fn list_vehicles(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        self.vehicles.list(filters).await
    }

    pub async fn create_vehicle(&self, new_vehicle: NewVehicle) -> AppResult<Vehicle> {
        // Duplicado primero, luego formato
        if self.vehicles.exists_by_plate_number(&new_vehicle.plate_number).await? {
            return Err(duplicate_plate(&new_vehicle.plate_number));
        }
        check_plate_format(&new_vehicle.plate_number)?;

        let vehicle = self.vehicles.create(new_vehicle).await?;
        info!("🚗 Vehículo {} registrado con placa {}", vehicle.id, vehicle.plate_number);
        Ok(vehicle)
    }

    pub async fn update_vehicle(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Vehicle> {
        self.get_vehicle(id).await?;

        if let Some(plate_number) = &changes.plate_number {
            if let Some(existing) = self.vehicles.find_by_plate_number(plate_number).await? {
                if existing.id != id {
                    return Err(duplicate_plate(plate_number));
                }
            }
            check_plate_format(plate_number)?;
        }

        let vehicle = self
            .vehicles
            .update(id, changes)
            .await?
            .ok_or_else(|| vehicle_not_found(id))?;
        info!("📝 Vehículo {} actualizado", vehicle.id);
        Ok(vehicle)
    }

    pub async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<Vehicle> {
        self.update_vehicle(id, VehicleChanges::active(is_active)).await
    }

    pub async fn delete_vehicle(&self, id: Uuid, soft: bool) -> AppResult<MessageResponse> {
        if soft {
            self.vehicles
                .soft_delete(id)
                .await?
                .ok_or_else(|| vehicle_not_found(id))?;
            info!("🚫 Vehículo {} marcado como inactivo", id);
            Ok(MessageResponse::new(format!("Vehículo {} marcado como inactivo", id)))
        } else {
            if !self.vehicles.delete(id).await? {
                return Err(vehicle_not_found(id));
            }
            info!("🗑️ Vehículo {} eliminado permanentemente", id);
            Ok(MessageResponse::new(format!("Vehículo {} eliminado permanentemente", id)))
        }
    }
}
