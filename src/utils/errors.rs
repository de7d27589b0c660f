//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Restricciones de campo rechazadas en la frontera HTTP (422)
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Query, path o cuerpo JSON que no se pudo deserializar (422)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Integridad referencial o reglas de negocio sobre los datos (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Operación no permitida en el estado actual de la ruta (400)
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl AppError {
    /// Código de estado HTTP asociado al error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::InvalidRequest(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::BadRequest(_) | AppError::InvalidState(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = match self {
            AppError::Database(e) => {
                error!("Database error: {}", e);
                ErrorResponse {
                    error: "Database Error".to_string(),
                    message: "An error occurred while accessing the database".to_string(),
                    details: Some(json!({ "sql_error": e.to_string() })),
                    code: Some("DB_ERROR".to_string()),
                }
            }

            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: Some(json!(e)),
                    code: Some("VALIDATION_ERROR".to_string()),
                }
            }

            AppError::InvalidRequest(msg) => {
                warn!("Invalid request: {}", msg);
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: msg,
                    details: None,
                    code: Some("VALIDATION_ERROR".to_string()),
                }
            }

            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details: None,
                    code: Some("BAD_REQUEST".to_string()),
                }
            }

            AppError::InvalidState(msg) => {
                warn!("Invalid state: {}", msg);
                ErrorResponse {
                    error: "Invalid State".to_string(),
                    message: msg,
                    details: None,
                    code: Some("INVALID_STATE".to_string()),
                }
            }

            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code: Some("NOT_FOUND".to_string()),
                }
            }

            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "An unexpected error occurred".to_string(),
                    details: Some(json!({ "internal_error": msg })),
                    code: Some("INTERNAL_ERROR".to_string()),
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para rutas inexistentes
pub fn route_not_found(id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("Ruta con ID {} no encontrada", id))
}

/// Función helper para vehículos inexistentes
pub fn vehicle_not_found(id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("Vehículo con ID {} no encontrado", id))
}

/// Función helper para rutas que ya tienen cierre registrado
pub fn route_already_completed() -> AppError {
    AppError::InvalidState("La ruta ya fue completada".to_string())
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

/// Mapear violaciones de restricciones de Postgres a errores de dominio.
///
/// Devuelve `None` cuando el error no corresponde a una restricción conocida.
pub fn constraint_violation(e: &sqlx::Error) -> Option<ConstraintKind> {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => Some(ConstraintKind::Unique),
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => Some(ConstraintKind::ForeignKey),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidState("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Validation(validator::ValidationErrors::new()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::InvalidRequest("bad json".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = route_not_found(42);
        assert_eq!(err.to_string(), "Not found: Ruta con ID 42 no encontrada");
        let err = vehicle_not_found("abc");
        assert_eq!(err.to_string(), "Not found: Vehículo con ID abc no encontrado");
    }

    #[test]
    fn test_row_not_found_is_not_a_constraint() {
        assert_eq!(constraint_violation(&sqlx::Error::RowNotFound), None);
    }
}
