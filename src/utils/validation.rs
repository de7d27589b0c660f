//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para las validaciones que
//! `validator` no expresa directamente con atributos.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    /// Formato de placa aceptado, comparado siempre en mayúsculas
    static ref PLATE_NUMBER_REGEX: Regex = Regex::new(r"^[A-Z0-9-]{3,10}$").expect("valid plate regex");
}

/// Validar que un valor sea estrictamente positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de placa de vehículo.
///
/// La placa se pasa a mayúsculas antes de comparar, pero el valor
/// almacenado no se normaliza.
pub fn validate_plate_number(value: &str) -> Result<(), ValidationError> {
    if !PLATE_NUMBER_REGEX.is_match(&value.to_uppercase()) {
        let mut error = ValidationError::new("plate_number");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"A-Z, 0-9 o '-', entre 3 y 10 caracteres".to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0.1_f64).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(0.0_f64).is_err());
        assert!(validate_positive(-5).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0.0_f64).is_ok());
        assert!(validate_non_negative(1.2_f64).is_ok());
        assert!(validate_non_negative(-0.5_f64).is_err());
    }

    #[test]
    fn test_validate_plate_number() {
        assert!(validate_plate_number("ABC-123").is_ok());
        assert!(validate_plate_number("abc-123").is_ok());
        assert!(validate_plate_number("X1Y").is_ok());
        assert!(validate_plate_number("AB").is_err());
        assert!(validate_plate_number("ABCDEFGHIJK").is_err());
        assert!(validate_plate_number("ABC 123").is_err());
        assert!(validate_plate_number("ÑAB-12").is_err());
    }
}
