//! Configuración de variables de entorno
//!
//! Este módulo construye, una sola vez al arrancar, la configuración que se
//! pasa por referencia a los componentes que la necesitan.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use super::database::DatabaseConfig;

/// Backend de persistencia
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("Backend de almacenamiento desconocido: {}", other)),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub app_name: String,
    pub app_version: String,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub cors_origins: Vec<String>,
    pub storage_backend: StorageBackend,
    pub database: DatabaseConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            app_name: "Fleet Routes API".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            debug: false,
            cors_origins: vec!["*".to_string()],
            storage_backend: StorageBackend::Memory,
            database: DatabaseConfig::default(),
        }
    }
}

/// Leer y parsear una variable, usando `default` si no está definida
pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{} tiene un valor inválido '{}': {}", key, raw, e)),
        None => Ok(default),
    }
}

impl EnvironmentConfig {
    /// Construir la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
            .context("Configuración de entorno inválida")
    }

    /// Construir la configuración desde un lookup arbitrario
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            app_name: lookup("APP_NAME").unwrap_or(defaults.app_name),
            app_version: lookup("APP_VERSION").unwrap_or(defaults.app_version),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            debug: parse_or(&lookup, "DEBUG", defaults.debug)?,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            storage_backend: parse_or(&lookup, "STORAGE_BACKEND", StorageBackend::Postgres)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
        };

        if config.storage_backend == StorageBackend::Postgres && config.database.url.is_none() {
            bail!("DATABASE_URL es obligatoria con STORAGE_BACKEND=postgres");
        }

        Ok(config)
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Orígenes CORS abiertos a cualquier dominio
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
