//! Configuración de base de datos
//!
//! Este módulo describe los parámetros del pool de PostgreSQL con SQLx.

use std::time::Duration;

use anyhow::Result;

use super::environment::parse_or;

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 20,
            min_connections: 5,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Construir la configuración a partir de un lookup de variables
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            max_connections: parse_or(lookup, "DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: parse_or(lookup, "DATABASE_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout: Duration::from_secs(parse_or(
                lookup,
                "DATABASE_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout.as_secs(),
            )?),
            idle_timeout: Duration::from_secs(parse_or(
                lookup,
                "DATABASE_IDLE_TIMEOUT_SECS",
                defaults.idle_timeout.as_secs(),
            )?),
            max_lifetime: Duration::from_secs(parse_or(
                lookup,
                "DATABASE_MAX_LIFETIME_SECS",
                defaults.max_lifetime.as_secs(),
            )?),
            run_migrations: parse_or(lookup, "DATABASE_RUN_MIGRATIONS", defaults.run_migrations)?,
        })
    }
}
