//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
use log::warn;
use once_cell::sync::Lazy;
use std::env;

use crate::errors::CoreError;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_SEPARATOR: &str = " - ";
pub const DEFAULT_REPEAT: i64 = 3;

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Filtro de logging (sintaxis de `env_logger`, p. ej. `debug` u
    /// `op_core=trace`).
    pub log_level: String,
    /// Parámetros de los pipelines de demo.
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Separador del stage multiplicador.
    pub separator: String,
    /// Repeticiones del stage multiplicador.
    pub repeat: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { log_level: DEFAULT_LOG_LEVEL.to_string(),
               demo: DemoConfig { separator: DEFAULT_SEPARATOR.to_string(),
                                  repeat: DEFAULT_REPEAT } }
    }
}

impl AppConfig {
    /// Lee `OPFLOW_LOG`, `OPFLOW_SEPARATOR` y `OPFLOW_REPEAT` del entorno.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Self::default();
        let repeat = match lookup("OPFLOW_REPEAT") {
            Some(raw) => raw.trim()
                            .parse::<i64>()
                            .ok()
                            .filter(|n| *n >= 0)
                            .ok_or_else(|| CoreError::Config(format!("OPFLOW_REPEAT inválido: `{raw}`")))?,
            None => defaults.demo.repeat,
        };
        Ok(Self { log_level: lookup("OPFLOW_LOG").unwrap_or(defaults.log_level),
                  demo: DemoConfig { separator: lookup("OPFLOW_SEPARATOR").unwrap_or(defaults.demo.separator),
                                     repeat } })
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
    AppConfig::from_env().unwrap_or_else(|e| {
                             warn!("{e}; usando configuración por defecto");
                             AppConfig::default()
                         })
});
