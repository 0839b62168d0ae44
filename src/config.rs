// src/config.rs

use crate::constants::{CATALOG_ENV_VAR, CATALOG_FILENAME, CONFIG_DIR_NAME};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No se pudo encontrar el directorio de configuración del sistema.")]
    ConfigDirNotFound,
}

/// Devuelve la ruta al directorio de configuración de dynopts.
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    let config_path = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join(CONFIG_DIR_NAME);
    log::debug!("Directorio de config: {:?}", config_path);
    Ok(config_path)
}

/// Devuelve la ruta del catálogo a usar.
///
/// Prioridad: ruta explícita, variable `DYNOPTS_CATALOG`, `<config>/dynopts/catalog.toml`.
pub fn resolve_catalog_path(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    choose_catalog_path(explicit, env::var_os(CATALOG_ENV_VAR), get_config_dir)
}

fn choose_catalog_path(
    explicit: Option<PathBuf>,
    from_env: Option<OsString>,
    config_dir: impl FnOnce() -> Result<PathBuf, ConfigError>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Some(path) = from_env.filter(|p| !p.is_empty()) {
        log::info!("Usando el catálogo de {}: {:?}", CATALOG_ENV_VAR, path);
        return Ok(PathBuf::from(path));
    }
    config_dir().map(|dir| dir.join(CATALOG_FILENAME))
}
