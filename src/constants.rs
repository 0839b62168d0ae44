// src/constants.rs

/// El nombre del directorio de configuración de dynopts (dentro del directorio de configuración del sistema).
pub const CONFIG_DIR_NAME: &str = "dynopts";

/// El nombre del archivo del catálogo de tipos de tarea.
pub const CATALOG_FILENAME: &str = "catalog.toml";

/// Variable de entorno que apunta a un catálogo alternativo.
pub const CATALOG_ENV_VAR: &str = "DYNOPTS_CATALOG";
