// src/models.rs

use crate::options::{ArgumentType, ReturnShape};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// --- MODELOS DEL CATÁLOGO (Lo que se lee de catalog.toml) ---

/// Representa la estructura deserializada de un archivo `catalog.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct CatalogFile {
    #[serde(default)]
    pub types: BTreeMap<String, TypeDef>,
}

/// Un tipo de tarea. Puede heredar de otro con `extends`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct TypeDef {
    pub extends: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<OptionDef>,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
    // Valores iniciales de las propiedades de cada instancia.
    #[serde(default)]
    pub properties: BTreeMap<String, Vec<String>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OptionDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub argument_type: ArgumentType,
    /// Valores fijos (constantes para las opciones `enum`).
    #[serde(default)]
    pub values: Vec<String>,
    /// Propiedad que escribe la opción. Si falta, la del mismo nombre.
    pub property: Option<String>,
}

impl OptionDef {
    pub fn property_name(&self) -> &str {
        self.property.as_deref().unwrap_or(&self.name)
    }
}

/// Un método del tipo. Solo los que llevan `option_values` son proveedores.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub name: String,
    pub option_values: Option<Vec<String>>,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub returns: ReturnShape,
    /// Resultado literal del método.
    #[serde(default)]
    pub values: Vec<String>,
    /// Propiedad de la instancia cuyos valores actuales se añaden al resultado.
    pub property: Option<String>,
}
