// src/options/mod.rs

//! Contrato común de las opciones de línea de comandos.
//!
//! Toda representación de una opción (estática o decorada con valores dinámicos)
//! implementa [`OptionDescriptor`], de modo que el despachador puede listar, validar
//! y aplicar opciones sin saber de dónde salen sus valores.

pub mod instance;
pub mod providers;
pub mod static_descriptor;

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

pub use instance::InstanceOptionDescriptor;
pub use providers::{ProviderMethod, ReturnShape, TypeHierarchy, TypeLevel, ValueProvider};
pub use static_descriptor::{OptionValue, StaticOptionDescriptor};

/// Tipo semántico del argumento que espera una opción.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    #[default]
    #[serde(alias = "string")]
    Text,
    Boolean,
    Enum,
}

impl ArgumentType {
    /// Solo las opciones de texto admiten valores aportados por el objeto destino.
    pub fn is_textual(self) -> bool {
        matches!(self, ArgumentType::Text)
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgumentType::Text => "text",
            ArgumentType::Boolean => "boolean",
            ArgumentType::Enum => "enum",
        };
        f.write_str(name)
    }
}

/// Lugar donde se declaró la opción. Los decoradores lo reenvían tal cual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionElement {
    pub declaring_type: String,
    pub element_name: String,
}

impl OptionElement {
    pub fn new(declaring_type: impl Into<String>, element_name: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            element_name: element_name.into(),
        }
    }
}

impl fmt::Display for OptionElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.element_name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("El objeto {rejected} no es aplicable. Se esperaba {expected}.")]
    NotApplicable { rejected: String, expected: String },
    #[error(
        "La marca de valores de opción no está soportada en el método '{method}' del tipo '{type_name}'. El método debe devolver una colección y no recibir parámetros."
    )]
    UnsupportedProvider { method: String, type_name: String },
    #[error(
        "Los valores de la opción '{option}' no pueden aportarse desde más de un método (conflicto en el tipo '{type_name}')."
    )]
    DuplicateProvider { option: String, type_name: String },
    #[error("No se proporcionó ningún argumento para la opción '--{option}'.")]
    MissingValue { option: String },
    #[error("La opción '--{option}' solo admite un valor, pero se recibieron {count}.")]
    MultipleValues { option: String, count: usize },
    #[error("La opción '--{option}' no admite argumentos.")]
    UnexpectedValue { option: String },
    #[error(
        "Valor '{value}' no válido para la opción '--{option}'. Valores disponibles: {}",
        .candidates.join(", ")
    )]
    InvalidValue {
        option: String,
        value: String,
        candidates: Vec<String>,
    },
}

/// El objeto vivo sobre el que se aplican las opciones.
///
/// En lugar de inspeccionar la jerarquía de tipos en tiempo de ejecución, cada tipo
/// declara explícitamente sus niveles y los métodos que aportan valores.
pub trait OptionTarget: fmt::Display {
    /// Jerarquía del tipo real de esta instancia, del más derivado al menos derivado.
    fn type_hierarchy(&self) -> TypeHierarchy<Self>
    where
        Self: Sized;
}

pub trait OptionDescriptor<T: OptionTarget> {
    fn option_element(&self) -> &OptionElement;

    fn name(&self) -> &str;

    fn argument_type(&self) -> ArgumentType;

    /// Valores válidos en este momento. Vacío significa "sin restricción conocida".
    fn available_values(&self) -> Result<Vec<String>, OptionError>;

    fn description(&self) -> &str;

    /// Aplica los valores ya parseados sobre `target`.
    fn apply(&self, target: &RefCell<T>, values: &[String]) -> Result<(), OptionError>;

    /// Orden estable para los listados.
    fn compare(&self, other: &dyn OptionDescriptor<T>) -> Ordering {
        self.name().cmp(other.name())
    }
}

impl<T: OptionTarget, D: OptionDescriptor<T> + ?Sized> OptionDescriptor<T> for &D {
    fn option_element(&self) -> &OptionElement {
        (**self).option_element()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn argument_type(&self) -> ArgumentType {
        (**self).argument_type()
    }

    fn available_values(&self) -> Result<Vec<String>, OptionError> {
        (**self).available_values()
    }

    fn description(&self) -> &str {
        (**self).description()
    }

    fn apply(&self, target: &RefCell<T>, values: &[String]) -> Result<(), OptionError> {
        (**self).apply(target, values)
    }

    fn compare(&self, other: &dyn OptionDescriptor<T>) -> Ordering {
        (**self).compare(other)
    }
}
