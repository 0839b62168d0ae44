// src/options/providers.rs

//! Búsqueda de los métodos que aportan valores dinámicos a las opciones.
//!
//! Cada tipo destino describe su jerarquía como una lista de niveles (del más derivado
//! al menos derivado, sin la raíz universal). Cada nivel declara sus métodos marcados
//! con los nombres de las opciones a las que aportan valores.

use super::OptionError;
use serde::{Deserialize, Serialize};
use std::ptr;

type Accessor<T> = Box<dyn Fn(&T) -> Vec<String>>;

/// Forma del valor devuelto por un método proveedor.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReturnShape {
    #[default]
    Collection,
    Single,
}

/// Un método marcado como proveedor de valores para una o varias opciones.
pub struct ProviderMethod<T> {
    name: String,
    option_values: Vec<String>,
    parameters: Vec<String>,
    returns: ReturnShape,
    accessor: Accessor<T>,
}

impl<T> ProviderMethod<T> {
    /// Declara un método sin parámetros que devuelve una colección, la única forma soportada.
    pub fn collection<I, S, F, V>(name: impl Into<String>, options: I, accessor: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&T) -> V + 'static,
        V: IntoIterator,
        V::Item: ToString,
    {
        Self {
            name: name.into(),
            option_values: options.into_iter().map(Into::into).collect(),
            parameters: Vec::new(),
            returns: ReturnShape::Collection,
            accessor: Box::new(move |target| {
                accessor(target)
                    .into_iter()
                    .map(|value| value.to_string())
                    .collect()
            }),
        }
    }

    /// Declara un método que devuelve un único valor. Se rechaza al buscar proveedores.
    pub fn single<I, S, F, V>(name: impl Into<String>, options: I, accessor: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&T) -> V + 'static,
        V: ToString,
    {
        Self {
            name: name.into(),
            option_values: options.into_iter().map(Into::into).collect(),
            parameters: Vec::new(),
            returns: ReturnShape::Single,
            accessor: Box::new(move |target| vec![accessor(target).to_string()]),
        }
    }

    /// Añade un parámetro declarado. Un proveedor con parámetros se rechaza al buscar proveedores.
    pub fn with_parameter(mut self, type_name: impl Into<String>) -> Self {
        self.parameters.push(type_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn option_values(&self) -> &[String] {
        &self.option_values
    }

    fn is_supported(&self) -> bool {
        self.parameters.is_empty() && self.returns == ReturnShape::Collection
    }

    fn invoke(&self, target: &T) -> Vec<String> {
        (self.accessor)(target)
    }
}

/// Un nivel de la jerarquía: un tipo y los métodos proveedores que declara.
pub struct TypeLevel<T> {
    type_name: String,
    methods: Vec<ProviderMethod<T>>,
}

impl<T> TypeLevel<T> {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            methods: Vec::new(),
        }
    }

    pub fn provider(mut self, method: ProviderMethod<T>) -> Self {
        self.methods.push(method);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn methods(&self) -> &[ProviderMethod<T>] {
        &self.methods
    }
}

pub struct TypeHierarchy<T> {
    levels: Vec<TypeLevel<T>>,
}

impl<T> Default for TypeHierarchy<T> {
    fn default() -> Self {
        Self { levels: Vec::new() }
    }
}

impl<T> TypeHierarchy<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Añade el siguiente ancestro. El primer nivel añadido es el tipo real del objeto.
    pub fn level(mut self, level: TypeLevel<T>) -> Self {
        self.levels.push(level);
        self
    }

    pub fn levels(&self) -> &[TypeLevel<T>] {
        &self.levels
    }
}

/// El único proveedor de una opción, encontrado en un nivel de la jerarquía.
pub struct ValueProvider<'h, T> {
    type_name: &'h str,
    method: &'h ProviderMethod<T>,
}

impl<'h, T> ValueProvider<'h, T> {
    /// Busca el proveedor de `option` recorriendo la jerarquía.
    ///
    /// Cualquier método con forma no soportada hace fallar la búsqueda, aunque no sirva
    /// a `option`. Una segunda declaración de `option` en cualquier nivel también falla
    /// (no hay ocultación por subtipos). Los conflictos de otras opciones no importan.
    pub fn find(
        hierarchy: &'h TypeHierarchy<T>,
        option: &str,
    ) -> Result<Option<Self>, OptionError> {
        let mut found: Option<Self> = None;

        for level in hierarchy.levels() {
            for method in level.methods() {
                if !method.is_supported() {
                    return Err(OptionError::UnsupportedProvider {
                        method: method.name().to_string(),
                        type_name: level.type_name().to_string(),
                    });
                }

                if !method.option_values().iter().any(|name| name == option) {
                    continue;
                }

                match &found {
                    // Una opción repetida dentro del mismo método no es un conflicto.
                    Some(existing) if ptr::eq(existing.method, method) => {}
                    Some(_) => {
                        return Err(OptionError::DuplicateProvider {
                            option: option.to_string(),
                            type_name: level.type_name().to_string(),
                        });
                    }
                    None => {
                        found = Some(Self {
                            type_name: level.type_name(),
                            method,
                        })
                    }
                }
            }
        }

        Ok(found)
    }

    pub fn method_name(&self) -> &str {
        self.method.name()
    }

    pub fn type_name(&self) -> &str {
        self.type_name
    }

    pub fn values(&self, target: &T) -> Vec<String> {
        self.method.invoke(target)
    }
}
