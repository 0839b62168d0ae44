// src/core/catalog.rs

use crate::models::{CatalogFile, MethodDef, TypeDef};
use crate::options::{
    OptionElement, OptionTarget, OptionValue, ProviderMethod, ReturnShape,
    StaticOptionDescriptor, TypeHierarchy, TypeLevel,
};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Error de Ficheros: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error al parsear TOML en '{path}': {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("El tipo '{type_name}' no existe en el catálogo.")]
    UnknownType { type_name: String },
    #[error("Enlace de herencia roto: el tipo '{child}' extiende un tipo inexistente '{parent}'.")]
    BrokenParent { child: String, parent: String },
    #[error("Herencia circular detectada en el tipo '{type_name}'.")]
    InheritanceCycle { type_name: String },
}

type CatalogResult<T> = Result<T, CatalogError>;

/// Tipos de tarea declarados en un catálogo TOML.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    types: BTreeMap<String, TypeDef>,
}

impl Catalog {
    pub fn load(path: &Path) -> CatalogResult<Self> {
        log::info!("Cargando catálogo desde: {:?}", path);
        let content = fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parsea un catálogo. `origin` solo se usa en los mensajes de error.
    pub fn parse(content: &str, origin: &str) -> CatalogResult<Self> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogError::TomlParse {
            path: origin.to_string(),
            source: e,
        })?;
        Ok(Self { types: file.types })
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeDef> {
        self.types.get(type_name)
    }

    /// Crea una instancia nueva del tipo, con las propiedades iniciales de toda su cadena.
    pub fn instantiate(&self, type_name: &str) -> CatalogResult<Task> {
        let chain = self.build_inheritance_chain(type_name)?;

        // Del ancestro más lejano al tipo real: el más derivado tiene prioridad.
        let mut properties = BTreeMap::new();
        for (_, def) in chain.iter().rev() {
            properties.extend(def.properties.clone());
        }

        Ok(Task {
            type_name: type_name.to_string(),
            chain: Rc::new(chain),
            properties,
        })
    }

    /// Cadena de herencia desde el tipo pedido hacia arriba (el más derivado primero).
    fn build_inheritance_chain(&self, leaf: &str) -> CatalogResult<Vec<(String, TypeDef)>> {
        if !self.types.contains_key(leaf) {
            return Err(CatalogError::UnknownType {
                type_name: leaf.to_string(),
            });
        }

        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(leaf.to_string());

        while let Some(name) = current {
            if !visited.insert(name.clone()) {
                return Err(CatalogError::InheritanceCycle { type_name: name });
            }

            let def = match self.types.get(&name) {
                Some(def) => def,
                None => {
                    let child = chain
                        .last()
                        .map(|(child, _): &(String, TypeDef)| child.clone())
                        .unwrap_or_default();
                    return Err(CatalogError::BrokenParent {
                        child,
                        parent: name,
                    });
                }
            };

            current = def.extends.clone();
            chain.push((name, def.clone()));
        }

        Ok(chain)
    }
}

/// Instancia viva de un tipo del catálogo. Es el destino de las opciones.
#[derive(Debug, Clone)]
pub struct Task {
    type_name: String,
    chain: Rc<Vec<(String, TypeDef)>>,
    properties: BTreeMap<String, Vec<String>>,
}

impl Task {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn property(&self, name: &str) -> Option<&[String]> {
        self.properties.get(name).map(Vec::as_slice)
    }

    pub fn properties(&self) -> &BTreeMap<String, Vec<String>> {
        &self.properties
    }

    pub fn set_property(&mut self, name: &str, values: Vec<String>) {
        self.properties.insert(name.to_string(), values);
    }

    /// Descriptores base de todas las opciones de la cadena.
    ///
    /// Si un subtipo redeclara una opción, su declaración sustituye a la del ancestro.
    pub fn option_descriptors(&self) -> Vec<StaticOptionDescriptor<Task>> {
        let mut declared = BTreeMap::new();
        for (type_name, def) in self.chain.iter().rev() {
            for option in &def.options {
                declared.insert(option.name.clone(), (type_name, option));
            }
        }

        declared
            .into_values()
            .map(|(type_name, option)| {
                let property = option.property_name().to_string();
                StaticOptionDescriptor::new(
                    OptionElement::new(type_name.as_str(), property.as_str()),
                    option.name.as_str(),
                    option.description.as_str(),
                    option.argument_type,
                    move |task: &mut Task, value| {
                        let value = match value {
                            OptionValue::Flag => "true".to_string(),
                            OptionValue::Text(text) => text,
                        };
                        task.set_property(&property, vec![value]);
                        Ok(())
                    },
                )
                .with_values(option.values.iter().cloned())
            })
            .collect()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tarea '{}'", self.type_name)
    }
}

impl OptionTarget for Task {
    fn type_hierarchy(&self) -> TypeHierarchy<Self> {
        self.chain
            .iter()
            .fold(TypeHierarchy::new(), |hierarchy, (type_name, def)| {
                hierarchy.level(level_for(type_name, def))
            })
    }
}

fn level_for(type_name: &str, def: &TypeDef) -> TypeLevel<Task> {
    def.methods
        .iter()
        .filter_map(|method| {
            let options = method.option_values.clone()?;
            Some(provider_for(method, options))
        })
        .fold(TypeLevel::new(type_name), TypeLevel::provider)
}

fn provider_for(method: &MethodDef, options: Vec<String>) -> ProviderMethod<Task> {
    let literal = method.values.clone();
    let property = method.property.clone();
    let accessor = move |task: &Task| {
        let mut values = literal.clone();
        if let Some(property) = &property {
            values.extend(task.property(property).unwrap_or_default().iter().cloned());
        }
        values
    };

    let provider = match method.returns {
        ReturnShape::Collection => ProviderMethod::collection(&method.name, options, accessor),
        ReturnShape::Single => {
            ProviderMethod::single(&method.name, options, move |task: &Task| {
                accessor(task).join(",")
            })
        }
    };

    method
        .parameters
        .iter()
        .fold(provider, |provider, parameter| provider.with_parameter(parameter))
}
