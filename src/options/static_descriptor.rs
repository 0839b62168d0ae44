// src/options/static_descriptor.rs

use super::{ArgumentType, OptionDescriptor, OptionElement, OptionError, OptionTarget};
use std::cell::RefCell;

/// Valor ya convertido que recibe el setter de una opción.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Flag,
    Text(String),
}

type Setter<T> = Box<dyn Fn(&mut T, OptionValue) -> Result<(), OptionError>>;

/// Descriptor base: metadatos fijos y un setter tipado.
pub struct StaticOptionDescriptor<T> {
    element: OptionElement,
    name: String,
    description: String,
    argument_type: ArgumentType,
    values: Vec<String>,
    setter: Setter<T>,
}

impl<T> StaticOptionDescriptor<T> {
    pub fn new<F>(
        element: OptionElement,
        name: impl Into<String>,
        description: impl Into<String>,
        argument_type: ArgumentType,
        setter: F,
    ) -> Self
    where
        F: Fn(&mut T, OptionValue) -> Result<(), OptionError> + 'static,
    {
        Self {
            element,
            name: name.into(),
            description: description.into(),
            argument_type,
            values: Vec::new(),
            setter: Box::new(setter),
        }
    }

    /// Valores fijos. Para las opciones `Enum` son las constantes admitidas.
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    fn convert(&self, values: &[String]) -> Result<OptionValue, OptionError> {
        match self.argument_type {
            ArgumentType::Boolean => {
                if values.is_empty() {
                    Ok(OptionValue::Flag)
                } else {
                    Err(OptionError::UnexpectedValue {
                        option: self.name.clone(),
                    })
                }
            }
            ArgumentType::Text | ArgumentType::Enum => {
                let value = match values {
                    [] => {
                        return Err(OptionError::MissingValue {
                            option: self.name.clone(),
                        });
                    }
                    [value] => value,
                    _ => {
                        return Err(OptionError::MultipleValues {
                            option: self.name.clone(),
                            count: values.len(),
                        });
                    }
                };

                if self.argument_type == ArgumentType::Enum && !self.values.contains(value) {
                    return Err(OptionError::InvalidValue {
                        option: self.name.clone(),
                        value: value.clone(),
                        candidates: self.values.clone(),
                    });
                }
                Ok(OptionValue::Text(value.clone()))
            }
        }
    }
}

impl<T: OptionTarget> OptionDescriptor<T> for StaticOptionDescriptor<T> {
    fn option_element(&self) -> &OptionElement {
        &self.element
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn argument_type(&self) -> ArgumentType {
        self.argument_type
    }

    fn available_values(&self) -> Result<Vec<String>, OptionError> {
        Ok(self.values.clone())
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn apply(&self, target: &RefCell<T>, values: &[String]) -> Result<(), OptionError> {
        let value = self.convert(values)?;
        log::debug!("Aplicando '--{}' = {:?} en {}", self.name, value, target.borrow());
        (self.setter)(&mut *target.borrow_mut(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TypeHierarchy;
    use std::fmt;

    #[derive(Default)]
    struct Build {
        mode: Option<String>,
        offline: bool,
    }

    impl fmt::Display for Build {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("build")
        }
    }

    impl OptionTarget for Build {
        fn type_hierarchy(&self) -> TypeHierarchy<Self> {
            TypeHierarchy::new()
        }
    }

    fn mode_option() -> StaticOptionDescriptor<Build> {
        StaticOptionDescriptor::new(
            OptionElement::new("Build", "mode"),
            "mode",
            "Modo de compilación",
            ArgumentType::Enum,
            |build: &mut Build, value| {
                if let OptionValue::Text(mode) = value {
                    build.mode = Some(mode);
                }
                Ok(())
            },
        )
        .with_values(["debug", "release"])
    }

    fn offline_option() -> StaticOptionDescriptor<Build> {
        StaticOptionDescriptor::new(
            OptionElement::new("Build", "offline"),
            "offline",
            "Trabajar sin red",
            ArgumentType::Boolean,
            |build: &mut Build, value| {
                build.offline = value == OptionValue::Flag;
                Ok(())
            },
        )
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_enum_values_are_static() {
        assert_eq!(mode_option().available_values().unwrap(), vec!["debug", "release"]);
    }

    #[test]
    fn test_enum_apply_sets_value() {
        let build = RefCell::new(Build::default());
        mode_option().apply(&build, &args(&["release"])).unwrap();
        assert_eq!(build.borrow().mode.as_deref(), Some("release"));
    }

    #[test]
    fn test_enum_rejects_unknown_value() {
        let build = RefCell::new(Build::default());
        let err = mode_option().apply(&build, &args(&["fast"])).unwrap_err();
        assert!(matches!(err, OptionError::InvalidValue { ref value, .. } if value == "fast"));
        assert!(build.borrow().mode.is_none());
    }

    #[test]
    fn test_value_count_is_checked() {
        let build = RefCell::new(Build::default());
        assert_eq!(
            mode_option().apply(&build, &[]).unwrap_err(),
            OptionError::MissingValue {
                option: "mode".to_string()
            }
        );
        assert_eq!(
            mode_option()
                .apply(&build, &args(&["debug", "release"]))
                .unwrap_err(),
            OptionError::MultipleValues {
                option: "mode".to_string(),
                count: 2
            }
        );
    }

    #[test]
    fn test_flag_takes_no_arguments() {
        let build = RefCell::new(Build::default());
        assert!(matches!(
            offline_option().apply(&build, &args(&["yes"])),
            Err(OptionError::UnexpectedValue { .. })
        ));

        offline_option().apply(&build, &[]).unwrap();
        assert!(build.borrow().offline);
    }

    #[test]
    fn test_compare_orders_by_name() {
        let mode = mode_option();
        let offline = offline_option();
        assert_eq!(mode.compare(&offline), std::cmp::Ordering::Less);
        assert_eq!(offline.compare(&mode), std::cmp::Ordering::Greater);
    }
}
