// src/options/instance.rs

use super::providers::ValueProvider;
use super::{ArgumentType, OptionDescriptor, OptionElement, OptionError, OptionTarget};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::ptr;

/// Decora un descriptor base ligándolo a un objeto destino concreto.
///
/// Todo se reenvía al descriptor base salvo los valores disponibles: para las opciones
/// de texto se añaden los que aporte el proveedor registrado por el tipo del destino.
/// No se guarda nada entre llamadas, así que un proveedor puede devolver valores
/// distintos cada vez.
pub struct InstanceOptionDescriptor<'a, T, D> {
    target: &'a RefCell<T>,
    delegate: D,
}

impl<'a, T, D> InstanceOptionDescriptor<'a, T, D>
where
    T: OptionTarget,
    D: OptionDescriptor<T>,
{
    pub fn new(target: &'a RefCell<T>, delegate: D) -> Self {
        Self { target, delegate }
    }

    fn lookup_dynamic_values(&self) -> Result<Vec<String>, OptionError> {
        let target = self.target.borrow();
        let hierarchy = target.type_hierarchy();

        match ValueProvider::find(&hierarchy, self.name())? {
            Some(provider) => {
                let values = provider.values(&target);
                log::debug!(
                    "{} valores dinámicos para '--{}' desde '{}' de '{}' en {}",
                    values.len(),
                    self.name(),
                    provider.method_name(),
                    provider.type_name(),
                    target
                );
                Ok(values)
            }
            None => Ok(Vec::new()),
        }
    }
}

impl<'a, T, D> OptionDescriptor<T> for InstanceOptionDescriptor<'a, T, D>
where
    T: OptionTarget,
    D: OptionDescriptor<T>,
{
    fn option_element(&self) -> &OptionElement {
        self.delegate.option_element()
    }

    fn name(&self) -> &str {
        self.delegate.name()
    }

    fn argument_type(&self) -> ArgumentType {
        self.delegate.argument_type()
    }

    fn available_values(&self) -> Result<Vec<String>, OptionError> {
        let mut values = self.delegate.available_values()?;

        if self.argument_type().is_textual() {
            values.extend(self.lookup_dynamic_values()?);
        }
        Ok(values)
    }

    fn description(&self) -> &str {
        self.delegate.description()
    }

    fn apply(&self, target: &RefCell<T>, values: &[String]) -> Result<(), OptionError> {
        if !ptr::eq(target, self.target) {
            return Err(OptionError::NotApplicable {
                rejected: target.borrow().to_string(),
                expected: self.target.borrow().to_string(),
            });
        }
        self.delegate.apply(target, values)
    }

    fn compare(&self, other: &dyn OptionDescriptor<T>) -> Ordering {
        self.delegate.compare(other)
    }
}
