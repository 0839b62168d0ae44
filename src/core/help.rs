// src/core/help.rs

use crate::options::{OptionDescriptor, OptionError, OptionTarget};

/// Genera el texto de ayuda de las opciones, ordenadas con `compare`.
pub fn render_options<T, D>(descriptors: &[D]) -> Result<String, OptionError>
where
    T: OptionTarget,
    D: OptionDescriptor<T>,
{
    if descriptors.is_empty() {
        return Ok("No hay opciones definidas.\n".to_string());
    }

    let mut sorted: Vec<&D> = descriptors.iter().collect();
    sorted.sort_by(|a, b| a.compare(*b));

    let mut out = String::from("Opciones:\n");
    for descriptor in sorted {
        out.push_str(&format!(
            "  --{} ({})\n",
            descriptor.name(),
            descriptor.argument_type()
        ));
        if !descriptor.description().is_empty() {
            out.push_str(&format!("      {}\n", descriptor.description()));
        }

        let values = descriptor.available_values()?;
        if !values.is_empty() {
            out.push_str("      Valores disponibles:\n");
            for value in values {
                out.push_str(&format!("        {}\n", value));
            }
        }
    }
    Ok(out)
}
