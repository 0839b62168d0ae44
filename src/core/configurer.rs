// src/core/configurer.rs

use crate::options::{
    ArgumentType, InstanceOptionDescriptor, OptionDescriptor, OptionError, OptionTarget,
};
use std::cell::RefCell;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigureError {
    #[error("Opción desconocida '--{option}' para {target}.")]
    UnknownOption { option: String, target: String },
    #[error("Argumento inesperado '{argument}': se esperaba una opción '--<nombre>'.")]
    UnexpectedArgument { argument: String },
    #[error(transparent)]
    Option(#[from] OptionError),
}

type ConfigureResult<T> = Result<T, ConfigureError>;

/// Aplica los argumentos de línea de comandos sobre `target`.
///
/// Acepta `--nombre valor`, `--nombre=valor` y `--flag`. Una opción repetida acumula
/// valores (el descriptor decide si los admite). Las opciones ausentes no se tocan.
/// Devuelve los nombres de las opciones aplicadas, en el orden de `descriptors`.
///
/// Los errores de sintaxis y las opciones desconocidas se detectan antes de tocar
/// `target`. Un fallo al aplicar una opción detiene el proceso, pero las opciones
/// anteriores en `descriptors` ya quedaron aplicadas.
pub fn configure<T, D>(
    target: &RefCell<T>,
    descriptors: &[D],
    args: &[String],
) -> ConfigureResult<Vec<String>>
where
    T: OptionTarget,
    D: OptionDescriptor<T>,
{
    let bound: Vec<_> = descriptors
        .iter()
        .map(|descriptor| InstanceOptionDescriptor::new(target, descriptor))
        .collect();

    let parsed = parse_arguments(target, &bound, args)?;

    let mut applied = Vec::new();
    for (descriptor, values) in bound.iter().zip(parsed) {
        let Some(values) = values else { continue };
        log::info!("Aplicando '--{}' en {}", descriptor.name(), target.borrow());
        descriptor.apply(target, &values)?;
        applied.push(descriptor.name().to_string());
    }
    Ok(applied)
}

/// Agrupa los valores de cada opción. La posición `i` corresponde a `descriptors[i]`.
fn parse_arguments<T, D>(
    target: &RefCell<T>,
    descriptors: &[D],
    args: &[String],
) -> ConfigureResult<Vec<Option<Vec<String>>>>
where
    T: OptionTarget,
    D: OptionDescriptor<T>,
{
    let mut parsed: Vec<Option<Vec<String>>> = vec![None; descriptors.len()];
    let mut tokens = args.iter().peekable();

    while let Some(token) = tokens.next() {
        let Some(option) = token.strip_prefix("--") else {
            return Err(ConfigureError::UnexpectedArgument {
                argument: token.clone(),
            });
        };

        let (name, inline_value) = match option.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (option, None),
        };

        let position = descriptors
            .iter()
            .position(|d| d.name() == name)
            .ok_or_else(|| ConfigureError::UnknownOption {
                option: name.to_string(),
                target: target.borrow().to_string(),
            })?;

        let values = parsed[position].get_or_insert_with(Vec::new);
        if let Some(value) = inline_value {
            values.push(value);
        } else if descriptors[position].argument_type() != ArgumentType::Boolean {
            if let Some(value) = tokens.next_if(|next| !next.starts_with("--")) {
                values.push(value.clone());
            }
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{
        OptionElement, OptionValue, ProviderMethod, StaticOptionDescriptor, TypeHierarchy,
        TypeLevel,
    };
    use std::fmt;

    #[derive(Default)]
    struct Job {
        tags: Vec<String>,
        format: Option<String>,
        dry_run: bool,
    }

    impl fmt::Display for Job {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("job")
        }
    }

    impl OptionTarget for Job {
        fn type_hierarchy(&self) -> TypeHierarchy<Self> {
            TypeHierarchy::new().level(TypeLevel::new("Job").provider(
                ProviderMethod::collection("formats", ["format"], |_: &Job| vec!["json", "text"]),
            ))
        }
    }

    fn descriptors() -> Vec<StaticOptionDescriptor<Job>> {
        vec![
            StaticOptionDescriptor::new(
                OptionElement::new("Job", "dry_run"),
                "dry-run",
                "No ejecutar nada",
                ArgumentType::Boolean,
                |job: &mut Job, _| {
                    job.dry_run = true;
                    Ok(())
                },
            ),
            StaticOptionDescriptor::new(
                OptionElement::new("Job", "format"),
                "format",
                "Formato de salida",
                ArgumentType::Text,
                |job: &mut Job, value| {
                    if let OptionValue::Text(format) = value {
                        job.format = Some(format);
                    }
                    Ok(())
                },
            ),
            StaticOptionDescriptor::new(
                OptionElement::new("Job", "tags"),
                "tag",
                "Etiqueta",
                ArgumentType::Text,
                |job: &mut Job, value| {
                    if let OptionValue::Text(tag) = value {
                        job.tags.push(tag);
                    }
                    Ok(())
                },
            ),
        ]
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_applies_flags_and_values() {
        let job = RefCell::new(Job::default());
        let applied = configure(
            &job,
            &descriptors(),
            &args(&["--format", "json", "--dry-run"]),
        )
        .unwrap();

        assert_eq!(applied, vec!["dry-run", "format"]);
        assert!(job.borrow().dry_run);
        assert_eq!(job.borrow().format.as_deref(), Some("json"));
        assert!(job.borrow().tags.is_empty());
    }

    #[test]
    fn test_inline_value() {
        let job = RefCell::new(Job::default());
        configure(&job, &descriptors(), &args(&["--tag=nightly"])).unwrap();
        assert_eq!(job.borrow().tags, vec!["nightly"]);
    }

    #[test]
    fn test_unknown_option() {
        let job = RefCell::new(Job::default());
        let err = configure(&job, &descriptors(), &args(&["--color", "red"])).unwrap_err();
        assert!(matches!(err, ConfigureError::UnknownOption { ref option, .. } if option == "color"));
        assert!(err.to_string().contains("job"));
    }

    #[test]
    fn test_bare_argument_is_rejected() {
        let job = RefCell::new(Job::default());
        assert!(matches!(
            configure(&job, &descriptors(), &args(&["json"])),
            Err(ConfigureError::UnexpectedArgument { .. })
        ));
    }

    #[test]
    fn test_missing_value_reaches_descriptor() {
        let job = RefCell::new(Job::default());
        let err = configure(&job, &descriptors(), &args(&["--format", "--dry-run"])).unwrap_err();
        assert!(matches!(
            err,
            ConfigureError::Option(OptionError::MissingValue { ref option }) if option == "format"
        ));
    }

    #[test]
    fn test_failure_keeps_earlier_options_applied() {
        let job = RefCell::new(Job::default());
        let err = configure(
            &job,
            &descriptors(),
            &args(&["--tag", "a", "--dry-run", "--format"]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigureError::Option(OptionError::MissingValue { ref option }) if option == "format"
        ));
        // `dry-run` va antes que `format` en los descriptores; `tag` va después.
        assert!(job.borrow().dry_run);
        assert!(job.borrow().tags.is_empty());
    }

    #[test]
    fn test_parse_error_leaves_target_untouched() {
        let job = RefCell::new(Job::default());
        assert!(configure(&job, &descriptors(), &args(&["--dry-run", "--color"])).is_err());
        assert!(!job.borrow().dry_run);
    }

    #[test]
    fn test_repeated_option_accumulates() {
        let job = RefCell::new(Job::default());
        let err = configure(
            &job,
            &descriptors(),
            &args(&["--format", "json", "--format", "text"]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigureError::Option(OptionError::MultipleValues { count: 2, .. })
        ));
    }

    #[test]
    fn test_flag_with_inline_value_is_rejected() {
        let job = RefCell::new(Job::default());
        assert!(matches!(
            configure(&job, &descriptors(), &args(&["--dry-run=yes"])),
            Err(ConfigureError::Option(OptionError::UnexpectedValue { .. }))
        ));
    }
}
