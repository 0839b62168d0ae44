// src/bin/dynopts.rs

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::cell::RefCell;
use std::path::PathBuf;

use dynopts::cli::{Cli, Command};
use dynopts::config;
use dynopts::core::catalog::{Catalog, Task};
use dynopts::core::{configurer, help};
use dynopts::options::{InstanceOptionDescriptor, OptionDescriptor};

/// El punto de entrada principal de la aplicación.
fn main() {
    // Inicializar el logger. Para ver los logs, ejecuta con `RUST_LOG=debug dynopts ...`
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run_cli(cli) {
        eprintln!("\nError: {:?}", e);
        std::process::exit(1);
    }
}

/// El despachador principal de la aplicación.
fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let catalog = load_catalog(cli.catalog)?;

    match cli.command {
        Command::Types => handle_types(&catalog),
        Command::Options { type_name } => handle_options(&catalog, &type_name),
        Command::Values { type_name, option } => handle_values(&catalog, &type_name, &option),
        Command::Apply { type_name, args } => handle_apply(&catalog, &type_name, &args),
    }
}

fn load_catalog(explicit: Option<PathBuf>) -> Result<Catalog> {
    let path = config::resolve_catalog_path(explicit)?;
    Catalog::load(&path)
        .with_context(|| format!("No se pudo cargar el catálogo '{}'", path.display()))
}

/// Muestra los tipos del catálogo con su descripción y su padre.
fn handle_types(catalog: &Catalog) -> Result<()> {
    let mut empty = true;
    for name in catalog.type_names() {
        empty = false;
        let Some(def) = catalog.get(name) else { continue };
        let parent = def
            .extends
            .as_deref()
            .map(|p| format!(" (extiende '{}')", p))
            .unwrap_or_default();
        match &def.description {
            Some(d) => println!("  {}{} : {}", name, parent, d),
            None => println!("  {}{}", name, parent),
        }
    }
    if empty {
        println!("El catálogo no define ningún tipo.");
    }
    Ok(())
}

fn handle_options(catalog: &Catalog, type_name: &str) -> Result<()> {
    let task = catalog.instantiate(type_name)?;
    let descriptors = task.option_descriptors();
    let target = RefCell::new(task);

    let bound: Vec<_> = descriptors
        .iter()
        .map(|d| InstanceOptionDescriptor::new(&target, d))
        .collect();

    println!("\n--- Opciones de '{}' ---", type_name);
    print!("{}", help::render_options::<Task, _>(&bound)?);
    Ok(())
}

/// Imprime un valor por línea, pensado para el autocompletado.
fn handle_values(catalog: &Catalog, type_name: &str, option: &str) -> Result<()> {
    let task = catalog.instantiate(type_name)?;
    let descriptors = task.option_descriptors();
    let target = RefCell::new(task);

    let descriptor = descriptors
        .iter()
        .find(|d| d.name() == option)
        .ok_or_else(|| anyhow!("El tipo '{}' no tiene la opción '--{}'.", type_name, option))?;

    for value in InstanceOptionDescriptor::new(&target, descriptor).available_values()? {
        println!("{}", value);
    }
    Ok(())
}

fn handle_apply(catalog: &Catalog, type_name: &str, args: &[String]) -> Result<()> {
    let task = catalog.instantiate(type_name)?;
    let descriptors = task.option_descriptors();
    let target = RefCell::new(task);

    let applied = configurer::configure(&target, &descriptors, args)
        .with_context(|| format!("No se pudieron aplicar las opciones a '{}'", type_name))?;
    log::debug!("Opciones aplicadas: {:?}", applied);

    let task = target.into_inner();
    println!("\n--- Propiedades de {} ---", task);
    for (key, values) in task.properties() {
        println!("  {} = {:?}", key, values);
    }
    Ok(())
}
