// src/cli.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "dynopts: opciones de tareas con valores dinámicos.", long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Catálogo de tipos a usar (por defecto, DYNOPTS_CATALOG o el del directorio de configuración).
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lista los tipos de tarea del catálogo.
    Types,

    /// Muestra las opciones de un tipo con sus valores disponibles.
    Options { type_name: String },

    /// Imprime los valores disponibles de una opción, uno por línea.
    Values { type_name: String, option: String },

    /// Aplica opciones a una instancia nueva del tipo y muestra sus propiedades.
    Apply {
        type_name: String,

        /// Opciones para la tarea ('--nombre valor', '--nombre=valor', '--flag').
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}
