// src/cli.rs
// ============================================================================
// CLI - Contrato de argumentos de npy2txt
// ============================================================================
//
//   npy2txt                      → origen por defecto, destino .txt derivado
//   npy2txt <npy_path> <txt_path>
//   cualquier otra cantidad      → usage por stdout, sin conversión, exit 2
//
// ============================================================================

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::warn;

use crate::config::ConvertConfig;
use crate::convert::{convert, ConvertStats};
use crate::error::{ExportError, Result};

/// Texto de uso para cantidades de argumentos inválidas
pub const USAGE: &str = "Usage: npy2txt [<npy_path> <txt_path>]";

/// Exit status cuando los argumentos no son válidos
pub const USAGE_EXIT_CODE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "npy2txt")]
#[command(about = "Convert .npy arrays to plain text for native consumers")]
#[command(version)]
pub struct Args {
    /// Either nothing (default paths) or <NPY_PATH> <TXT_PATH>
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Write to a temporary file and rename it on success
    #[arg(long)]
    pub atomic: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resultado de una invocación
#[derive(Debug)]
pub enum Outcome {
    Converted {
        config: ConvertConfig,
        stats: ConvertStats,
    },
    /// Cantidad de argumentos inválida; no se escribió nada
    Usage,
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Converted { .. } => 0,
            Self::Usage => USAGE_EXIT_CODE,
        }
    }
}

/// Resuelve la configuración según la cantidad de rutas posicionales
pub fn resolve_config(paths: &[PathBuf]) -> Result<ConvertConfig> {
    match paths {
        [] => Ok(ConvertConfig::default()),
        [source, destination] => Ok(ConvertConfig::new(source, destination)),
        _ => Err(ExportError::Usage(format!(
            "expected 0 or 2 paths, got {}",
            paths.len()
        ))),
    }
}

/// Ejecuta la CLI escribiendo mensajes de usuario en `out`
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<Outcome> {
    let config = match resolve_config(&args.paths) {
        Ok(config) => config.atomic(args.atomic),
        Err(ExportError::Usage(reason)) => {
            warn!("{}", reason);
            writeln!(out, "{}", USAGE)?;
            return Ok(Outcome::Usage);
        }
        Err(e) => return Err(e),
    };

    let stats = convert(&config)?;
    writeln!(
        out,
        "Converted {} to {}",
        config.source.display(),
        config.destination.display()
    )?;

    Ok(Outcome::Converted { config, stats })
}

/// Inicializa env_logger: RUST_LOG manda; si no, warn (o debug con --verbose)
pub fn init_logging(verbose: bool) {
    if std::env::var("RUST_LOG").is_err() {
        let level = if verbose { "debug" } else { "warn" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    } else {
        env_logger::init();
    }
}
