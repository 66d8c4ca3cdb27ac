// src/main.rs
// ============================================================================
// NPY2TXT CLI
// ============================================================================
//
// Uso:
//   npy2txt                         (../assets/expected_preprocessed_image.npy)
//   npy2txt input.npy output.txt
//   npy2txt --atomic input.npy output.txt
//
// ============================================================================

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use npy2txt::cli::{self, Args};

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    cli::init_logging(args.verbose);

    let mut stdout = std::io::stdout().lock();
    let outcome = cli::run(&args, &mut stdout).context("Conversion failed")?;

    Ok(ExitCode::from(outcome.exit_code()))
}
