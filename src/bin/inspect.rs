// src/bin/inspect.rs
// ============================================================================
// NPY INSPECTOR - Muestra el header de un .npy sin convertirlo
// ============================================================================
//
// Uso: npy-inspect archivo.npy [--preview 5]
//
// ============================================================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use npy2txt::export::{write_body, write_header};
use npy2txt::npy::{Endian, NpyFile};

#[derive(Parser)]
#[command(name = "npy-inspect")]
#[command(about = "Inspect .npy header and export layout")]
struct Args {
    /// NPY file to inspect
    file: PathBuf,

    /// Show the first N text rows as npy2txt would write them
    #[arg(long, value_name = "ROWS")]
    preview: Option<usize>,
}

fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.1} KB", size as f64 / 1024.0)
    } else if size < 1024 * 1024 * 1024 {
        format!("{:.1} MB", size as f64 / 1024.0 / 1024.0)
    } else {
        format!("{:.2} GB", size as f64 / 1024.0 / 1024.0 / 1024.0)
    }
}

fn endian_name(endian: Endian) -> &'static str {
    match endian {
        Endian::Little => "little",
        Endian::Big => "big",
        Endian::NotApplicable => "n/a",
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    npy2txt::cli::init_logging(false);

    let file_size = std::fs::metadata(&args.file)
        .with_context(|| format!("Cannot stat {}", args.file.display()))?
        .len();
    let npy = NpyFile::open(&args.file)?;
    let header = &npy.header;

    let numel = header.numel().unwrap_or(0);
    let data_len = header.data_len().unwrap_or(0) as u64;
    let trailing = file_size.saturating_sub(header.data_offset as u64 + data_len);

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  NPY INSPECTOR");
    println!("═══════════════════════════════════════════════════════════════");
    println!("  File:          {}", args.file.display());
    println!("  Size:          {}", format_size(file_size));
    println!("  Version:       {}.{}", header.version.0, header.version.1);
    println!("  Descr:         {}", header.dtype);
    println!("  Element kind:  {}", header.dtype.kind);
    println!("  Byte order:    {}", endian_name(header.dtype.endian));
    println!("  Fortran order: {}", header.fortran_order);
    println!("  Rank:          {}", header.rank());
    println!("  Shape:         {:?}", header.shape);
    println!("  Elements:      {}", numel);
    println!("  Data offset:   {}", header.data_offset);
    println!("  Data size:     {}", format_size(data_len));
    if trailing > 0 {
        println!("  Trailing:      {} (ignored)", format_size(trailing));
    }

    match header.shape.last() {
        Some(&innermost) if innermost > 0 => {
            println!("  Text rows:     {} x {}", numel / innermost, innermost);
        }
        _ => println!("  Text rows:     ✗ not exportable (no innermost dimension)"),
    }
    println!("═══════════════════════════════════════════════════════════════");

    if let (Some(rows), Some(&innermost)) = (args.preview, header.shape.last()) {
        if innermost > 0 {
            let array = npy.to_array();
            let take = (rows * innermost).min(array.elements.len());

            let mut out = Vec::new();
            write_header(&mut out, &array.shape)?;
            write_body(&mut out, &array.elements[..take], innermost)?;

            println!();
            print!("{}", String::from_utf8_lossy(&out));
            if take < array.elements.len() {
                println!("...");
            }
        }
    }

    Ok(())
}
