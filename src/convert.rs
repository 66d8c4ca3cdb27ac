// src/convert.rs
// ============================================================================
// CONVERT - Pipeline .npy → texto
// ============================================================================
//
// Lineal: leer → header → body. Sin reintentos ni estado intermedio.
// Con `atomic`, el texto va a un temporal en el mismo directorio y se
// renombra al final; si algo falla el destino no se toca.
//
// ============================================================================

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::config::ConvertConfig;
use crate::error::{ExportError, Result};
use crate::export::write_export;
use crate::npy::{self, ElementKind, SourceArray};

/// Resumen de una conversión
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertStats {
    pub shape: Vec<usize>,
    pub rows: usize,
    pub elements: usize,
    pub kind: ElementKind,
}

impl ConvertStats {
    pub fn rank(&self) -> usize {
        self.shape.len()
    }
}

/// Convierte `config.source` a texto en `config.destination`
pub fn convert(config: &ConvertConfig) -> Result<ConvertStats> {
    let start = Instant::now();

    let array = npy::read_array(&config.source)?;
    debug!(
        "Loaded {} ({}, shape {:?}) in {:.1}ms",
        config.source.display(),
        array.kind,
        array.shape,
        start.elapsed().as_secs_f64() * 1000.0
    );

    let written = if config.atomic {
        write_atomic(&config.destination, &array)
    } else {
        write_direct(&config.destination, &array)
    };
    let rows = written.map_err(|e| e.at_destination(&config.destination))?;

    info!(
        "{} → {}: {} rows x {} ({} elements)",
        config.source.display(),
        config.destination.display(),
        rows,
        array.innermost().unwrap_or(0),
        array.numel()
    );

    Ok(ConvertStats {
        shape: array.shape,
        rows,
        elements: array.elements.len(),
        kind: array.kind,
    })
}

fn write_direct(path: &Path, array: &SourceArray) -> Result<usize> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let rows = write_export(&mut writer, array)?;
    writer.flush()?;
    Ok(rows)
}

fn write_atomic(path: &Path, array: &SourceArray) -> Result<usize> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    let rows = {
        let mut writer = BufWriter::new(&mut tmp);
        let rows = write_export(&mut writer, array)?;
        writer.flush()?;
        rows
    };

    tmp.persist(path).map_err(|e| ExportError::Io(e.error))?;
    debug!("Renamed temporary output into {}", path.display());
    Ok(rows)
}
