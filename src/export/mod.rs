// src/export/mod.rs
// ============================================================================
// TEXT EXPORT - Header de dimensiones + filas de la dimensión interna
// ============================================================================
//
// Formato:
//   <rank>
//   <dim_1>
//   ...
//   <dim_rank>
//   v v v ... v      ← una línea por slice de la dimensión más interna
//
// Valores con 6 decimales fijos (equivalente a "%f").
//
// ============================================================================

use std::io::Write;

use crate::error::{ExportError, Result};
use crate::npy::SourceArray;

/// Decimales fijos por valor
pub const PRECISION: usize = 6;

/// Escribe el header: rank y luego cada dimensión, una por línea
pub fn write_header<W: Write>(dest: &mut W, shape: &[usize]) -> Result<()> {
    if shape.is_empty() {
        return Err(ExportError::Format(
            "shape must have at least one dimension".to_string(),
        ));
    }

    writeln!(dest, "{}", shape.len())?;
    for dim in shape {
        writeln!(dest, "{}", dim)?;
    }
    Ok(())
}

/// Escribe los elementos en filas de `innermost` valores. Devuelve las filas escritas.
pub fn write_body<W: Write>(dest: &mut W, elements: &[f64], innermost: usize) -> Result<usize> {
    if innermost == 0 {
        return Err(ExportError::Format(
            "innermost dimension size must be positive".to_string(),
        ));
    }
    if elements.len() % innermost != 0 {
        return Err(ExportError::Format(format!(
            "{} elements do not split into rows of {}",
            elements.len(),
            innermost
        )));
    }

    let mut line = String::with_capacity(innermost * 12);
    let mut rows = 0;
    for row in elements.chunks_exact(innermost) {
        line.clear();
        for (i, &value) in row.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            push_value(&mut line, value);
        }
        line.push('\n');
        dest.write_all(line.as_bytes())?;
        rows += 1;
    }
    Ok(rows)
}

/// Header + body de un array completo
pub fn write_export<W: Write>(dest: &mut W, array: &SourceArray) -> Result<usize> {
    let innermost = array.innermost().ok_or_else(|| {
        ExportError::Format("0-dimensional arrays have no innermost dimension".to_string())
    })?;

    let expected: usize = array.shape.iter().product();
    if expected != array.numel() {
        return Err(ExportError::Format(format!(
            "shape {:?} needs {} elements, array has {}",
            array.shape,
            expected,
            array.numel()
        )));
    }

    write_header(dest, &array.shape)?;
    write_body(dest, &array.elements, innermost)
}

/// Formatea un valor como "%f" (nan/inf como los escribe NumPy)
pub fn format_value(value: f64) -> String {
    let mut s = String::new();
    push_value(&mut s, value);
    s
}

fn push_value(out: &mut String, value: f64) {
    use std::fmt::Write as _;

    if value.is_nan() {
        out.push_str("nan");
    } else if value.is_infinite() {
        out.push_str(if value > 0.0 { "inf" } else { "-inf" });
    } else {
        // write! sobre String no falla
        let _ = write!(out, "{:.*}", PRECISION, value);
    }
}
