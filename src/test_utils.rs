// src/test_utils.rs
// ============================================================================
// TEST UTILS - Generación de fixtures .npy para los tests
// ============================================================================

use std::path::Path;

use crate::npy::header::MAGIC;

/// Escribe un .npy v1 con descriptor, orden y datos crudos arbitrarios
pub fn write_npy_raw(path: &Path, descr: &str, fortran_order: bool, shape: &[usize], data: &[u8]) {
    let shape_str = match shape.len() {
        1 => format!("({},)", shape[0]),
        _ => format!(
            "({})",
            shape.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(", ")
        ),
    };
    let mut dict = format!(
        "{{'descr': '{}', 'fortran_order': {}, 'shape': {}, }}",
        descr,
        if fortran_order { "True" } else { "False" },
        shape_str
    );

    // magic(6) + versión(2) + len(2) + dict + '\n' alineado a 64
    let unpadded = MAGIC.len() + 2 + 2 + dict.len() + 1;
    let padding = (64 - unpadded % 64) % 64;
    dict.push_str(&" ".repeat(padding));
    dict.push('\n');

    let mut bytes = MAGIC.to_vec();
    bytes.extend_from_slice(&[0x01, 0x00]);
    bytes.extend_from_slice(&(dict.len() as u16).to_le_bytes());
    bytes.extend_from_slice(dict.as_bytes());
    bytes.extend_from_slice(data);

    std::fs::write(path, bytes).unwrap();
}

/// Escribe un .npy '<f8' en orden C
pub fn write_npy_f64(path: &Path, shape: &[usize], values: &[f64]) {
    let data: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    write_npy_raw(path, "<f8", false, shape, &data);
}

/// Escribe un .npy '<f4' en orden C
pub fn write_npy_f32(path: &Path, shape: &[usize], values: &[f32]) {
    let data: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    write_npy_raw(path, "<f4", false, shape, &data);
}
