// src/npy/mod.rs
// ============================================================================
// NPY READER - Lee arrays serializados de NumPy (.npy)
// ============================================================================

pub mod dtype;
pub mod header;

use std::fs::File;
use std::path::{Path, PathBuf};

use log::debug;
use memmap2::Mmap;

use crate::error::{ExportError, Result};

pub use dtype::{Dtype, ElementKind, Endian};
pub use header::NpyHeader;

/// Array N-dimensional ya normalizado a f64 y orden C (row-major)
#[derive(Debug, Clone, PartialEq)]
pub struct SourceArray {
    pub shape: Vec<usize>,
    pub elements: Vec<f64>,
    pub kind: ElementKind,
}

impl SourceArray {
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Tamaño de la dimensión más interna
    pub fn innermost(&self) -> Option<usize> {
        self.shape.last().copied()
    }

    pub fn numel(&self) -> usize {
        self.elements.len()
    }
}

/// Archivo .npy abierto (header parseado + datos mapeados)
pub struct NpyFile {
    pub path: PathBuf,
    pub header: NpyHeader,
    mmap: Mmap,
}

impl NpyFile {
    /// Abre y valida un archivo .npy
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .map_err(|e| ExportError::source_read(&path, e.to_string()))?;

        let mmap = unsafe { Mmap::map(&file) }
            .map_err(|e| ExportError::source_read(&path, e.to_string()))?;

        let header = NpyHeader::parse(&mmap)
            .map_err(|reason| ExportError::source_read(&path, reason))?;

        let data_len = header
            .data_len()
            .ok_or_else(|| ExportError::source_read(&path, "shape overflows"))?;
        let available = mmap.len() - header.data_offset;
        if available < data_len {
            return Err(ExportError::source_read(
                &path,
                format!("truncated data: expected {} bytes, found {}", data_len, available),
            ));
        }

        debug!(
            "{}: npy v{}.{} dtype={} fortran_order={} shape={:?}",
            path.display(),
            header.version.0,
            header.version.1,
            header.dtype,
            header.fortran_order,
            header.shape
        );

        Ok(Self { path, header, mmap })
    }

    /// Bytes de datos (sin trailing)
    pub fn data(&self) -> &[u8] {
        let start = self.header.data_offset;
        // data_len ya validado en open()
        let len = self.header.data_len().unwrap_or(0);
        &self.mmap[start..start + len]
    }

    /// Decodifica a un SourceArray en orden C
    pub fn to_array(&self) -> SourceArray {
        let mut elements = self.header.dtype.decode(self.data());
        if self.header.fortran_order && self.header.rank() > 1 {
            elements = fortran_to_c_order(&elements, &self.header.shape);
        }

        SourceArray {
            shape: self.header.shape.clone(),
            elements,
            kind: self.header.dtype.kind,
        }
    }
}

/// Lee un .npy completo
pub fn read_array(path: impl AsRef<Path>) -> Result<SourceArray> {
    Ok(NpyFile::open(path)?.to_array())
}

/// Reordena datos column-major a row-major
fn fortran_to_c_order(data: &[f64], shape: &[usize]) -> Vec<f64> {
    let rank = shape.len();

    // Strides en orden Fortran: el primer eje varía más rápido
    let mut strides = vec![1usize; rank];
    for k in 1..rank {
        strides[k] = strides[k - 1] * shape[k - 1];
    }

    let mut out = Vec::with_capacity(data.len());
    let mut index = vec![0usize; rank];
    for _ in 0..data.len() {
        let offset: usize = index.iter().zip(&strides).map(|(i, s)| i * s).sum();
        out.push(data[offset]);

        // Incremento en orden C: el último eje varía más rápido
        for k in (0..rank).rev() {
            index[k] += 1;
            if index[k] < shape[k] {
                break;
            }
            index[k] = 0;
        }
    }
    out
}
