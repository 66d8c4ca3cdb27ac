// src/lib.rs
// ============================================================================
// NPY2TXT - Exportador de arrays .npy a texto plano
// ============================================================================

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod npy;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-exports principales
pub use config::ConvertConfig;
pub use convert::{convert, ConvertStats};
pub use error::{ExportError, Result};
pub use export::{write_body, write_header, write_export};
pub use npy::{read_array, NpyFile, SourceArray};
