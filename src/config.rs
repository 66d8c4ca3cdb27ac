// src/config.rs
// ============================================================================
// CONFIG - Rutas de origen/destino de una conversión
// ============================================================================

use std::path::{Path, PathBuf};

/// Origen por defecto cuando la CLI se invoca sin argumentos
pub const DEFAULT_SOURCE: &str = "../assets/expected_preprocessed_image.npy";

/// Extensión del archivo de texto generado
pub const TEXT_EXTENSION: &str = "txt";

/// Configuración de una conversión
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Escribir a un temporal y renombrar solo si todo sale bien
    pub atomic: bool,
}

impl ConvertConfig {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            atomic: false,
        }
    }

    /// Destino derivado: misma ruta con extensión .txt
    pub fn from_source(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let destination = default_destination(&source);
        Self::new(source, destination)
    }

    pub fn atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::from_source(DEFAULT_SOURCE)
    }
}

/// "dir/a.npy" → "dir/a.txt"
pub fn default_destination(source: &Path) -> PathBuf {
    source.with_extension(TEXT_EXTENSION)
}
