// src/error.rs
// ============================================================================
// ERRORES - Taxonomía de fallos de la exportación
// ============================================================================

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errores de la conversión .npy → texto
#[derive(Debug, Error)]
pub enum ExportError {
    /// El origen no existe, no se puede leer o no es un contenedor .npy válido
    #[error("cannot read source {}: {reason}", .path.display())]
    SourceRead { path: PathBuf, reason: String },

    /// Shape y número de elementos no cuadran
    #[error("format error: {0}")]
    Format(String),

    /// El destino no se puede escribir
    #[error("cannot write destination {}: {source}", .path.display())]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Número de argumentos incorrecto en la CLI
    #[error("usage: {0}")]
    Usage(String),

    /// I/O sin ruta asociada (writers genéricos)
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ExportError {
    pub fn source_read(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SourceRead {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Adjunta la ruta de destino a un fallo de I/O crudo
    pub fn at_destination(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Io(source) => Self::DestinationWrite {
                path: path.into(),
                source,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
