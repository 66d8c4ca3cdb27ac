// src/npy/header.rs
// ============================================================================
// NPY HEADER - Preámbulo binario + dict literal de Python
// ============================================================================
//
// Layout:
//   [0..6]   magic "\x93NUMPY"
//   [6]      versión major (1, 2, 3)
//   [7]      versión minor
//   [8..]    longitud del header: u16 LE (v1) o u32 LE (v2/v3)
//   [...]    "{'descr': '<f4', 'fortran_order': False, 'shape': (2, 3), }"
//            rellenado con espacios y terminado en '\n'
//   [...]    datos
//
// ============================================================================

use std::io::Cursor;
use std::sync::LazyLock;

use byteorder::{LittleEndian, ReadBytesExt};
use regex::Regex;

use super::dtype::Dtype;

/// Magic bytes de un .npy
pub const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Tamaño del preámbulo fijo (magic + versión) antes de la longitud
const PREAMBLE_SIZE: usize = 8;

static DESCR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]descr['"]\s*:\s*['"]([^'"]*)['"]"#).unwrap());
static STRUCTURED_DESCR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]descr['"]\s*:\s*\["#).unwrap());
static FORTRAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]fortran_order['"]\s*:\s*(True|False)"#).unwrap());
static SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]shape['"]\s*:\s*\(([^)]*)\)"#).unwrap());

/// Header de un archivo .npy ya parseado
#[derive(Debug, Clone, PartialEq)]
pub struct NpyHeader {
    pub version: (u8, u8),
    pub dtype: Dtype,
    pub fortran_order: bool,
    pub shape: Vec<usize>,
    /// Offset del primer byte de datos
    pub data_offset: usize,
}

impl NpyHeader {
    /// Parsea el header desde el inicio del archivo
    pub fn parse(bytes: &[u8]) -> Result<Self, String> {
        if bytes.len() < PREAMBLE_SIZE || &bytes[..MAGIC.len()] != MAGIC {
            return Err("not an .npy file (bad magic)".to_string());
        }

        let version = (bytes[6], bytes[7]);
        let mut cursor = Cursor::new(&bytes[PREAMBLE_SIZE..]);

        // v1: u16, v2/v3: u32
        let (header_len, len_size) = match version.0 {
            1 => (
                cursor.read_u16::<LittleEndian>().map_err(|_| "truncated header length")? as usize,
                2,
            ),
            2 | 3 => (
                cursor.read_u32::<LittleEndian>().map_err(|_| "truncated header length")? as usize,
                4,
            ),
            major => return Err(format!("unsupported .npy version {}.{}", major, version.1)),
        };

        let dict_start = PREAMBLE_SIZE + len_size;
        let data_offset = dict_start + header_len;
        if bytes.len() < data_offset {
            return Err(format!(
                "truncated header: expected {} bytes, file has {}",
                data_offset,
                bytes.len()
            ));
        }

        // v1/v2 son latin1/ASCII; v3 es UTF-8. Ambos válidos como UTF-8 si son ASCII.
        let dict = std::str::from_utf8(&bytes[dict_start..data_offset])
            .map_err(|_| "header dict is not valid text".to_string())?;

        let (dtype, fortran_order, shape) = parse_dict(dict)?;

        Ok(Self {
            version,
            dtype,
            fortran_order,
            shape,
            data_offset,
        })
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Número total de elementos (None si desborda)
    pub fn numel(&self) -> Option<usize> {
        self.shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// Bytes de datos esperados tras el header
    pub fn data_len(&self) -> Option<usize> {
        self.numel().and_then(|n| self.dtype.data_len(n))
    }
}

fn parse_dict(dict: &str) -> Result<(Dtype, bool, Vec<usize>), String> {
    if STRUCTURED_DESCR_REGEX.is_match(dict) {
        return Err("structured dtypes are not supported".to_string());
    }

    let descr = DESCR_REGEX
        .captures(dict)
        .map(|c| c[1].to_string())
        .ok_or_else(|| "missing required header key: descr".to_string())?;
    let dtype = Dtype::parse(&descr)?;

    let fortran_order = FORTRAN_REGEX
        .captures(dict)
        .map(|c| &c[1] == "True")
        .ok_or_else(|| "missing required header key: fortran_order".to_string())?;

    let shape_src = SHAPE_REGEX
        .captures(dict)
        .map(|c| c[1].to_string())
        .ok_or_else(|| "missing required header key: shape".to_string())?;
    let shape = parse_shape(&shape_src)?;

    Ok((dtype, fortran_order, shape))
}

/// "2, 3" / "4," / "" → dimensiones. Acepta el sufijo 'L' de Python 2.
fn parse_shape(src: &str) -> Result<Vec<usize>, String> {
    src.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.trim_end_matches('L')
                .parse::<usize>()
                .map_err(|_| format!("invalid shape dimension '{}'", s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::npy::dtype::ElementKind;

    fn build(version: u8, dict: &str) -> Vec<u8> {
        let mut bytes = MAGIC.to_vec();
        bytes.push(version);
        bytes.push(0);
        if version == 1 {
            bytes.extend_from_slice(&(dict.len() as u16).to_le_bytes());
        } else {
            bytes.extend_from_slice(&(dict.len() as u32).to_le_bytes());
        }
        bytes.extend_from_slice(dict.as_bytes());
        bytes
    }

    #[test]
    fn test_parse_v1_header() {
        let bytes = build(1, "{'descr': '<f4', 'fortran_order': False, 'shape': (2, 3), }    \n");
        let header = NpyHeader::parse(&bytes).unwrap();

        assert_eq!(header.version, (1, 0));
        assert_eq!(header.dtype.kind, ElementKind::F32);
        assert!(!header.fortran_order);
        assert_eq!(header.shape, vec![2, 3]);
        assert_eq!(header.numel(), Some(6));
        assert_eq!(header.data_len(), Some(24));
        assert_eq!(header.data_offset, bytes.len());
    }

    #[test]
    fn test_parse_v2_header_fortran() {
        let bytes = build(2, "{'descr': '>f8', 'fortran_order': True, 'shape': (4,), }\n");
        let header = NpyHeader::parse(&bytes).unwrap();

        assert_eq!(header.version.0, 2);
        assert!(header.fortran_order);
        assert_eq!(header.shape, vec![4]);
        assert_eq!(header.data_offset, bytes.len());
    }

    #[test]
    fn test_parse_scalar_and_python2_shape() {
        let bytes = build(1, "{'descr': '<i8', 'fortran_order': False, 'shape': (), }\n");
        let header = NpyHeader::parse(&bytes).unwrap();
        assert_eq!(header.rank(), 0);
        assert_eq!(header.numel(), Some(1));

        assert_eq!(parse_shape("3L, 4L").unwrap(), vec![3, 4]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(NpyHeader::parse(b"PK\x03\x04").is_err());

        let bytes = build(4, "{}\n");
        assert!(NpyHeader::parse(&bytes).unwrap_err().contains("version"));

        let bytes = build(1, "{'descr': '<f4', 'shape': (2,), }\n");
        assert!(NpyHeader::parse(&bytes).unwrap_err().contains("fortran_order"));

        let bytes = build(1, "{'descr': [('a', '<f4')], 'fortran_order': False, 'shape': (2,), }\n");
        assert!(NpyHeader::parse(&bytes).unwrap_err().contains("structured"));

        let bytes = build(1, "{'descr': '|O', 'fortran_order': False, 'shape': (2,), }\n");
        assert!(NpyHeader::parse(&bytes).is_err());

        // Longitud declarada mayor que el archivo
        let mut bytes = build(1, "{'descr': '<f4', 'fortran_order': False, 'shape': (2,), }\n");
        bytes.truncate(20);
        assert!(NpyHeader::parse(&bytes).unwrap_err().contains("truncated"));
    }
}
