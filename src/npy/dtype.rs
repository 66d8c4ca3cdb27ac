// src/npy/dtype.rs
// ============================================================================
// DTYPE - Descriptores de tipo de NumPy ('<f4', '|u1', '>i8', ...)
// ============================================================================
//
// Todos los tipos se normalizan a f64 al decodificar: el exporter nunca
// ramifica según el tipo de origen.
//
// ============================================================================

use std::fmt;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Tipo de elemento soportado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F16,
    F32,
    F64,
}

impl ElementKind {
    /// Tamaño en bytes de un elemento
    pub fn item_size(&self) -> usize {
        match self {
            Self::Bool | Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 | Self::F16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::F16 => "float16",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }

    fn from_code(code: char, size: usize) -> Option<Self> {
        let kind = match (code, size) {
            ('b', 1) | ('?', 1) => Self::Bool,
            ('i', 1) => Self::I8,
            ('i', 2) => Self::I16,
            ('i', 4) => Self::I32,
            ('i', 8) => Self::I64,
            ('u', 1) => Self::U8,
            ('u', 2) => Self::U16,
            ('u', 4) => Self::U32,
            ('u', 8) => Self::U64,
            ('f', 2) => Self::F16,
            ('f', 4) => Self::F32,
            ('f', 8) => Self::F64,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Orden de bytes del buffer de datos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
    /// '|' - tipos de un byte
    NotApplicable,
}

impl Endian {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Little),
            '>' => Some(Self::Big),
            '|' => Some(Self::NotApplicable),
            '=' if cfg!(target_endian = "little") => Some(Self::Little),
            '=' => Some(Self::Big),
            _ => None,
        }
    }

    fn as_char(&self) -> char {
        match self {
            Self::Little => '<',
            Self::Big => '>',
            Self::NotApplicable => '|',
        }
    }
}

/// Descriptor completo: tipo + orden de bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dtype {
    pub kind: ElementKind,
    pub endian: Endian,
}

impl Dtype {
    /// Parsea un descriptor simple de NumPy ("<f4", "|b1", ">i8", "=f8")
    pub fn parse(descr: &str) -> Result<Self, String> {
        let mut chars = descr.chars();
        let endian = chars
            .next()
            .and_then(Endian::from_char)
            .ok_or_else(|| format!("unsupported dtype descriptor '{}'", descr))?;
        let code = chars
            .next()
            .ok_or_else(|| format!("unsupported dtype descriptor '{}'", descr))?;
        let size: usize = chars
            .as_str()
            .parse()
            .map_err(|_| format!("unsupported dtype descriptor '{}'", descr))?;

        let kind = ElementKind::from_code(code, size)
            .ok_or_else(|| format!("unsupported dtype descriptor '{}'", descr))?;

        // Multi-byte sin orden explícito no tiene sentido
        if endian == Endian::NotApplicable && size > 1 {
            return Err(format!("dtype '{}' needs an explicit byte order", descr));
        }

        Ok(Self { kind, endian })
    }

    /// Bytes necesarios para `count` elementos
    pub fn data_len(&self, count: usize) -> Option<usize> {
        count.checked_mul(self.kind.item_size())
    }

    /// Decodifica `data` (exactamente count * item_size bytes) a f64
    pub fn decode(&self, data: &[u8]) -> Vec<f64> {
        match self.endian {
            Endian::Big => decode_with::<BigEndian>(self.kind, data),
            Endian::Little | Endian::NotApplicable => decode_with::<LittleEndian>(self.kind, data),
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self.kind {
            ElementKind::Bool => 'b',
            ElementKind::I8 | ElementKind::I16 | ElementKind::I32 | ElementKind::I64 => 'i',
            ElementKind::U8 | ElementKind::U16 | ElementKind::U32 | ElementKind::U64 => 'u',
            ElementKind::F16 | ElementKind::F32 | ElementKind::F64 => 'f',
        };
        write!(f, "{}{}{}", self.endian.as_char(), code, self.kind.item_size())
    }
}

fn decode_with<E: ByteOrder>(kind: ElementKind, data: &[u8]) -> Vec<f64> {
    let size = kind.item_size();
    let chunks = data.chunks_exact(size);

    match kind {
        ElementKind::Bool => chunks.map(|b| if b[0] != 0 { 1.0 } else { 0.0 }).collect(),
        ElementKind::I8 => chunks.map(|b| b[0] as i8 as f64).collect(),
        ElementKind::U8 => chunks.map(|b| b[0] as f64).collect(),
        ElementKind::I16 => chunks.map(|b| E::read_i16(b) as f64).collect(),
        ElementKind::U16 => chunks.map(|b| E::read_u16(b) as f64).collect(),
        ElementKind::I32 => chunks.map(|b| E::read_i32(b) as f64).collect(),
        ElementKind::U32 => chunks.map(|b| E::read_u32(b) as f64).collect(),
        ElementKind::I64 => chunks.map(|b| E::read_i64(b) as f64).collect(),
        ElementKind::U64 => chunks.map(|b| E::read_u64(b) as f64).collect(),
        ElementKind::F16 => chunks
            .map(|b| half::f16::from_bits(E::read_u16(b)).to_f64())
            .collect(),
        ElementKind::F32 => chunks.map(|b| E::read_f32(b) as f64).collect(),
        ElementKind::F64 => chunks.map(E::read_f64).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_descriptors() {
        let d = Dtype::parse("<f4").unwrap();
        assert_eq!(d.kind, ElementKind::F32);
        assert_eq!(d.endian, Endian::Little);

        let d = Dtype::parse(">i8").unwrap();
        assert_eq!(d.kind, ElementKind::I64);
        assert_eq!(d.endian, Endian::Big);

        let d = Dtype::parse("|b1").unwrap();
        assert_eq!(d.kind, ElementKind::Bool);

        let d = Dtype::parse("|u1").unwrap();
        assert_eq!(d.kind, ElementKind::U8);
        assert_eq!(d.to_string(), "|u1");
    }

    #[test]
    fn test_parse_rejects_unsupported() {
        assert!(Dtype::parse("|O").is_err());
        assert!(Dtype::parse("<c8").is_err());
        assert!(Dtype::parse("<U10").is_err());
        assert!(Dtype::parse("|f4").is_err());
        assert!(Dtype::parse("").is_err());
    }

    #[test]
    fn test_decode_little_and_big_endian() {
        let le = Dtype::parse("<f4").unwrap();
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1.5f32.to_le_bytes());
        bytes.extend_from_slice(&(-3.25f32).to_le_bytes());
        assert_eq!(le.decode(&bytes), vec![1.5, -3.25]);

        let be = Dtype::parse(">i2").unwrap();
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(-7i16).to_be_bytes());
        bytes.extend_from_slice(&300i16.to_be_bytes());
        assert_eq!(be.decode(&bytes), vec![-7.0, 300.0]);
    }

    #[test]
    fn test_decode_f16_and_bool() {
        let d = Dtype::parse("<f2").unwrap();
        let bytes = half::f16::from_f32(0.5).to_le_bytes();
        assert_eq!(d.decode(&bytes), vec![0.5]);

        let d = Dtype::parse("|b1").unwrap();
        assert_eq!(d.decode(&[1, 0, 1]), vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_decode_signed_byte() {
        let d = Dtype::parse("|i1").unwrap();
        assert_eq!(d.decode(&[0xFF, 0x7F]), vec![-1.0, 127.0]);
    }
}
