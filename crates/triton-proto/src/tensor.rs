//! Tensor datatypes and the `BYTES` wire layout.
//!
//! Triton serializes each element of a `BYTES` tensor as a 4-byte
//! little-endian length followed by that many bytes, elements back to back.

use thiserror::Error;

/// Tensor element types the adapter sends or expects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datatype {
    Bytes,
    Int32,
    Fp32,
}

impl Datatype {
    /// Name used by the protocol in the `datatype` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Datatype::Bytes => "BYTES",
            Datatype::Int32 => "INT32",
            Datatype::Fp32 => "FP32",
        }
    }
}

impl std::fmt::Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TensorError {
    #[error("truncated BYTES tensor: expected a 4-byte length prefix at offset {offset}")]
    TruncatedLength { offset: usize },

    #[error("truncated BYTES tensor: element at offset {offset} declares {declared} bytes, {available} available")]
    TruncatedElement {
        offset: usize,
        declared: usize,
        available: usize,
    },
}

/// Serialize elements into the raw `BYTES` layout.
pub fn serialize_bytes_tensor<I, B>(elements: I) -> Vec<u8>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut out = Vec::new();
    for element in elements {
        let element = element.as_ref();
        out.extend_from_slice(&(element.len() as u32).to_le_bytes());
        out.extend_from_slice(element);
    }
    out
}

/// Split a raw `BYTES` buffer back into its elements.
pub fn deserialize_bytes_tensor(raw: &[u8]) -> Result<Vec<Vec<u8>>, TensorError> {
    let mut elements = Vec::new();
    let mut offset = 0;
    while offset < raw.len() {
        let header = raw
            .get(offset..offset + 4)
            .ok_or(TensorError::TruncatedLength { offset })?;
        let declared = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let start = offset + 4;
        let element = raw
            .get(start..start + declared)
            .ok_or(TensorError::TruncatedElement {
                offset,
                declared,
                available: raw.len() - start,
            })?;
        elements.push(element.to_vec());
        offset = start + declared;
    }
    Ok(elements)
}
