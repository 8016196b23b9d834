//! Parsers for the precomputed artifacts.
//!
//! - movies.json: `[{"title": ..., "genres": ..., "overview": ...}, ...]`
//! - similarity.json: `[[f64; N]; N]`
//! - similarity.bin: N*N little-endian f64 values, row-major
//!
//! The binary matrix carries no header; its side length is recovered from
//! the byte count and checked against the catalog later.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Width of one matrix entry in the binary format
const F64_BYTES: usize = std::mem::size_of::<f64>();

/// Matrix serialization, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixFormat {
    Json,
    Binary,
}

impl MatrixFormat {
    /// `.bin` means binary, anything else is treated as JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("bin") => MatrixFormat::Binary,
            _ => MatrixFormat::Json,
        }
    }
}

/// Read a whole file, mapping a missing file to `FileNotFound`
fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the catalog file
pub fn parse_catalog(path: &Path) -> Result<Vec<MovieRecord>> {
    let bytes = read_bytes(path)?;
    parse_catalog_slice(&bytes).map_err(|e| match e {
        DataLoadError::Json(err) => DataLoadError::ParseError {
            file: file_name(path),
            reason: err.to_string(),
        },
        other => other,
    })
}

/// Parse catalog JSON from memory
pub fn parse_catalog_slice(bytes: &[u8]) -> Result<Vec<MovieRecord>> {
    let records: Vec<MovieRecord> = serde_json::from_slice(bytes)?;
    Ok(records)
}

/// Parse a matrix in whichever format its extension says
pub fn parse_matrix(path: &Path) -> Result<SimilarityMatrix> {
    match MatrixFormat::from_path(path) {
        MatrixFormat::Json => parse_matrix_json(path),
        MatrixFormat::Binary => parse_matrix_bin(path),
    }
}

/// Parse a JSON array-of-rows matrix
pub fn parse_matrix_json(path: &Path) -> Result<SimilarityMatrix> {
    let bytes = read_bytes(path)?;
    let rows: Vec<Vec<f64>> = serde_json::from_slice(&bytes).map_err(|e| {
        DataLoadError::ParseError {
            file: file_name(path),
            reason: e.to_string(),
        }
    })?;
    SimilarityMatrix::from_rows(rows)
}

/// Parse a raw little-endian f64 square matrix
pub fn parse_matrix_bin(path: &Path) -> Result<SimilarityMatrix> {
    let bytes = read_bytes(path)?;
    decode_matrix_bin(&bytes).map_err(|e| match e {
        DataLoadError::ValidationError(reason) => DataLoadError::ParseError {
            file: file_name(path),
            reason,
        },
        other => other,
    })
}

/// Decode the binary matrix format from memory
pub fn decode_matrix_bin(bytes: &[u8]) -> Result<SimilarityMatrix> {
    if bytes.len() % F64_BYTES != 0 {
        return Err(DataLoadError::ValidationError(format!(
            "{} bytes is not a whole number of f64 values",
            bytes.len()
        )));
    }
    let count = bytes.len() / F64_BYTES;
    let size = square_side(count).ok_or_else(|| {
        DataLoadError::ValidationError(format!("{} values do not form a square matrix", count))
    })?;

    let values = bytes
        .chunks_exact(F64_BYTES)
        .map(|chunk| {
            let mut buf = [0u8; F64_BYTES];
            buf.copy_from_slice(chunk);
            f64::from_le_bytes(buf)
        })
        .collect();

    SimilarityMatrix::from_flat(size, values)
}

/// Side length of a square with `count` cells, if there is one
fn square_side(count: usize) -> Option<usize> {
    let side = (count as f64).sqrt().round() as usize;
    (side * side == count).then_some(side)
}

/// Encode a matrix in the binary format (inverse of [`decode_matrix_bin`])
pub fn encode_matrix_bin(matrix: &SimilarityMatrix) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(matrix.size() * matrix.size() * F64_BYTES);
    for row in matrix.rows() {
        for value in row {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
    }
    bytes
}
