//! Decoders for variable-length columns. Text is borrowed straight out of the
//! chunk's value arena; BLOBs share the arena's byte region.

use std::sync::Arc;

use crate::decoder::Decoded;
use crate::error::RowStreamError;
use crate::types::{Blob, EngineType};
use crate::vector::{ColumnVector, VarValue};

/// The text of any textual column (VARCHAR and the temporal/interval types,
/// which the engine delivers as text).
pub fn textual_cell(column: &ColumnVector, row: usize) -> Result<&str, RowStreamError> {
    match column.var_value(row)? {
        Some(VarValue::Text(text)) => Ok(&text[..]),
        Some(VarValue::Bytes(_)) => Err(RowStreamError::MalformedChunk(format!(
            "{} column holds bytes at row {}",
            column.declared(),
            row
        ))),
        None => Err(RowStreamError::MalformedChunk(format!(
            "{} column has no value at non-null row {}",
            column.declared(),
            row
        ))),
    }
}

/// String fast path: only VARCHAR is returned as-is.
pub fn decode_text(column: &ColumnVector, row: usize) -> Result<Decoded<&str>, RowStreamError> {
    Ok(match column.declared().require()? {
        EngineType::Varchar => Decoded::Native(textual_cell(column, row)?),
        _ => Decoded::Foreign,
    })
}

pub fn decode_blob(column: &ColumnVector, row: usize) -> Result<Decoded<Blob>, RowStreamError> {
    if column.declared().require()? != EngineType::Blob {
        return Ok(Decoded::Foreign);
    }
    match column.var_value(row)? {
        Some(VarValue::Bytes(bytes)) => Ok(Decoded::Native(Blob::new(Arc::clone(bytes)))),
        _ => Err(RowStreamError::MalformedChunk(format!(
            "BLOB column has no byte region at non-null row {}",
            row
        ))),
    }
}
