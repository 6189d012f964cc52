//! One column's data for one chunk.

use bytemuck::Pod;
use std::sync::Arc;

use crate::error::RowStreamError;
use crate::null_handling::NullIndicator;
use crate::types::{DeclaredType, EngineType, Layout};

/// One boxed cell of a variable-length column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarValue {
    Text(Box<str>),
    Bytes(Arc<[u8]>),
}

/// The storage of a column. Exactly one representation is populated, and the
/// declared type alone decides which.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnData {
    /// `row_count * width` little-endian bytes.
    Fixed { width: usize, bytes: Vec<u8> },
    /// The per-row value arena; `None` at rows flagged null.
    Variable(Vec<Option<VarValue>>),
    /// A column of a type this crate does not recognise. Only the null
    /// indicator is meaningful.
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnVector {
    declared: DeclaredType,
    nulls: NullIndicator,
    data: ColumnData,
}

impl ColumnVector {
    /// Assembles a column, checking that the representation matches the declared
    /// type and that every length agrees with the null indicator's row count.
    pub fn new(
        declared: DeclaredType,
        nulls: NullIndicator,
        data: ColumnData,
    ) -> Result<Self, RowStreamError> {
        let rows = nulls.len();
        match (declared.engine_type().map(|t| t.layout()), &data) {
            (Some(Layout::Fixed(expected)), ColumnData::Fixed { width, bytes }) => {
                if *width != expected {
                    return Err(RowStreamError::MalformedChunk(format!(
                        "{} column declared width {} but type width is {}",
                        declared, width, expected
                    )));
                }
                if bytes.len() != rows * width {
                    return Err(RowStreamError::MalformedChunk(format!(
                        "{} column has {} bytes for {} rows of width {}",
                        declared,
                        bytes.len(),
                        rows,
                        width
                    )));
                }
            }
            (Some(Layout::Variable), ColumnData::Variable(values)) => {
                if values.len() != rows {
                    return Err(RowStreamError::MalformedChunk(format!(
                        "{} column has {} values for {} rows",
                        declared,
                        values.len(),
                        rows
                    )));
                }
            }
            (None, ColumnData::Opaque) => {}
            (_, data) => {
                return Err(RowStreamError::MalformedChunk(format!(
                    "{} column cannot be stored as {}",
                    declared,
                    representation_name(data)
                )));
            }
        }
        Ok(Self {
            declared,
            nulls,
            data,
        })
    }

    /// Builds a fixed-width column from typed values. `None` rows are zeroed
    /// and flagged null.
    pub fn from_values<T: Pod + Default>(
        engine_type: EngineType,
        values: &[Option<T>],
    ) -> Result<Self, RowStreamError> {
        let flags: Vec<bool> = values.iter().map(Option::is_none).collect();
        let dense: Vec<T> = values.iter().map(|v| v.unwrap_or_default()).collect();
        let bytes = bytemuck::cast_slice(&dense).to_vec();
        Self::new(
            engine_type.into(),
            NullIndicator::from_flags(&flags),
            ColumnData::Fixed {
                width: std::mem::size_of::<T>(),
                bytes,
            },
        )
    }

    /// Builds a textual column (VARCHAR, DATE, TIME, TIMESTAMP, INTERVAL).
    pub fn from_text<S: AsRef<str>>(
        engine_type: EngineType,
        values: &[Option<S>],
    ) -> Result<Self, RowStreamError> {
        let flags: Vec<bool> = values.iter().map(Option::is_none).collect();
        let arena = values
            .iter()
            .map(|v| v.as_ref().map(|s| VarValue::Text(Box::from(AsRef::<str>::as_ref(s)))))
            .collect();
        Self::new(
            engine_type.into(),
            NullIndicator::from_flags(&flags),
            ColumnData::Variable(arena),
        )
    }

    /// Builds a BLOB column.
    pub fn from_bytes<B: AsRef<[u8]>>(values: &[Option<B>]) -> Result<Self, RowStreamError> {
        let flags: Vec<bool> = values.iter().map(Option::is_none).collect();
        let arena = values
            .iter()
            .map(|v| v.as_ref().map(|b| VarValue::Bytes(Arc::from(AsRef::<[u8]>::as_ref(b)))))
            .collect();
        Self::new(
            EngineType::Blob.into(),
            NullIndicator::from_flags(&flags),
            ColumnData::Variable(arena),
        )
    }

    /// A column of an unrecognised type.
    pub fn opaque(type_name: impl Into<String>, nulls: NullIndicator) -> Self {
        Self {
            declared: DeclaredType::unrecognised(type_name),
            nulls,
            data: ColumnData::Opaque,
        }
    }

    pub fn declared(&self) -> &DeclaredType {
        &self.declared
    }

    pub fn row_count(&self) -> usize {
        self.nulls.len()
    }

    pub fn is_null(&self, row: usize) -> bool {
        self.nulls.is_null(row)
    }

    pub fn nulls(&self) -> &NullIndicator {
        &self.nulls
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// The fixed-width byte region, if this is a fixed-width column.
    pub fn fixed_bytes(&self) -> Option<&[u8]> {
        match &self.data {
            ColumnData::Fixed { bytes, .. } => Some(bytes),
            _ => None,
        }
    }

    /// The boxed value at `row`, if this is a variable-length column.
    pub fn var_value(&self, row: usize) -> Result<Option<&VarValue>, RowStreamError> {
        match &self.data {
            ColumnData::Variable(values) => values.get(row).map(Option::as_ref).ok_or_else(|| {
                RowStreamError::MalformedChunk(format!(
                    "row {} past the end of a {}-row {} column",
                    row,
                    values.len(),
                    self.declared
                ))
            }),
            other => Err(RowStreamError::MalformedChunk(format!(
                "{} column is stored as {}, not as variable-length values",
                self.declared,
                representation_name(other)
            ))),
        }
    }
}

fn representation_name(data: &ColumnData) -> &'static str {
    match data {
        ColumnData::Fixed { .. } => "fixed-width bytes",
        ColumnData::Variable(_) => "variable-length values",
        ColumnData::Opaque => "an opaque column",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_lays_out_little_endian_rows() {
        let col = ColumnVector::from_values::<i32>(EngineType::Integer, &[Some(1), None, Some(-1)])
            .unwrap();
        assert_eq!(col.row_count(), 3);
        assert!(col.is_null(1));
        let bytes = col.fixed_bytes().unwrap();
        assert_eq!(&bytes[0..4], &1i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &(-1i32).to_le_bytes());
    }

    #[test]
    fn test_width_mismatch_is_rejected() {
        let result = ColumnVector::from_values::<i64>(EngineType::Integer, &[Some(1)]);
        assert!(matches!(result, Err(RowStreamError::MalformedChunk(_))));
    }

    #[test]
    fn test_byte_count_must_match_rows() {
        let result = ColumnVector::new(
            EngineType::SmallInt.into(),
            NullIndicator::all_valid(3),
            ColumnData::Fixed {
                width: 2,
                bytes: vec![0; 4],
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_representation_follows_declared_type() {
        let result = ColumnVector::new(
            EngineType::Varchar.into(),
            NullIndicator::all_valid(1),
            ColumnData::Fixed {
                width: 1,
                bytes: vec![0],
            },
        );
        assert!(result.is_err());

        let result = ColumnVector::new(
            EngineType::Integer.into(),
            NullIndicator::all_valid(0),
            ColumnData::Variable(vec![]),
        );
        assert!(result.is_err());

        let result = ColumnVector::new(
            EngineType::Blob.into(),
            NullIndicator::all_valid(0),
            ColumnData::Opaque,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_var_values() {
        let col = ColumnVector::from_text(EngineType::Varchar, &[Some("a"), None]).unwrap();
        assert_eq!(col.var_value(0).unwrap(), Some(&VarValue::Text("a".into())));
        assert_eq!(col.var_value(1).unwrap(), None);
        assert!(col.var_value(2).is_err());
        assert!(col.fixed_bytes().is_none());

        let col = ColumnVector::from_bytes(&[Some(vec![1u8, 2])]).unwrap();
        assert!(matches!(col.var_value(0).unwrap(), Some(VarValue::Bytes(b)) if &b[..] == [1, 2]));
    }

    #[test]
    fn test_opaque_column_keeps_type_name() {
        let col = ColumnVector::opaque("LIST", NullIndicator::from_flags(&[false, true]));
        assert_eq!(col.declared().name(), "LIST");
        assert_eq!(col.row_count(), 2);
        assert!(col.var_value(0).is_err());
    }
}
