// In: src/result/metadata.rs

//! Query-scoped column metadata: a fixed list of (name, declared type) pairs,
//! addressed by 1-based ordinal and shared by every chunk of the stream.

use arrow_schema::Schema;
use serde::{Deserialize, Serialize};

use crate::error::RowStreamError;
use crate::types::{DeclaredType, EngineType};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    pub name: String,
    pub declared_type: DeclaredType,
}

impl ColumnMeta {
    /// A column whose type is given as the engine's type string.
    pub fn new(name: impl Into<String>, type_name: &str) -> Self {
        Self {
            name: name.into(),
            declared_type: DeclaredType::parse(type_name),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultMetadata {
    columns: Vec<ColumnMeta>,
}

impl ResultMetadata {
    pub fn new(columns: Vec<ColumnMeta>) -> Self {
        Self { columns }
    }

    /// Builds metadata from parallel name and type-name lists.
    pub fn from_names<N, T>(names: &[N], type_names: &[T]) -> Result<Self, RowStreamError>
    where
        N: AsRef<str>,
        T: AsRef<str>,
    {
        if names.len() != type_names.len() {
            return Err(RowStreamError::MalformedChunk(format!(
                "{} column names but {} column types",
                names.len(),
                type_names.len()
            )));
        }
        Ok(Self::new(
            names
                .iter()
                .zip(type_names)
                .map(|(name, ty)| ColumnMeta::new(name.as_ref(), ty.as_ref()))
                .collect(),
        ))
    }

    /// Derives metadata from an Arrow schema. Fields of an Arrow type with no
    /// engine counterpart are kept, declared by their Arrow type name.
    pub fn from_schema(schema: &Schema) -> Self {
        let columns = schema
            .fields()
            .iter()
            .map(|field| {
                let declared_type = match EngineType::from_arrow_type(field.data_type()) {
                    Ok(ty) => DeclaredType::from(ty),
                    Err(_) => DeclaredType::unrecognised(field.data_type().to_string()),
                };
                ColumnMeta {
                    name: field.name().clone(),
                    declared_type,
                }
            })
            .collect();
        Self { columns }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    /// The column at 1-based `ordinal`.
    pub fn column(&self, ordinal: usize) -> Result<&ColumnMeta, RowStreamError> {
        ordinal
            .checked_sub(1)
            .and_then(|idx| self.columns.get(idx))
            .ok_or(RowStreamError::IndexOutOfRange {
                index: ordinal,
                column_count: self.columns.len(),
            })
    }

    pub fn column_name(&self, ordinal: usize) -> Result<&str, RowStreamError> {
        Ok(&self.column(ordinal)?.name)
    }

    pub fn column_type_name(&self, ordinal: usize) -> Result<&str, RowStreamError> {
        Ok(self.column(ordinal)?.declared_type.name())
    }

    pub fn declared_type(&self, ordinal: usize) -> Result<&DeclaredType, RowStreamError> {
        Ok(&self.column(ordinal)?.declared_type)
    }

    /// Linear scan, first exact match wins. Returns the 1-based ordinal.
    pub fn find_column(&self, name: &str) -> Result<usize, RowStreamError> {
        self.columns
            .iter()
            .position(|col| col.name == name)
            .map(|idx| idx + 1)
            .ok_or_else(|| RowStreamError::ColumnNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_schema::{DataType, Field};

    fn sample() -> ResultMetadata {
        ResultMetadata::from_names(&["id", "name", "id"], &["INTEGER", "VARCHAR", "BIGINT"]).unwrap()
    }

    #[test]
    fn test_ordinals_are_one_based() {
        let meta = sample();
        assert_eq!(meta.column_count(), 3);
        assert_eq!(meta.column_name(2).unwrap(), "name");
        assert_eq!(meta.column_type_name(1).unwrap(), "INTEGER");
        assert!(matches!(
            meta.column_name(0),
            Err(RowStreamError::IndexOutOfRange { index: 0, column_count: 3 })
        ));
        assert!(meta.column_name(4).is_err());
    }

    #[test]
    fn test_find_column_first_match_wins() {
        let meta = sample();
        assert_eq!(meta.find_column("id").unwrap(), 1);
        assert_eq!(meta.find_column("name").unwrap(), 2);
        assert!(matches!(
            meta.find_column("ID"),
            Err(RowStreamError::ColumnNotFound(name)) if name == "ID"
        ));
    }

    #[test]
    fn test_unknown_types_are_accepted() {
        let meta = ResultMetadata::from_names(&["m"], &["MAP(VARCHAR, INTEGER)"]).unwrap();
        assert_eq!(meta.declared_type(1).unwrap().engine_type(), None);
        assert!(ResultMetadata::from_names(&["a", "b"], &["INTEGER"]).is_err());
    }

    #[test]
    fn test_from_schema() {
        let schema = Schema::new(vec![
            Field::new("n", DataType::UInt16, true),
            Field::new("s", DataType::Utf8, false),
            Field::new("l", DataType::new_list(DataType::Int32, true), true),
        ]);
        let meta = ResultMetadata::from_schema(&schema);
        assert_eq!(meta.column_type_name(1).unwrap(), "USMALLINT");
        assert_eq!(meta.column_type_name(2).unwrap(), "VARCHAR");
        assert_eq!(meta.declared_type(3).unwrap().engine_type(), None);
        assert!(meta.column_type_name(3).unwrap().starts_with("List"));
    }

    #[test]
    fn test_serde_round_trip() {
        let meta = sample();
        let json = serde_json::to_string(&meta).unwrap();
        let back: ResultMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }
}
