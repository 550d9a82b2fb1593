//! Record mapping
//!
//! A [`RecordMapper`] turns a row into a typed record and writes a record
//! back into a row. [`RecordDescriptor`] is the stock mapper: a table of
//! named fields registered once per record type.
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Person {
//!     name: String,
//!     height: f32,
//! }
//!
//! let people = RecordDescriptor::<Person>::new()
//!     .field("Name", |p| p.name.clone(), |p, v| p.name = v)
//!     .field("Height", |p| p.height, |p, v| p.height = v);
//!
//! let doc = CsvReader::new(CsvOptions::default())
//!     .unwrap()
//!     .parse_str("Height,Name\n1.76,Mario")
//!     .unwrap();
//! let records = doc.map_records(&people).unwrap();
//!
//! assert_eq!(records, vec![Person { name: "Mario".into(), height: 1.76 }]);
//! ```

use std::fmt;

use chrono::NaiveDateTime;
use tessera_core::{Cell, CellEnum, CellMut, Document, Row, RowMut};
use thiserror::Error;

/// Result type for mapping operations
pub type MappingResult<T> = std::result::Result<T, MappingError>;

/// Errors raised while mapping rows to records
#[derive(Debug, Error)]
pub enum MappingError {
    /// A cell could not be converted into the field's type
    #[error("row {row}: field '{field}' could not be mapped: {source}")]
    Field {
        row: usize,
        field: String,
        #[source]
        source: tessera_core::Error,
    },

    /// A mapper rejected the row as a whole
    #[error("row {row} could not be mapped: {message}")]
    Row { row: usize, message: String },

    /// The document refused a structural access
    #[error(transparent)]
    Document(#[from] tessera_core::Error),
}

impl MappingError {
    /// Reject a row with a message
    pub fn row<S: Into<String>>(row: usize, message: S) -> Self {
        MappingError::Row {
            row,
            message: message.into(),
        }
    }
}

/// Conversion between a row and a record of type `T`
pub trait RecordMapper<T> {
    /// Build a record from a row
    fn try_map(&self, row: &Row<'_>) -> MappingResult<T>;

    /// Write a record's values into a row
    fn try_unmap(&self, record: &T, row: &mut RowMut<'_>) -> MappingResult<()>;
}

/// A value type a record field can hold
pub trait FieldValue: Sized {
    fn read(cell: &Cell<'_>) -> tessera_core::Result<Self>;
    fn write(&self, cell: &mut CellMut<'_>) -> tessera_core::Result<()>;
}

impl FieldValue for String {
    fn read(cell: &Cell<'_>) -> tessera_core::Result<Self> {
        Ok(cell.string_value().to_string())
    }

    fn write(&self, cell: &mut CellMut<'_>) -> tessera_core::Result<()> {
        cell.set_string_value(self.as_str());
        Ok(())
    }
}

impl FieldValue for i32 {
    fn read(cell: &Cell<'_>) -> tessera_core::Result<Self> {
        cell.int_value()
    }

    fn write(&self, cell: &mut CellMut<'_>) -> tessera_core::Result<()> {
        cell.set_int_value(*self);
        Ok(())
    }
}

impl FieldValue for i64 {
    fn read(cell: &Cell<'_>) -> tessera_core::Result<Self> {
        cell.long_value()
    }

    fn write(&self, cell: &mut CellMut<'_>) -> tessera_core::Result<()> {
        cell.set_long_value(*self);
        Ok(())
    }
}

impl FieldValue for f32 {
    fn read(cell: &Cell<'_>) -> tessera_core::Result<Self> {
        cell.float_value()
    }

    fn write(&self, cell: &mut CellMut<'_>) -> tessera_core::Result<()> {
        cell.set_float_value(*self);
        Ok(())
    }
}

impl FieldValue for f64 {
    fn read(cell: &Cell<'_>) -> tessera_core::Result<Self> {
        cell.double_value()
    }

    fn write(&self, cell: &mut CellMut<'_>) -> tessera_core::Result<()> {
        cell.set_double_value(*self);
        Ok(())
    }
}

impl FieldValue for NaiveDateTime {
    fn read(cell: &Cell<'_>) -> tessera_core::Result<Self> {
        cell.date_time_value()
    }

    fn write(&self, cell: &mut CellMut<'_>) -> tessera_core::Result<()> {
        cell.set_date_time_value(*self);
        Ok(())
    }
}

type ReadFn<T> = Box<dyn Fn(&mut T, &Cell<'_>) -> tessera_core::Result<()>>;
type WriteFn<T> = Box<dyn Fn(&T, &mut CellMut<'_>) -> tessera_core::Result<()>>;

struct FieldBinding<T> {
    name: String,
    alias: Option<String>,
    read: ReadFn<T>,
    write: WriteFn<T>,
}

impl<T> FieldBinding<T> {
    fn matches(&self, header: &str) -> bool {
        self.alias.as_deref() == Some(header) || self.name == header
    }
}

/// Registered field table for a record type.
///
/// Columns are bound to fields in two passes: first every headed column
/// whose header equals a field's alias or name, then the remaining columns
/// take the remaining fields in declaration order.
pub struct RecordDescriptor<T> {
    fields: Vec<FieldBinding<T>>,
}

impl<T: Default + 'static> RecordDescriptor<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Register a field
    pub fn field<V: FieldValue + 'static>(
        mut self,
        name: &str,
        get: fn(&T) -> V,
        set: fn(&mut T, V),
    ) -> Self {
        self.fields.push(FieldBinding {
            name: name.to_string(),
            alias: None,
            read: Box::new(move |record: &mut T, cell: &Cell<'_>| {
                set(record, V::read(cell)?);
                Ok(())
            }),
            write: Box::new(move |record: &T, cell: &mut CellMut<'_>| get(record).write(cell)),
        });
        self
    }

    /// Register a field holding an enumeration stored by variant name
    pub fn enum_field<E: CellEnum>(
        mut self,
        name: &str,
        get: fn(&T) -> E,
        set: fn(&mut T, E),
    ) -> Self {
        self.fields.push(FieldBinding {
            name: name.to_string(),
            alias: None,
            read: Box::new(move |record: &mut T, cell: &Cell<'_>| {
                set(record, cell.enum_value::<E>()?);
                Ok(())
            }),
            write: Box::new(move |record: &T, cell: &mut CellMut<'_>| {
                cell.set_enum_value(get(record))
            }),
        });
        self
    }

    /// Give the most recently registered field a header alias.
    ///
    /// The alias is tried before the field name when binding headers.
    pub fn with_alias(mut self, alias: &str) -> Self {
        if let Some(field) = self.fields.last_mut() {
            field.alias = Some(alias.to_string());
        }
        self
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Pair columns with fields; `bindings[c]` is the field bound to column `c`
    fn bind(&self, doc: &Document) -> Vec<Option<usize>> {
        let mut bindings = vec![None; doc.columns_count()];
        let mut taken = vec![false; self.fields.len()];

        for column in doc.columns() {
            if !column.has_header() {
                continue;
            }
            let header = column.header();
            let found = self
                .fields
                .iter()
                .enumerate()
                .find(|(i, f)| !taken[*i] && f.alias.as_deref() == Some(header))
                .or_else(|| {
                    self.fields
                        .iter()
                        .enumerate()
                        .find(|(i, f)| !taken[*i] && f.matches(header))
                });
            if let Some((field, _)) = found {
                taken[field] = true;
                bindings[column.index()] = Some(field);
            }
        }

        for binding in bindings.iter_mut().filter(|b| b.is_none()) {
            match taken.iter().position(|t| !t) {
                Some(field) => {
                    taken[field] = true;
                    *binding = Some(field);
                }
                None => break,
            }
        }

        bindings
    }
}

impl<T: Default + 'static> Default for RecordDescriptor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default + 'static> RecordMapper<T> for RecordDescriptor<T> {
    fn try_map(&self, row: &Row<'_>) -> MappingResult<T> {
        let mut record = T::default();
        for (column, field) in self.bind(row.document()).into_iter().enumerate() {
            let Some(field) = field.map(|f| &self.fields[f]) else {
                continue;
            };
            let cell = row.cell(column)?;
            (field.read)(&mut record, &cell).map_err(|source| MappingError::Field {
                row: row.index(),
                field: field.name.clone(),
                source,
            })?;
        }
        Ok(record)
    }

    fn try_unmap(&self, record: &T, row: &mut RowMut<'_>) -> MappingResult<()> {
        let bindings = self.bind(row.as_row().document());
        let index = row.index();
        for (column, field) in bindings.into_iter().enumerate() {
            let Some(field) = field.map(|f| &self.fields[f]) else {
                continue;
            };
            let mut cell = row.cell_mut(column)?;
            (field.write)(record, &mut cell).map_err(|source| MappingError::Field {
                row: index,
                field: field.name.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

impl<T> fmt::Debug for RecordDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|field| (&field.name, &field.alias)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Rank {
        Count,
        Baron,
    }

    impl CellEnum for Rank {
        const VARIANTS: &'static [(&'static str, Self)] =
            &[("Count", Rank::Count), ("Baron", Rank::Baron)];
    }

    #[derive(Debug, Default, PartialEq)]
    struct Noble {
        name: String,
        age: i32,
        rank: Option<Rank>,
    }

    fn descriptor() -> RecordDescriptor<Noble> {
        RecordDescriptor::new()
            .field("name", |n: &Noble| n.name.clone(), |n, v| n.name = v)
            .with_alias("Name")
            .field("age", |n: &Noble| n.age, |n, v| n.age = v)
            .enum_field(
                "rank",
                |n: &Noble| n.rank.unwrap_or(Rank::Baron),
                |n, v| n.rank = Some(v),
            )
    }

    fn document(headers: &[Option<&str>], rows: &[&[&str]]) -> Document {
        let mut doc = Document::new();
        for header in headers {
            doc.create_column(*header).unwrap();
        }
        for row in rows {
            doc.append_record(row.iter().copied()).unwrap();
        }
        doc
    }

    #[test]
    fn test_headers_bind_by_alias_and_name() {
        let doc = document(
            &[Some("rank"), Some("age"), Some("Name")],
            &[&["count", "51", "Ferdinand"]],
        );
        let noble = descriptor().try_map(&doc.row_at(0).unwrap()).unwrap();
        assert_eq!(
            noble,
            Noble {
                name: "Ferdinand".into(),
                age: 51,
                rank: Some(Rank::Count),
            }
        );
    }

    #[test]
    fn test_unmatched_columns_bind_in_declaration_order() {
        let doc = document(&[None, None, Some("age")], &[&["Otto", "Baron", "40"]]);
        let noble = descriptor().try_map(&doc.row_at(0).unwrap()).unwrap();
        assert_eq!(noble.name, "Otto");
        assert_eq!(noble.age, 40);
        assert_eq!(noble.rank, Some(Rank::Baron));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let doc = document(&[], &[&["Otto", "40", "Baron", "extra"]]);
        let noble = descriptor().try_map(&doc.row_at(0).unwrap()).unwrap();
        assert_eq!(noble.rank, Some(Rank::Baron));
    }

    #[test]
    fn test_bad_value_names_the_field() {
        let doc = document(&[Some("Name"), Some("age")], &[&["Otto", "old"]]);
        let err = descriptor().try_map(&doc.row_at(0).unwrap()).unwrap_err();
        match err {
            MappingError::Field { row, field, .. } => {
                assert_eq!(row, 0);
                assert_eq!(field, "age");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unmap_writes_bound_columns() {
        let mut doc = document(&[Some("age"), Some("Name"), Some("rank")], &[&["", "", ""]]);
        let noble = Noble {
            name: "Clara".into(),
            age: 33,
            rank: Some(Rank::Count),
        };
        let mut row = doc.row_at_mut(0).unwrap();
        descriptor().try_unmap(&noble, &mut row).unwrap();

        assert_eq!(doc.row_at(0).unwrap().values(), vec!["33", "Clara", "Count"]);
    }
}
