//! # tessera
//!
//! A Rust library for reading, editing, and writing delimited-text tables.
//!
//! Tessera parses CSV-like text into a mutable [`Document`] whose rows,
//! columns and cells can be addressed by position or column header, and
//! serializes it back with the same dialect.
//!
//! ## Features
//!
//! - Multi-character separators and line breaks
//! - Quoting with a doubled escape character
//! - Stable handles that detect removed rows, columns and cells
//! - Typed cell access (integers, floats, date-times, enums) through a [`ParsingLocale`]
//! - Mapping rows to records with [`RecordDescriptor`]
//!
//! ## Example
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! let options = CsvOptions::default().with_separator(";");
//! let mut doc = CsvReader::new(options.clone())
//!     .unwrap()
//!     .parse_str("Name;Height\nMario;1.76")
//!     .unwrap();
//!
//! doc.cell_named_mut(0, "Height").unwrap().set_float_value(1.8);
//! doc.append_record(["Luigi", "1.9"]).unwrap();
//!
//! assert_eq!(doc.dump(&options).unwrap(), "Name;Height\nMario;1.8\nLuigi;1.9");
//! ```

pub mod mapping;
pub mod prelude;

// Re-export core types
pub use tessera_core::{
    Cell, CellEnum, CellId, CellMut, Column, ColumnId, Document, ElementKind, Error, ParsingLocale,
    Result, Row, RowId, RowMut,
};

// Re-export I/O types
pub use tessera_csv::{CsvError, CsvOptions, CsvReader, CsvResult, CsvWriter, LineTerminator};

pub use mapping::{FieldValue, MappingError, MappingResult, RecordDescriptor, RecordMapper};

use std::path::Path;

/// Extension trait for Document to add file I/O and record mapping
pub trait DocumentExt: Sized {
    /// Open a document from a file
    fn open<P: AsRef<Path>>(path: P, options: &CsvOptions) -> CsvResult<Self>;

    /// Save the document to a file
    fn save<P: AsRef<Path>>(&self, path: P, options: &CsvOptions) -> CsvResult<()>;

    /// Serialize the document to text
    fn dump(&self, options: &CsvOptions) -> CsvResult<String>;

    /// Map every row to a record
    fn map_records<T, M: RecordMapper<T>>(&self, mapper: &M) -> MappingResult<Vec<T>>;

    /// Map rows starting at `start_row` into `buffer`, returning how many
    /// records were written
    fn map_records_into<T, M: RecordMapper<T>>(
        &self,
        mapper: &M,
        buffer: &mut [T],
        start_row: usize,
    ) -> MappingResult<usize>;

    /// Append one row per record, returning how many rows were added
    fn append_records<'r, T: 'r, M, I>(&mut self, mapper: &M, records: I) -> MappingResult<usize>
    where
        M: RecordMapper<T>,
        I: IntoIterator<Item = &'r T>;
}

impl DocumentExt for Document {
    fn open<P: AsRef<Path>>(path: P, options: &CsvOptions) -> CsvResult<Document> {
        CsvReader::new(options.clone())?.read_file(path)
    }

    fn save<P: AsRef<Path>>(&self, path: P, options: &CsvOptions) -> CsvResult<()> {
        CsvWriter::new(options.clone())?.write_file(self, path)
    }

    fn dump(&self, options: &CsvOptions) -> CsvResult<String> {
        Ok(CsvWriter::new(options.clone())?.write_string(self))
    }

    fn map_records<T, M: RecordMapper<T>>(&self, mapper: &M) -> MappingResult<Vec<T>> {
        self.rows().map(|row| mapper.try_map(&row)).collect()
    }

    fn map_records_into<T, M: RecordMapper<T>>(
        &self,
        mapper: &M,
        buffer: &mut [T],
        start_row: usize,
    ) -> MappingResult<usize> {
        let mut count = 0;
        for (slot, row) in buffer.iter_mut().zip(self.rows().skip(start_row)) {
            *slot = mapper.try_map(&row)?;
            count += 1;
        }
        Ok(count)
    }

    fn append_records<'r, T: 'r, M, I>(&mut self, mapper: &M, records: I) -> MappingResult<usize>
    where
        M: RecordMapper<T>,
        I: IntoIterator<Item = &'r T>,
    {
        let mut count = 0;
        for record in records {
            let id = self.create_row()?;
            let mut row = self.row_mut(id)?;
            if let Err(err) = mapper.try_unmap(record, &mut row) {
                self.remove_row(id);
                return Err(err);
            }
            count += 1;
        }
        Ok(count)
    }
}
