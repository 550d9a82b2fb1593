//! Prelude module - common imports for tessera users
//!
//! ```rust
//! use tessera::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellEnum,
    CellId,
    CellMut,

    Column,
    ColumnId,

    // I/O types
    CsvError,
    CsvOptions,
    CsvReader,
    CsvWriter,

    // Main types
    Document,
    // Extension traits
    DocumentExt,

    // Error types
    ElementKind,
    Error,
    LineTerminator,

    // Mapping types
    MappingError,
    ParsingLocale,
    RecordDescriptor,
    RecordMapper,
    Result,

    Row,
    RowId,
    RowMut,
};
