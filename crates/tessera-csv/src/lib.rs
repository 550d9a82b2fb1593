//! # tessera-csv
//!
//! Delimited-text reader and writer for tessera.
//!
//! Separators and line breaks may be arbitrary non-empty strings; a single
//! escape character quotes fields and is doubled to stand for itself.
//!
//! ```rust
//! use tessera_csv::{CsvOptions, CsvReader, CsvWriter};
//!
//! let options = CsvOptions::default().with_separator(";");
//! let doc = CsvReader::new(options.clone())
//!     .unwrap()
//!     .parse_str("Name;Note\nMario;\"a;b\"")
//!     .unwrap();
//! assert_eq!(doc.cell_named(0, "Note").unwrap().string_value(), "a;b");
//!
//! let text = CsvWriter::new(options).unwrap().write_string(&doc);
//! assert_eq!(text, "Name;Note\nMario;\"a;b\"");
//! ```

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
