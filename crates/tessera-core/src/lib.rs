//! # tessera-core
//!
//! Core document model for the tessera delimited-text library.
//!
//! This crate provides the fundamental types used throughout tessera:
//! - [`Document`] - A rectangular grid of text cells with optional column headers
//! - [`Row`], [`Column`], [`Cell`] - Views addressed by position or header
//! - [`RowId`], [`ColumnId`], [`CellId`] - Stable handles that report
//!   [`Error::Orphan`] once their element is removed
//! - [`ParsingLocale`] - The format profile behind the typed cell accessors
//!
//! ## Example
//!
//! ```rust
//! use tessera_core::Document;
//!
//! let mut doc = Document::new();
//! doc.create_column(Some("Name")).unwrap();
//! doc.create_column(Some("Height")).unwrap();
//!
//! let row = doc.create_row().unwrap();
//! doc.cell_named_mut(0, "Name").unwrap().set_string_value("Mario");
//! doc.cell_named_mut(0, "Height").unwrap().set_float_value(1.76);
//!
//! assert_eq!(doc.cell_at(0, 1).unwrap().float_value().unwrap(), 1.76);
//!
//! doc.remove_row(row);
//! assert!(doc.row(row).unwrap_err().is_orphan());
//! ```

pub mod cell;
pub mod column;
pub mod document;
pub mod error;
pub mod locale;
pub mod row;

// Re-exports for convenience
pub use cell::{Cell, CellEnum, CellId, CellMut};
pub use column::{Column, ColumnId};
pub use document::Document;
pub use error::{ElementKind, Error, Result};
pub use locale::ParsingLocale;
pub use row::{Row, RowId, RowMut};
