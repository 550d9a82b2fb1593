//! Cell handles and views
//!
//! This module contains:
//! - [`CellId`] - A stable handle to a cell, valid until its row or column is removed
//! - [`Cell`] - A read-only view with typed accessors
//! - [`CellMut`] - A mutable view whose typed setters write back through the text value
//! - [`CellEnum`] - Enumerations stored in cells by variant name

mod value;

use std::fmt;

use chrono::NaiveDateTime;

use crate::column::ColumnId;
use crate::error::Result;
use crate::locale::ParsingLocale;
use crate::row::RowId;

pub use value::CellEnum;
use value::{enum_text, TypedText};

/// Stable handle to a cell.
///
/// A cell is identified by the row and column that own it, so it becomes an
/// orphan as soon as either of them is removed. Like its parts it is only
/// meaningful in the document that issued it and its clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    pub row: RowId,
    pub column: ColumnId,
}

impl CellId {
    pub fn new(row: RowId, column: ColumnId) -> Self {
        Self { row, column }
    }
}

/// Read-only view of a live cell
#[derive(Clone, Copy)]
pub struct Cell<'a> {
    id: CellId,
    row: usize,
    column: usize,
    value: &'a str,
    locale: &'a ParsingLocale,
}

impl<'a> Cell<'a> {
    pub(crate) fn new(
        id: CellId,
        row: usize,
        column: usize,
        value: &'a str,
        locale: &'a ParsingLocale,
    ) -> Self {
        Self {
            id,
            row,
            column,
            value,
            locale,
        }
    }

    fn typed(&self) -> TypedText<'a> {
        TypedText {
            text: self.value,
            locale: self.locale,
        }
    }

    /// Handle to this cell
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Index of the owning row
    pub fn row_index(&self) -> usize {
        self.row
    }

    /// Index of the owning column
    pub fn column_index(&self) -> usize {
        self.column
    }

    /// `(row, column)` position
    pub fn indices(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    pub fn string_value(&self) -> &'a str {
        self.value
    }

    /// Check if the cell holds the empty string
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn int_value(&self) -> Result<i32> {
        self.typed().int()
    }

    pub fn long_value(&self) -> Result<i64> {
        self.typed().long()
    }

    pub fn float_value(&self) -> Result<f32> {
        self.typed().float()
    }

    pub fn double_value(&self) -> Result<f64> {
        self.typed().double()
    }

    /// Parse as a date-time; date-only text reads as midnight
    pub fn date_time_value(&self) -> Result<NaiveDateTime> {
        self.typed().date_time()
    }

    /// Parse as an enum variant name, ignoring ASCII case
    pub fn enum_value<E: CellEnum>(&self) -> Result<E> {
        self.typed().enumeration(true)
    }

    pub fn enum_value_with<E: CellEnum>(&self, ignore_case: bool) -> Result<E> {
        self.typed().enumeration(ignore_case)
    }

    pub fn try_int_value(&self) -> Option<i32> {
        self.int_value().ok()
    }

    pub fn try_long_value(&self) -> Option<i64> {
        self.long_value().ok()
    }

    pub fn try_float_value(&self) -> Option<f32> {
        self.float_value().ok()
    }

    pub fn try_double_value(&self) -> Option<f64> {
        self.double_value().ok()
    }

    pub fn try_date_time_value(&self) -> Option<NaiveDateTime> {
        self.date_time_value().ok()
    }

    pub fn try_enum_value<E: CellEnum>(&self) -> Option<E> {
        self.enum_value().ok()
    }
}

impl fmt::Debug for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("row", &self.row)
            .field("column", &self.column)
            .field("value", &self.value)
            .finish()
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell('{}', {}, {})", self.value, self.row, self.column)
    }
}

/// Mutable view of a live cell.
///
/// Typed setters format the value with the document's [`ParsingLocale`] and
/// store the resulting text; nothing typed is cached.
pub struct CellMut<'a> {
    id: CellId,
    row: usize,
    column: usize,
    value: &'a mut String,
    locale: &'a ParsingLocale,
}

impl<'a> CellMut<'a> {
    pub(crate) fn new(
        id: CellId,
        row: usize,
        column: usize,
        value: &'a mut String,
        locale: &'a ParsingLocale,
    ) -> Self {
        Self {
            id,
            row,
            column,
            value,
            locale,
        }
    }

    /// Read-only view of the same cell
    pub fn as_cell(&self) -> Cell<'_> {
        Cell::new(self.id, self.row, self.column, self.value.as_str(), self.locale)
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn indices(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    pub fn string_value(&self) -> &str {
        self.value.as_str()
    }

    pub fn set_string_value<S: Into<String>>(&mut self, value: S) {
        *self.value = value.into();
    }

    pub fn set_int_value(&mut self, value: i32) {
        *self.value = value.to_string();
    }

    pub fn set_long_value(&mut self, value: i64) {
        *self.value = value.to_string();
    }

    pub fn set_float_value(&mut self, value: f32) {
        *self.value = self.locale.format_float(value);
    }

    pub fn set_double_value(&mut self, value: f64) {
        *self.value = self.locale.format_float(value);
    }

    pub fn set_date_time_value(&mut self, value: NaiveDateTime) {
        *self.value = self.locale.format_date_time(&value);
    }

    /// Store the registered name of `value`
    pub fn set_enum_value<E: CellEnum>(&mut self, value: E) -> Result<()> {
        *self.value = enum_text(value)?.to_string();
        Ok(())
    }

    /// Reset to the empty string
    pub fn clear(&mut self) {
        self.value.clear();
    }
}

impl fmt::Debug for CellMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_cell(), f)
    }
}
