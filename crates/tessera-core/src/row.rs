//! Row handles and views

use std::fmt;

use slotmap::new_key_type;

use crate::cell::{Cell, CellId, CellMut};
use crate::document::Document;
use crate::error::{ElementKind, Error, Result};

new_key_type! {
    /// Stable handle to a row.
    ///
    /// Stays valid across inserts and removals of other rows; once the row
    /// itself is removed every lookup through the handle reports an orphan.
    ///
    /// Only meaningful in the document that issued it and its clones; a
    /// handle passed to any other document may resolve to an unrelated row.
    pub struct RowId;
}

/// Arena slot for a live row
#[derive(Debug, Clone)]
pub(crate) struct RowSlot {
    /// Position in the document (0-based)
    pub(crate) index: usize,
}

/// Read-only view of a live row
#[derive(Clone, Copy)]
pub struct Row<'a> {
    doc: &'a Document,
    id: RowId,
    index: usize,
}

impl<'a> Row<'a> {
    pub(crate) fn new(doc: &'a Document, id: RowId, index: usize) -> Self {
        Self { doc, id, index }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Row index (0-based)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of cells, always the document's column count
    pub fn len(&self) -> usize {
        self.doc.columns_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The document this row belongs to
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Get the cell in the given column
    pub fn cell(&self, column: usize) -> Result<Cell<'a>> {
        if column >= self.len() {
            return Err(Error::IndexOutOfRange {
                kind: ElementKind::Cell,
                index: column,
                count: self.len(),
            });
        }
        Ok(self.doc.cell_view(self.index, column))
    }

    /// Get the cell under the column with the given header
    pub fn cell_named(&self, header: &str) -> Result<Cell<'a>> {
        let column = self.doc.column_named(header)?;
        Ok(self.doc.cell_view(self.index, column.index()))
    }

    /// Check whether the document has a column with this header
    pub fn has_header(&self, header: &str) -> bool {
        self.doc.has_header(header)
    }

    /// Check whether a cell handle belongs to this row
    pub fn contains(&self, cell: CellId) -> bool {
        cell.row == self.id && self.doc.cell(cell).is_ok()
    }

    /// Iterate over the row's cells in column order
    pub fn cells(&self) -> impl Iterator<Item = Cell<'a>> + 'a {
        let doc = self.doc;
        let index = self.index;
        (0..doc.columns_count()).map(move |column| doc.cell_view(index, column))
    }

    /// Copy the row's values out
    pub fn values(&self) -> Vec<String> {
        self.cells().map(|c| c.string_value().to_string()).collect()
    }
}

impl fmt::Debug for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("index", &self.index)
            .field("values", &self.values())
            .finish()
    }
}

impl fmt::Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row({}, {})", self.index, self.len())
    }
}

/// Mutable view of a live row
pub struct RowMut<'a> {
    doc: &'a mut Document,
    id: RowId,
    index: usize,
}

impl<'a> RowMut<'a> {
    pub(crate) fn new(doc: &'a mut Document, id: RowId, index: usize) -> Self {
        Self { doc, id, index }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.doc.columns_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-only view of the same row
    pub fn as_row(&self) -> Row<'_> {
        Row::new(self.doc, self.id, self.index)
    }

    /// Get a mutable cell in the given column
    pub fn cell_mut(&mut self, column: usize) -> Result<CellMut<'_>> {
        self.doc.cell_at_mut(self.index, column)
    }

    /// Get a mutable cell under the column with the given header
    pub fn cell_named_mut(&mut self, header: &str) -> Result<CellMut<'_>> {
        self.doc.cell_named_mut(self.index, header)
    }

    /// Overwrite the leading cells with `values`.
    ///
    /// Fails without writing anything when there are more values than columns.
    pub fn set_values<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.len() > self.len() {
            return Err(Error::IndexOutOfRange {
                kind: ElementKind::Cell,
                index: values.len() - 1,
                count: self.len(),
            });
        }
        for (column, value) in values.into_iter().enumerate() {
            self.doc.cell_at_mut(self.index, column)?.set_string_value(value);
        }
        Ok(())
    }

    /// Reset every cell to the empty string
    pub fn clear(&mut self) {
        self.doc.clear_row(self.index);
    }
}

impl fmt::Debug for RowMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_row(), f)
    }
}
