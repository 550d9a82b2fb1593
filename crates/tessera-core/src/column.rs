//! Column handles and views

use std::fmt;

use slotmap::new_key_type;

use crate::cell::{Cell, CellId};
use crate::document::Document;
use crate::error::{ElementKind, Error, Result};

new_key_type! {
    /// Stable handle to a column.
    ///
    /// Stays valid across inserts and removals of other columns; once the
    /// column itself is removed every lookup through the handle reports an
    /// orphan.
    ///
    /// Only meaningful in the document that issued it and its clones; a
    /// handle passed to any other document may resolve to an unrelated column.
    pub struct ColumnId;
}

/// Arena slot for a live column.
///
/// Cell values are stored column-major: `cells[r]` is the value at row `r`.
#[derive(Debug, Clone)]
pub(crate) struct ColumnSlot {
    /// Position in the document (0-based)
    pub(crate) index: usize,
    /// Header, empty when the column has none
    pub(crate) header: String,
    /// One value per row, in row order
    pub(crate) cells: Vec<String>,
}

impl ColumnSlot {
    pub(crate) fn new(index: usize, header: String, rows: usize) -> Self {
        Self {
            index,
            header,
            cells: vec![String::new(); rows],
        }
    }
}

/// Read-only view of a live column
#[derive(Clone, Copy)]
pub struct Column<'a> {
    doc: &'a Document,
    id: ColumnId,
    index: usize,
    header: &'a str,
}

impl<'a> Column<'a> {
    pub(crate) fn new(doc: &'a Document, id: ColumnId, index: usize, header: &'a str) -> Self {
        Self {
            doc,
            id,
            index,
            header,
        }
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    /// Column index (0-based)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Header, empty when the column has none
    pub fn header(&self) -> &'a str {
        self.header
    }

    pub fn has_header(&self) -> bool {
        !self.header.is_empty()
    }

    /// Number of cells, always the document's row count
    pub fn len(&self) -> usize {
        self.doc.rows_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Get the cell in the given row
    pub fn cell(&self, row: usize) -> Result<Cell<'a>> {
        if row >= self.len() {
            return Err(Error::IndexOutOfRange {
                kind: ElementKind::Cell,
                index: row,
                count: self.len(),
            });
        }
        Ok(self.doc.cell_view(row, self.index))
    }

    /// Check whether a cell handle belongs to this column
    pub fn contains(&self, cell: CellId) -> bool {
        cell.column == self.id && self.doc.cell(cell).is_ok()
    }

    /// Iterate over the column's cells in row order
    pub fn cells(&self) -> impl Iterator<Item = Cell<'a>> + 'a {
        let doc = self.doc;
        let index = self.index;
        (0..doc.rows_count()).map(move |row| doc.cell_view(row, index))
    }
}

impl fmt::Debug for Column<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("index", &self.index)
            .field("header", &self.header)
            .finish()
    }
}

impl fmt::Display for Column<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Column({}, '{}', {})", self.index, self.header, self.len())
    }
}
