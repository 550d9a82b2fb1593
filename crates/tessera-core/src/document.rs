//! Document type

use std::fmt;

use ahash::AHashMap;
use slotmap::SlotMap;

use crate::cell::{Cell, CellId, CellMut};
use crate::column::{Column, ColumnId, ColumnSlot};
use crate::error::{ElementKind, Error, Result};
use crate::locale::ParsingLocale;
use crate::row::{Row, RowId, RowMut, RowSlot};

/// A rectangular table of text cells.
///
/// Rows and columns live in generational arenas and are addressed either by
/// position or by their stable [`RowId`] / [`ColumnId`] handles. The
/// document keeps these invariants after every public call:
///
/// - every column holds exactly `rows_count()` cells and every row spans
///   `columns_count()` cells;
/// - row and column indices are dense `0..N` ranges matching storage order;
/// - non-empty headers are unique;
/// - a removed row, column or cell never resolves again.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Profile used by the typed cell accessors
    locale: ParsingLocale,
    rows: SlotMap<RowId, RowSlot>,
    columns: SlotMap<ColumnId, ColumnSlot>,
    /// Row handles in index order
    row_order: Vec<RowId>,
    /// Column handles in index order
    column_order: Vec<ColumnId>,
    /// Non-empty header -> column
    headers: AHashMap<String, ColumnId>,
}

impl Document {
    /// Create an empty document using the invariant locale
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document that reads typed values with `locale`
    pub fn with_locale(locale: ParsingLocale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    /// Locale used to read and write typed cell values
    pub fn locale(&self) -> &ParsingLocale {
        &self.locale
    }

    /// Replace the locale used for typed cell values
    pub fn set_locale(&mut self, locale: ParsingLocale) {
        self.locale = locale;
    }

    // === Dimensions ===

    /// Number of live rows
    pub fn rows_count(&self) -> usize {
        self.row_order.len()
    }

    /// Number of live columns
    pub fn columns_count(&self) -> usize {
        self.column_order.len()
    }

    /// Total number of stored cells, summed over the columns
    pub fn cells_count(&self) -> usize {
        self.columns.values().map(|c| c.cells.len()).sum()
    }

    /// True when the document has no columns, and therefore no rows
    pub fn is_empty(&self) -> bool {
        self.column_order.is_empty()
    }

    // === Headers ===

    /// Check if any column has a non-empty header
    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Check if a column carries this (non-empty) header
    pub fn has_header(&self, header: &str) -> bool {
        self.headers.contains_key(header)
    }

    /// Non-empty headers in column order
    pub fn column_headers(&self) -> Vec<&str> {
        self.column_order
            .iter()
            .map(|id| self.columns[*id].header.as_str())
            .filter(|h| !h.is_empty())
            .collect()
    }

    /// Rename a column. An empty header removes the name.
    ///
    /// Fails with [`Error::DuplicateHeader`] if another column already uses
    /// `header`; the document is left unchanged in that case.
    pub fn set_header<S: Into<String>>(&mut self, column: ColumnId, header: S) -> Result<()> {
        let header = header.into();
        if !self.columns.contains_key(column) {
            return Err(Error::Orphan(ElementKind::Column));
        }
        self.check_header_available(&header, Some(column))?;

        let slot = &mut self.columns[column];
        if !slot.header.is_empty() {
            self.headers.remove(&slot.header);
        }
        if !header.is_empty() {
            self.headers.insert(header.clone(), column);
        }
        slot.header = header;
        Ok(())
    }

    fn check_header_available(&self, header: &str, owner: Option<ColumnId>) -> Result<()> {
        if header.is_empty() {
            return Ok(());
        }
        match self.headers.get(header) {
            Some(existing) if Some(*existing) != owner => {
                Err(Error::DuplicateHeader(header.to_string()))
            }
            _ => Ok(()),
        }
    }

    // === Column Access ===

    /// Get a column by index
    pub fn column_at(&self, index: usize) -> Result<Column<'_>> {
        let id = *self
            .column_order
            .get(index)
            .ok_or_else(|| Error::out_of_range(ElementKind::Column, index, self.columns_count()))?;
        Ok(self.column_view(id))
    }

    /// Get a column by header
    pub fn column_named(&self, header: &str) -> Result<Column<'_>> {
        self.try_column_named(header)
            .ok_or_else(|| Error::UnknownHeader(header.to_string()))
    }

    /// Get a column by header, `None` if no column carries it
    pub fn try_column_named(&self, header: &str) -> Option<Column<'_>> {
        self.headers.get(header).map(move |id| self.column_view(*id))
    }

    /// Resolve a column handle
    pub fn column(&self, id: ColumnId) -> Result<Column<'_>> {
        if !self.columns.contains_key(id) {
            return Err(Error::Orphan(ElementKind::Column));
        }
        Ok(self.column_view(id))
    }

    /// Iterate over the columns in index order
    pub fn columns(&self) -> impl Iterator<Item = Column<'_>> + '_ {
        self.column_order.iter().map(move |id| self.column_view(*id))
    }

    fn column_view(&self, id: ColumnId) -> Column<'_> {
        let slot = &self.columns[id];
        Column::new(self, id, slot.index, &slot.header)
    }

    // === Row Access ===

    /// Get a row by index
    pub fn row_at(&self, index: usize) -> Result<Row<'_>> {
        let id = *self
            .row_order
            .get(index)
            .ok_or_else(|| Error::out_of_range(ElementKind::Row, index, self.rows_count()))?;
        Ok(Row::new(self, id, index))
    }

    /// Get a mutable row by index
    pub fn row_at_mut(&mut self, index: usize) -> Result<RowMut<'_>> {
        let id = *self
            .row_order
            .get(index)
            .ok_or_else(|| Error::out_of_range(ElementKind::Row, index, self.rows_count()))?;
        Ok(RowMut::new(self, id, index))
    }

    /// Resolve a row handle
    pub fn row(&self, id: RowId) -> Result<Row<'_>> {
        let index = self.row_index(id)?;
        Ok(Row::new(self, id, index))
    }

    /// Resolve a row handle for mutation
    pub fn row_mut(&mut self, id: RowId) -> Result<RowMut<'_>> {
        let index = self.row_index(id)?;
        Ok(RowMut::new(self, id, index))
    }

    /// Iterate over the rows in index order
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.row_order
            .iter()
            .enumerate()
            .map(move |(index, id)| Row::new(self, *id, index))
    }

    fn row_index(&self, id: RowId) -> Result<usize> {
        self.rows
            .get(id)
            .map(|slot| slot.index)
            .ok_or(Error::Orphan(ElementKind::Row))
    }

    // === Cell Access ===

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: usize, column: usize) -> Result<Cell<'_>> {
        self.check_cell_position(row, column)?;
        Ok(self.cell_view(row, column))
    }

    /// Get a cell by row index and column header
    pub fn cell_named(&self, row: usize, header: &str) -> Result<Cell<'_>> {
        let column = self.column_named(header)?.index();
        self.cell_at(row, column)
    }

    /// Get a mutable cell by row and column indices
    pub fn cell_at_mut(&mut self, row: usize, column: usize) -> Result<CellMut<'_>> {
        self.check_cell_position(row, column)?;
        Ok(self.cell_view_mut(row, column))
    }

    /// Get a mutable cell by row index and column header
    pub fn cell_named_mut(&mut self, row: usize, header: &str) -> Result<CellMut<'_>> {
        let column = self.column_named(header)?.index();
        self.cell_at_mut(row, column)
    }

    /// Resolve a cell handle
    pub fn cell(&self, id: CellId) -> Result<Cell<'_>> {
        let (row, column) = self.cell_position(id)?;
        Ok(self.cell_view(row, column))
    }

    /// Resolve a cell handle for mutation
    pub fn cell_mut(&mut self, id: CellId) -> Result<CellMut<'_>> {
        let (row, column) = self.cell_position(id)?;
        Ok(self.cell_view_mut(row, column))
    }

    /// Copy the text of one cell into another
    pub fn copy_cell(&mut self, from: CellId, to: CellId) -> Result<()> {
        let value = self.cell(from)?.string_value().to_string();
        self.cell_mut(to)?.set_string_value(value);
        Ok(())
    }

    fn cell_position(&self, id: CellId) -> Result<(usize, usize)> {
        match (self.rows.get(id.row), self.columns.get(id.column)) {
            (Some(row), Some(column)) => Ok((row.index, column.index)),
            _ => Err(Error::Orphan(ElementKind::Cell)),
        }
    }

    fn check_cell_position(&self, row: usize, column: usize) -> Result<()> {
        if row >= self.rows_count() {
            return Err(Error::out_of_range(ElementKind::Row, row, self.rows_count()));
        }
        if column >= self.columns_count() {
            return Err(Error::out_of_range(
                ElementKind::Column,
                column,
                self.columns_count(),
            ));
        }
        Ok(())
    }

    /// Build a view for a position already known to be in range
    pub(crate) fn cell_view(&self, row: usize, column: usize) -> Cell<'_> {
        let row_id = self.row_order[row];
        let column_id = self.column_order[column];
        Cell::new(
            CellId::new(row_id, column_id),
            row,
            column,
            &self.columns[column_id].cells[row],
            &self.locale,
        )
    }

    fn cell_view_mut(&mut self, row: usize, column: usize) -> CellMut<'_> {
        let row_id = self.row_order[row];
        let column_id = self.column_order[column];
        let value = &mut self.columns[column_id].cells[row];
        CellMut::new(
            CellId::new(row_id, column_id),
            row,
            column,
            value,
            &self.locale,
        )
    }

    // === Structural Mutation ===

    /// Append a column. `None` or an empty header leaves it unnamed.
    pub fn create_column(&mut self, header: Option<&str>) -> Result<ColumnId> {
        self.create_column_at(self.columns_count(), header)
    }

    /// Insert a column at `index` (`0..=columns_count()`).
    ///
    /// Every existing row gains an empty cell at that position.
    pub fn create_column_at(&mut self, index: usize, header: Option<&str>) -> Result<ColumnId> {
        if index > self.columns_count() {
            return Err(Error::out_of_range(
                ElementKind::Column,
                index,
                self.columns_count(),
            ));
        }
        let header = header.unwrap_or_default();
        self.check_header_available(header, None)?;

        let rows = self.rows_count();
        let id = self
            .columns
            .insert(ColumnSlot::new(index, header.to_string(), rows));
        if !header.is_empty() {
            self.headers.insert(header.to_string(), id);
        }
        self.column_order.insert(index, id);
        self.renumber_columns(index + 1);
        Ok(id)
    }

    /// Append a row
    pub fn create_row(&mut self) -> Result<RowId> {
        self.create_row_at(self.rows_count())
    }

    /// Insert a row at `index` (`0..=rows_count()`).
    ///
    /// Every column gains an empty cell at that position. Fails with
    /// [`Error::NoColumns`] when the document has no columns.
    pub fn create_row_at(&mut self, index: usize) -> Result<RowId> {
        if self.column_order.is_empty() {
            return Err(Error::NoColumns);
        }
        if index > self.rows_count() {
            return Err(Error::out_of_range(ElementKind::Row, index, self.rows_count()));
        }

        for column in self.columns.values_mut() {
            column.cells.insert(index, String::new());
        }
        let id = self.rows.insert(RowSlot { index });
        self.row_order.insert(index, id);
        self.renumber_rows(index + 1);
        Ok(id)
    }

    /// Append a row holding `values`, widening the document with unnamed
    /// columns when the record is longer than the current width. Short
    /// records leave the trailing cells empty.
    pub fn append_record<I, S>(&mut self, values: I) -> Result<RowId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.len() > self.columns_count() {
            log::trace!(
                "widening document from {} to {} columns",
                self.columns_count(),
                values.len()
            );
        }
        while self.columns_count() < values.len() {
            self.create_column(None)?;
        }

        let id = self.create_row()?;
        let row = self.rows_count() - 1;
        for (column, value) in values.into_iter().enumerate() {
            let column_id = self.column_order[column];
            self.columns[column_id].cells[row] = value;
        }
        Ok(id)
    }

    /// Remove a column by handle. Returns `false` if it was already removed.
    pub fn remove_column(&mut self, id: ColumnId) -> bool {
        match self.columns.get(id) {
            Some(slot) => {
                let index = slot.index;
                self.remove_column_at(index)
            }
            None => false,
        }
    }

    /// Remove the column carrying `header`. Returns `false` if there is none.
    pub fn remove_column_named(&mut self, header: &str) -> bool {
        match self.headers.get(header) {
            Some(id) => {
                let id = *id;
                self.remove_column(id)
            }
            None => false,
        }
    }

    /// Remove the column at `index`. Returns `false` if out of range.
    ///
    /// Removing the last column also removes every row, since a row cannot
    /// exist without columns.
    pub fn remove_column_at(&mut self, index: usize) -> bool {
        if index >= self.columns_count() {
            return false;
        }
        let id = self.column_order.remove(index);
        if let Some(slot) = self.columns.remove(id) {
            if !slot.header.is_empty() {
                self.headers.remove(&slot.header);
            }
        }
        self.renumber_columns(index);

        if self.column_order.is_empty() && !self.row_order.is_empty() {
            log::debug!("last column removed, dropping {} rows", self.rows_count());
            self.rows.clear();
            self.row_order.clear();
        }
        true
    }

    /// Remove a row by handle. Returns `false` if it was already removed.
    pub fn remove_row(&mut self, id: RowId) -> bool {
        match self.rows.get(id) {
            Some(slot) => {
                let index = slot.index;
                self.remove_row_at(index)
            }
            None => false,
        }
    }

    /// Remove the row at `index`. Returns `false` if out of range.
    pub fn remove_row_at(&mut self, index: usize) -> bool {
        if index >= self.rows_count() {
            return false;
        }
        let id = self.row_order.remove(index);
        self.rows.remove(id);
        for column in self.columns.values_mut() {
            column.cells.remove(index);
        }
        self.renumber_rows(index);
        true
    }

    /// Remove every row; when `keep_headers` is false remove every column too.
    pub fn clear(&mut self, keep_headers: bool) {
        self.rows.clear();
        self.row_order.clear();
        if keep_headers {
            for column in self.columns.values_mut() {
                column.cells.clear();
            }
        } else {
            self.columns.clear();
            self.column_order.clear();
            self.headers.clear();
        }
    }

    /// Reset every cell of the row at `index` to the empty string
    pub(crate) fn clear_row(&mut self, index: usize) {
        for column in self.columns.values_mut() {
            if let Some(value) = column.cells.get_mut(index) {
                value.clear();
            }
        }
    }

    fn renumber_rows(&mut self, from: usize) {
        if from < self.row_order.len() {
            log::trace!("renumbering rows {}..{}", from, self.row_order.len());
        }
        for (index, id) in self.row_order.iter().enumerate().skip(from) {
            self.rows[*id].index = index;
        }
    }

    fn renumber_columns(&mut self, from: usize) {
        if from < self.column_order.len() {
            log::trace!("renumbering columns {}..{}", from, self.column_order.len());
        }
        for (index, id) in self.column_order.iter().enumerate().skip(from) {
            self.columns[*id].index = index;
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Document({}x{})", self.rows_count(), self.columns_count())
    }
}
