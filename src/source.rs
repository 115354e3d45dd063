//! Data sources backing the grid's cells.
//!
//! The grid never owns or hard-codes data: the embedding application injects
//! a [`DataSource`]. Two providers ship with the crate, an in-memory matrix
//! and a synthetic `R{row}-C{col}` generator.

use std::borrow::Cow;

/// Random-access provider of displayable cell values.
///
/// Implementations must be total over `0..rows` x `0..cols` as reported by
/// [`DataSource::dimensions`]. The grid validates coordinates, not content.
pub trait DataSource {
    /// `(rows, cols)` this source can answer for
    fn dimensions(&self) -> (u32, u32);

    /// Display value of the cell at a logical coordinate
    fn cell_value(&self, row: u32, col: u32) -> Cow<'_, str>;
}

impl<S: DataSource + ?Sized> DataSource for &S {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn cell_value(&self, row: u32, col: u32) -> Cow<'_, str> {
        (**self).cell_value(row, col)
    }
}

impl<S: DataSource + ?Sized> DataSource for Box<S> {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn cell_value(&self, row: u32, col: u32) -> Cow<'_, str> {
        (**self).cell_value(row, col)
    }
}

/// Generated values of the form `R{row + 1}-C{col + 1}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticSource {
    rows: u32,
    cols: u32,
}

impl SyntheticSource {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }
}

impl DataSource for SyntheticSource {
    fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    fn cell_value(&self, row: u32, col: u32) -> Cow<'_, str> {
        Cow::Owned(format!("R{}-C{}", u64::from(row) + 1, u64::from(col) + 1))
    }
}

/// Row-major in-memory matrix of strings.
///
/// Ragged rows are allowed; cells past the end of a row read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixSource {
    rows: Vec<Vec<String>>,
    cols: u32,
}

impl MatrixSource {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        let cols = rows
            .iter()
            .map(|r| u32::try_from(r.len()).unwrap_or(u32::MAX))
            .max()
            .unwrap_or(0);
        Self { rows, cols }
    }

    /// Materialize any source into a matrix of the given size
    pub fn from_source<S: DataSource + ?Sized>(source: &S, rows: u32, cols: u32) -> Self {
        let rows = (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| source.cell_value(r, c).into_owned())
                    .collect()
            })
            .collect();
        Self::new(rows)
    }

    pub fn row_count(&self) -> u32 {
        u32::try_from(self.rows.len()).unwrap_or(u32::MAX)
    }

    pub fn col_count(&self) -> u32 {
        self.cols
    }
}

impl DataSource for MatrixSource {
    fn dimensions(&self) -> (u32, u32) {
        (self.row_count(), self.cols)
    }

    fn cell_value(&self, row: u32, col: u32) -> Cow<'_, str> {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .map_or(Cow::Borrowed(""), |v| Cow::Borrowed(v.as_str()))
    }
}
