//! Table block grid and its resize reconciliation

use serde::{Deserialize, Serialize};

pub const MIN_ROWS: u32 = 1;
pub const MAX_ROWS: u32 = 20;
pub const MIN_COLS: u32 = 1;
pub const MAX_COLS: u32 = 10;

/// Which grid dimension a resize targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableDimension {
    Rows,
    Cols,
}

/// Table block: a rows × cols grid of free-text cells. The grid is absent
/// until explicitly initialized; when present it always has exactly
/// `rows` rows of `cols` cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBlock {
    pub rows: u32,
    pub cols: u32,
    #[serde(default)]
    pub table_data: Option<Vec<Vec<String>>>,
}

impl Default for TableBlock {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            table_data: None,
        }
    }
}

impl TableBlock {
    /// Allocate a fresh grid of empty cells from the current dimensions,
    /// falling back to 3×3 when a dimension is out of range.
    pub fn init(&mut self) {
        let rows = if (MIN_ROWS..=MAX_ROWS).contains(&self.rows) {
            self.rows
        } else {
            3
        };
        let cols = if (MIN_COLS..=MAX_COLS).contains(&self.cols) {
            self.cols
        } else {
            3
        };
        self.rows = rows;
        self.cols = cols;
        self.table_data = Some(vec![vec![String::new(); cols as usize]; rows as usize]);
    }

    /// Change one dimension and reconcile the grid: growth appends empty
    /// rows/cells, shrink truncates trailing ones. Every cell whose
    /// coordinate stays within the new bounds keeps its content.
    pub fn set_dimension(&mut self, dimension: TableDimension, value: u32) {
        match dimension {
            TableDimension::Rows => self.rows = value.clamp(MIN_ROWS, MAX_ROWS),
            TableDimension::Cols => self.cols = value.clamp(MIN_COLS, MAX_COLS),
        }

        let rows = self.rows as usize;
        let cols = self.cols as usize;
        match &mut self.table_data {
            None => {
                self.table_data = Some(vec![vec![String::new(); cols]; rows]);
            }
            Some(grid) => {
                grid.resize_with(rows, || vec![String::new(); cols]);
                for row in grid.iter_mut() {
                    row.resize(cols, String::new());
                }
            }
        }
    }

    /// Direct cell write; no-op without a grid or out of bounds.
    pub fn set_cell(&mut self, row: usize, col: usize, value: String) {
        if let Some(cell) = self
            .table_data
            .as_mut()
            .and_then(|grid| grid.get_mut(row))
            .and_then(|cells| cells.get_mut(col))
        {
            *cell = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_2x2() -> TableBlock {
        let mut table = TableBlock {
            rows: 2,
            cols: 2,
            table_data: None,
        };
        table.init();
        table.set_cell(0, 0, "a".into());
        table.set_cell(0, 1, "b".into());
        table.set_cell(1, 0, "c".into());
        table.set_cell(1, 1, "d".into());
        table
    }

    #[test]
    fn grow_then_shrink_preserves_cells() {
        let mut table = filled_2x2();

        table.set_dimension(TableDimension::Rows, 3);
        table.set_dimension(TableDimension::Cols, 3);
        assert_eq!(
            table.table_data.as_ref().unwrap(),
            &vec![
                vec!["a".to_string(), "b".into(), "".into()],
                vec!["c".to_string(), "d".into(), "".into()],
                vec!["".to_string(), "".into(), "".into()],
            ]
        );

        table.set_dimension(TableDimension::Rows, 2);
        table.set_dimension(TableDimension::Cols, 2);
        assert_eq!(
            table.table_data.as_ref().unwrap(),
            &vec![
                vec!["a".to_string(), "b".into()],
                vec!["c".to_string(), "d".into()],
            ]
        );
    }

    #[test]
    fn resize_without_grid_allocates() {
        let mut table = TableBlock::default();
        table.set_dimension(TableDimension::Rows, 4);
        let grid = table.table_data.as_ref().unwrap();
        assert_eq!(grid.len(), 4);
        assert!(grid.iter().all(|row| row.len() == 3));
    }

    #[test]
    fn dimensions_are_clamped_to_range() {
        let mut table = filled_2x2();
        table.set_dimension(TableDimension::Rows, 0);
        assert_eq!(table.rows, MIN_ROWS);
        table.set_dimension(TableDimension::Cols, 99);
        assert_eq!(table.cols, MAX_COLS);
        let grid = table.table_data.as_ref().unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].len(), 10);
        assert_eq!(grid[0][0], "a");
        assert_eq!(grid[0][1], "b");
    }

    #[test]
    fn out_of_bounds_cell_write_is_ignored() {
        let mut table = filled_2x2();
        table.set_cell(5, 0, "x".into());
        table.set_cell(0, 5, "x".into());
        assert_eq!(table.table_data.as_ref().unwrap()[0][0], "a");

        let mut bare = TableBlock::default();
        bare.set_cell(0, 0, "x".into());
        assert!(bare.table_data.is_none());
    }
}
