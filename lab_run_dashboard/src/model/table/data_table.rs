use crate::common::*;

use crate::errors::dashboard_error::*;
use crate::model::table::cell::*;

#[doc = r#"
    Column-oriented table: column name → cells, in insertion order.

    Every column always holds `row_count` cells. Rows pushed with a column the
    table has not seen yet backfill that column with `Cell::Null`, and columns
    missing from a pushed row receive `Cell::Null` for that row.
"#]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: IndexMap<String, Vec<Cell>>,
    row_count: usize,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    #[doc = "Builds a table from whole columns; all columns must share one length"]
    pub fn from_columns<I, S>(columns: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Cell>)>,
        S: Into<String>,
    {
        let mut table: DataTable = DataTable::new();

        for (name, cells) in columns {
            let name: String = name.into();

            if !table.columns.is_empty() && cells.len() != table.row_count {
                return Err(anyhow!(
                    "[DataTable->from_columns] column '{}' has {} rows, expected {}",
                    name,
                    cells.len(),
                    table.row_count
                ));
            }

            table.row_count = cells.len();
            table.columns.insert(name, cells);
        }

        Ok(table)
    }

    #[doc = "Adds an empty column unless it already exists"]
    pub fn ensure_column(&mut self, name: &str) {
        if !self.columns.contains_key(name) {
            self.columns
                .insert(name.to_string(), vec![Cell::Null; self.row_count]);
        }
    }

    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = (S, Cell)>,
        S: Into<String>,
    {
        for (name, cell) in row {
            let name: String = name.into();
            self.ensure_column(&name);

            if let Some(cells) = self.columns.get_mut(&name) {
                /* 같은 행에서 동일 컬럼이 반복되면 마지막 값을 사용 */
                if cells.len() > self.row_count {
                    cells.pop();
                }
                cells.push(cell);
            }
        }

        self.row_count += 1;

        for cells in self.columns.values_mut() {
            if cells.len() < self.row_count {
                cells.push(Cell::Null);
            }
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    #[cfg(test)]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    #[doc = "Like `column`, but an absent column is a `SchemaMismatch`"]
    pub fn require_column(&self, name: &str) -> Result<&[Cell], DashboardError> {
        self.column(name)
            .ok_or_else(|| DashboardError::SchemaMismatch(name.to_string()))
    }

    #[doc = "Text rendering of the first `max_rows` rows, used for log previews"]
    pub fn preview(&self, max_rows: usize) -> String {
        let names: Vec<&str> = self.column_names();
        let shown: usize = self.row_count.min(max_rows);

        let rendered: Vec<Vec<String>> = (0..shown)
            .map(|row| {
                self.columns
                    .values()
                    .map(|cells| cells[row].to_string())
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                rendered
                    .iter()
                    .map(|r| r[idx].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let format_line = |cells: Vec<&str>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<String>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut lines: Vec<String> = vec![format_line(names.clone())];
        for row in &rendered {
            lines.push(format_line(row.iter().map(String::as_str).collect()));
        }

        if self.row_count > shown {
            lines.push(format!("... {} more rows", self.row_count - shown));
        }

        lines.join("\n")
    }
}
