use crate::domain::model::{
    find_label, GridSnapshot, LabelKind, DEPARTMENTS, DEPARTMENT_COUNT, MONTHS, MONTH_COUNT,
};
use crate::utils::error::{Result, SalesError};

/// Month × department table of accumulated sales amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesGrid {
    cells: [[i64; DEPARTMENT_COUNT]; MONTH_COUNT],
}

impl Default for SalesGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl SalesGrid {
    pub fn new() -> Self {
        Self {
            cells: [[0; DEPARTMENT_COUNT]; MONTH_COUNT],
        }
    }

    fn month_index(month: &str) -> Result<usize> {
        find_label(&MONTHS, month).ok_or_else(|| SalesError::invalid_label(LabelKind::Month, month))
    }

    fn department_index(department: &str) -> Result<usize> {
        find_label(&DEPARTMENTS, department)
            .ok_or_else(|| SalesError::invalid_label(LabelKind::Department, department))
    }

    fn cell_index(month: &str, department: &str) -> Result<(usize, usize)> {
        Ok((Self::month_index(month)?, Self::department_index(department)?))
    }

    /// Adds `amount` to the cell. Negative amounts are accepted as-is; overflow wraps.
    pub fn record_sale(&mut self, month: &str, department: &str, amount: i64) -> Result<()> {
        let (row, col) = Self::cell_index(month, department)?;
        self.cells[row][col] = self.cells[row][col].wrapping_add(amount);
        tracing::debug!(month = MONTHS[row], department = DEPARTMENTS[col], amount, "sale recorded");
        Ok(())
    }

    /// Adds the same `amount` to every month of the department column. Overflow wraps.
    pub fn record_sale_for_department(&mut self, department: &str, amount: i64) -> Result<()> {
        let col = Self::department_index(department)?;
        for row in self.cells.iter_mut() {
            row[col] = row[col].wrapping_add(amount);
        }
        tracing::debug!(department = DEPARTMENTS[col], amount, "sale recorded for every month");
        Ok(())
    }

    /// Overwrites each month of the department column with its own amount.
    pub fn set_department_by_month(
        &mut self,
        department: &str,
        amounts: &[i64; MONTH_COUNT],
    ) -> Result<()> {
        let col = Self::department_index(department)?;
        for (row, amount) in self.cells.iter_mut().zip(amounts) {
            row[col] = *amount;
        }
        tracing::debug!(department = DEPARTMENTS[col], "department filled month by month");
        Ok(())
    }

    /// Resets the cell to zero.
    pub fn clear_sale(&mut self, month: &str, department: &str) -> Result<()> {
        let (row, col) = Self::cell_index(month, department)?;
        self.cells[row][col] = 0;
        tracing::debug!(month = MONTHS[row], department = DEPARTMENTS[col], "sale cleared");
        Ok(())
    }

    pub fn amount(&self, month: &str, department: &str) -> Result<i64> {
        let (row, col) = Self::cell_index(month, department)?;
        Ok(self.cells[row][col])
    }

    pub fn department_total(&self, department: &str) -> Result<i64> {
        let col = Self::department_index(department)?;
        Ok(self.cells.iter().map(|row| row[col]).fold(0, i64::wrapping_add))
    }

    pub fn month_total(&self, month: &str) -> Result<i64> {
        let row = Self::month_index(month)?;
        Ok(self.cells[row].iter().copied().fold(0, i64::wrapping_add))
    }

    /// Sum of every cell, wrapping on overflow like the cells themselves.
    pub fn grand_total(&self) -> i64 {
        self.cells.iter().flatten().copied().fold(0, i64::wrapping_add)
    }

    /// Rows in fixed month order, each paired with its label.
    pub fn rows(&self) -> impl Iterator<Item = (&'static str, &[i64; DEPARTMENT_COUNT])> + '_ {
        MONTHS.iter().copied().zip(self.cells.iter())
    }

    /// Tab-aligned table: department header, then one row per month.
    pub fn render(&self) -> String {
        let mut out = format!("\t{}\n", DEPARTMENTS.join("\t"));
        for (month, row) in self.rows() {
            out.push_str(month);
            out.push('\t');
            for value in row {
                out.push_str(&value.to_string());
                out.push('\t');
            }
            out.push('\n');
        }
        out
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            months: MONTHS.iter().map(|m| m.to_string()).collect(),
            departments: DEPARTMENTS.iter().map(|d| d.to_string()).collect(),
            cells: self.cells.iter().map(|row| row.to_vec()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_zero() {
        let grid = SalesGrid::new();
        assert_eq!(grid.grand_total(), 0);
        assert_eq!(grid.rows().count(), 12);
    }

    #[test]
    fn test_record_sale_accumulates() {
        let mut grid = SalesGrid::new();
        grid.record_sale("Enero", "Ropa", 500).unwrap();
        grid.record_sale("Enero", "Ropa", 250).unwrap();
        grid.record_sale("Enero", "Ropa", -50).unwrap();
        assert_eq!(grid.amount("Enero", "Ropa").unwrap(), 700);
        assert_eq!(grid.grand_total(), 700);
    }

    #[test]
    fn test_record_sale_is_case_insensitive() {
        let mut upper = SalesGrid::new();
        let mut lower = SalesGrid::new();
        upper.record_sale("Enero", "Ropa", 10).unwrap();
        lower.record_sale("enero", "ROPA", 10).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_invalid_labels_leave_grid_unchanged() {
        let mut grid = SalesGrid::new();
        grid.record_sale("Marzo", "Deportes", 30).unwrap();
        let before = grid.clone();

        let err = grid.record_sale("Smarch", "Ropa", 10).unwrap_err();
        assert!(matches!(
            err,
            SalesError::InvalidLabel {
                kind: LabelKind::Month,
                ..
            }
        ));
        let err = grid.record_sale("Enero", "Electronica", 10).unwrap_err();
        assert!(matches!(
            err,
            SalesError::InvalidLabel {
                kind: LabelKind::Department,
                ..
            }
        ));
        assert!(grid.record_sale_for_department("Electronica", 10).is_err());
        assert!(grid.clear_sale("Marzo", "Electronica").is_err());
        assert!(grid.set_department_by_month("Electronica", &[1; 12]).is_err());

        assert_eq!(grid, before);
    }

    #[test]
    fn test_clear_sale_resets_to_zero() {
        let mut grid = SalesGrid::new();
        grid.record_sale("Febrero", "Deportes", 300).unwrap();
        grid.record_sale("Febrero", "Deportes", -1000).unwrap();
        grid.clear_sale("febrero", "deportes").unwrap();
        assert_eq!(grid.amount("Febrero", "Deportes").unwrap(), 0);

        // 已經是零的格子也回報成功
        assert!(grid.clear_sale("Febrero", "Deportes").is_ok());
        assert_eq!(grid.grand_total(), 0);
    }

    #[test]
    fn test_record_sale_for_department_hits_every_month() {
        let mut grid = SalesGrid::new();
        for amount in [10, 20, 30] {
            grid.record_sale_for_department("Jugueteria", amount).unwrap();
        }
        for month in MONTHS {
            assert_eq!(grid.amount(month, "Jugueteria").unwrap(), 60);
            assert_eq!(grid.amount(month, "Ropa").unwrap(), 0);
        }
        assert_eq!(grid.department_total("Jugueteria").unwrap(), 720);
    }

    #[test]
    fn test_set_department_by_month_overwrites() {
        let mut grid = SalesGrid::new();
        grid.record_sale("Enero", "Deportes", 999).unwrap();
        let amounts = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        grid.set_department_by_month("Deportes", &amounts).unwrap();
        assert_eq!(grid.amount("Enero", "Deportes").unwrap(), 1);
        assert_eq!(grid.amount("Diciembre", "Deportes").unwrap(), 12);
        assert_eq!(grid.department_total("Deportes").unwrap(), 78);
    }

    #[test]
    fn test_month_total() {
        let mut grid = SalesGrid::new();
        grid.record_sale("Mayo", "Ropa", 1).unwrap();
        grid.record_sale("Mayo", "Deportes", 2).unwrap();
        grid.record_sale("Mayo", "Jugueteria", 3).unwrap();
        assert_eq!(grid.month_total("mayo").unwrap(), 6);
        assert!(grid.month_total("May").is_err());
    }

    #[test]
    fn test_overflow_wraps_instead_of_panicking() {
        let mut grid = SalesGrid::new();
        grid.record_sale("Enero", "Ropa", 1).unwrap();
        grid.record_sale("Enero", "Ropa", i64::MAX).unwrap();
        assert_eq!(grid.amount("Enero", "Ropa").unwrap(), i64::MIN);

        grid.record_sale_for_department("Deportes", i64::MAX).unwrap();
        grid.record_sale_for_department("Deportes", 1).unwrap();
        assert_eq!(grid.amount("Julio", "Deportes").unwrap(), i64::MIN);

        // 加總同樣以環繞方式計算
        let mut totals = SalesGrid::new();
        totals.record_sale("Enero", "Ropa", i64::MAX).unwrap();
        totals.record_sale("Febrero", "Ropa", 1).unwrap();
        assert_eq!(totals.grand_total(), i64::MIN);
        assert_eq!(totals.department_total("Ropa").unwrap(), i64::MIN);

        totals.record_sale("Marzo", "Ropa", i64::MAX).unwrap();
        totals.record_sale("Marzo", "Deportes", 1).unwrap();
        assert_eq!(totals.month_total("Marzo").unwrap(), i64::MIN);
    }

    #[test]
    fn test_render_layout() {
        let mut grid = SalesGrid::new();
        grid.record_sale("Enero", "Ropa", 500).unwrap();
        let rendered = grid.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "\tRopa\tDeportes\tJugueteria");
        assert_eq!(lines[1], "Enero\t500\t0\t0\t");
        assert_eq!(lines[12], "Diciembre\t0\t0\t0\t");
    }

    #[test]
    fn test_snapshot_matches_cells() {
        let mut grid = SalesGrid::new();
        grid.record_sale("Diciembre", "Jugueteria", 42).unwrap();
        let snapshot = grid.snapshot();
        assert_eq!(snapshot.months.len(), 12);
        assert_eq!(snapshot.departments, vec!["Ropa", "Deportes", "Jugueteria"]);
        assert_eq!(snapshot.cells[11], vec![0, 0, 42]);
    }
}
