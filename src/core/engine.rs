use crate::config::script_config::{ScriptConfig, Step};
use crate::core::grid::SalesGrid;
use crate::domain::model::{find_label, DEPARTMENTS, MONTH_COUNT};
use crate::domain::ports::AmountSource;
use crate::utils::error::{Result, SalesError};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub applied: usize,
    pub rejected: usize,
    pub amounts_consumed: usize,
}

/// Drives a [`SalesGrid`] through the steps of a script, writing one status line per operation.
pub struct SalesEngine<W: Write> {
    grid: SalesGrid,
    out: W,
    report: RunReport,
}

impl<W: Write> SalesEngine<W> {
    pub fn new(out: W) -> Self {
        Self::with_grid(SalesGrid::new(), out)
    }

    pub fn with_grid(grid: SalesGrid, out: W) -> Self {
        Self {
            grid,
            out,
            report: RunReport::default(),
        }
    }

    pub fn grid(&self) -> &SalesGrid {
        &self.grid
    }

    pub fn into_parts(self) -> (SalesGrid, W) {
        (self.grid, self.out)
    }

    /// Runs every step in order. Invalid labels are reported and skipped;
    /// input and I/O errors abort the run.
    pub fn run<A: AmountSource>(
        &mut self,
        script: &ScriptConfig,
        source: &mut A,
    ) -> Result<RunReport> {
        tracing::info!("▶️ Running script '{}' ({} steps)", script.script.name, script.steps.len());

        for step in &script.steps {
            self.apply(step, source)?;
        }

        tracing::info!(
            "✅ Script finished: {} applied, {} rejected, {} amounts read",
            self.report.applied,
            self.report.rejected,
            self.report.amounts_consumed
        );
        Ok(self.report)
    }

    fn apply<A: AmountSource>(&mut self, step: &Step, source: &mut A) -> Result<()> {
        match step {
            Step::Record {
                month,
                department,
                amount,
            } => {
                let outcome = self.grid.record_sale(month, department, *amount);
                self.report_outcome(
                    outcome,
                    format!("Venta ingresada: {} en {} para {}.", amount, month, department),
                    "Mes o departamento inválido.",
                )
            }
            Step::Clear { month, department } => {
                let outcome = self.grid.clear_sale(month, department);
                self.report_outcome(
                    outcome,
                    format!("Venta eliminada en {} para {}.", month, department),
                    "Mes o departamento inválido.",
                )
            }
            Step::Department { department, amount } => self.apply_department(department, *amount),
            Step::DepartmentFromInput { department, count } => {
                // 每次讀取一個金額後立即套用
                for _ in 0..*count {
                    let amount = source.next_amount()?;
                    self.report.amounts_consumed += 1;
                    self.apply_department(department, amount)?;
                }
                Ok(())
            }
            Step::MonthFromInput { department } => {
                if find_label(&DEPARTMENTS, department).is_none() {
                    tracing::warn!("⚠️ Unknown department '{}', skipping monthly entry", department);
                    self.report.rejected += 1;
                    return self.status("Departamento inválido.");
                }

                let amounts = source.take_amounts(MONTH_COUNT)?;
                self.report.amounts_consumed += amounts.len();
                let amounts: [i64; MONTH_COUNT] =
                    amounts
                        .try_into()
                        .map_err(|v: Vec<i64>| SalesError::InputExhausted {
                            expected: MONTH_COUNT,
                            consumed: v.len(),
                        })?;

                let outcome = self.grid.set_department_by_month(department, &amounts);
                self.report_outcome(
                    outcome,
                    format!("Ventas ingresadas mes por mes para {}.", department),
                    "Departamento inválido.",
                )
            }
        }
    }

    fn apply_department(&mut self, department: &str, amount: i64) -> Result<()> {
        let outcome = self.grid.record_sale_for_department(department, amount);
        self.report_outcome(
            outcome,
            format!("Venta ingresada: {} para todo el año en {}.", amount, department),
            "Departamento inválido.",
        )
    }

    fn report_outcome(&mut self, outcome: Result<()>, success: String, invalid: &str) -> Result<()> {
        match outcome {
            Ok(()) => {
                self.report.applied += 1;
                self.status(&success)
            }
            Err(e) if !e.is_fatal() => {
                tracing::warn!("⚠️ {}", e);
                self.report.rejected += 1;
                self.status(invalid)
            }
            Err(e) => Err(e),
        }
    }

    fn status(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }
}
