use serde::{Deserialize, Serialize};
use std::fmt;

pub const MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

pub const DEPARTMENTS: [&str; 3] = ["Ropa", "Deportes", "Jugueteria"];

pub const MONTH_COUNT: usize = MONTHS.len();
pub const DEPARTMENT_COUNT: usize = DEPARTMENTS.len();

/// Header of the first column in exported tables.
pub const MONTH_COLUMN_HEADER: &str = "Mes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    Month,
    Department,
}

impl LabelKind {
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            LabelKind::Month => &MONTHS,
            LabelKind::Department => &DEPARTMENTS,
        }
    }
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelKind::Month => write!(f, "month"),
            LabelKind::Department => write!(f, "department"),
        }
    }
}

/// Linear, case-insensitive scan returning the first matching index.
pub fn find_label(labels: &[&str], value: &str) -> Option<usize> {
    let wanted = value.to_lowercase();
    labels
        .iter()
        .position(|label| label.to_lowercase() == wanted)
}

/// Serializable view of the grid used by the JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub months: Vec<String>,
    pub departments: Vec<String>,
    pub cells: Vec<Vec<i64>>,
}
