use crate::core::grid::SalesGrid;
use crate::domain::model::{DEPARTMENTS, MONTH_COLUMN_HEADER};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SalesError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 4] = ["table", "csv", "tsv", "json"];

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Table => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }

    pub fn file_name(&self) -> String {
        format!("sales_grid.{}", self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = SalesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            other => Err(SalesError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    OutputFormat::NAMES.join(", ")
                ),
            }),
        }
    }
}

fn to_delimited(grid: &SalesGrid, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    let mut header = vec![MONTH_COLUMN_HEADER];
    header.extend(DEPARTMENTS);
    writer.write_record(&header)?;

    for (month, row) in grid.rows() {
        let mut record = vec![month.to_string()];
        record.extend(row.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| output_error(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| output_error(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

// 匯出失敗一律歸類為輸出錯誤
fn output_error(err: std::io::Error) -> SalesError {
    SalesError::CsvError(csv::Error::from(err))
}

/// Renders the grid in the requested format.
pub fn render_as(grid: &SalesGrid, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(grid.render()),
        OutputFormat::Csv => to_delimited(grid, b','),
        OutputFormat::Tsv => to_delimited(grid, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&grid.snapshot())?),
    }
}

/// Writes one file per format and returns the written file names.
pub fn export_all<S: Storage>(
    grid: &SalesGrid,
    formats: &[OutputFormat],
    storage: &S,
) -> Result<Vec<String>> {
    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let content = render_as(grid, *format)?;
        let file_name = format.file_name();
        tracing::debug!("Writing {} ({} bytes)", file_name, content.len());
        storage.write_file(&file_name, content.as_bytes())?;
        written.push(file_name);
    }
    Ok(written)
}
