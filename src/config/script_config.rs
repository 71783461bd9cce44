use crate::core::export::OutputFormat;
use crate::domain::model::MONTH_COUNT;
use crate::utils::error::{Result, SalesError};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptConfig {
    pub script: ScriptInfo,
    pub steps: Vec<Step>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptInfo {
    pub name: String,
    pub description: Option<String>,
}

/// One grid operation. Labels are resolved at run time, not at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Record {
        month: String,
        department: String,
        amount: i64,
    },
    Clear {
        month: String,
        department: String,
    },
    Department {
        department: String,
        amount: i64,
    },
    /// Reads `count` amounts, applying each to the whole department as it arrives.
    DepartmentFromInput { department: String, count: usize },
    /// Reads one amount per month and overwrites the department column.
    MonthFromInput { department: String },
}

impl Step {
    pub fn amounts_needed(&self) -> usize {
        match self {
            Step::DepartmentFromInput { count, .. } => *count,
            Step::MonthFromInput { .. } => MONTH_COUNT,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub export: Option<Vec<OutputFormat>>,
    pub output_path: Option<String>,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        let record = |month: &str, department: &str, amount| Step::Record {
            month: month.to_string(),
            department: department.to_string(),
            amount,
        };

        Self {
            script: ScriptInfo {
                name: "demo".to_string(),
                description: Some(
                    "Three sales, one deletion, then twelve yearly amounts for Ropa".to_string(),
                ),
            },
            steps: vec![
                record("Enero", "Ropa", 500),
                record("Febrero", "Deportes", 300),
                record("Marzo", "Jugueteria", 400),
                Step::Clear {
                    month: "Febrero".to_string(),
                    department: "Deportes".to_string(),
                },
                Step::DepartmentFromInput {
                    department: "Ropa".to_string(),
                    count: MONTH_COUNT,
                },
            ],
            output: None,
        }
    }
}

impl ScriptConfig {
    /// 從 TOML 檔案載入腳本
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SalesError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析腳本
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SalesError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${START_MONTH})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| SalesError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn amounts_needed(&self) -> usize {
        self.steps.iter().map(Step::amounts_needed).sum()
    }

    pub fn format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|o| o.format)
    }

    pub fn export_formats(&self) -> &[OutputFormat] {
        self.output
            .as_ref()
            .and_then(|o| o.export.as_deref())
            .unwrap_or(&[])
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.output_path.as_deref())
    }
}

impl Validate for ScriptConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("script.name", &self.script.name)?;

        if self.steps.is_empty() {
            return Err(SalesError::InvalidConfigValueError {
                field: "steps".to_string(),
                value: "[]".to_string(),
                reason: "A script needs at least one step".to_string(),
            });
        }

        for (i, step) in self.steps.iter().enumerate() {
            if let Step::DepartmentFromInput { count, .. } = step {
                validate_positive_number(&format!("steps[{}].count", i), *count, 1)?;
            }
        }

        if !self.export_formats().is_empty() {
            if let Some(path) = self.output_path() {
                crate::utils::validation::validate_path("output.output_path", path)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_script_is_demo() {
        let config = ScriptConfig::default();
        assert_eq!(config.steps.len(), 5);
        assert_eq!(config.amounts_needed(), 12);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.steps[3],
            Step::Clear {
                month: "Febrero".to_string(),
                department: "Deportes".to_string()
            }
        );
    }

    #[test]
    fn test_parse_script() {
        let toml_content = r#"
[script]
name = "quarter"

[[steps]]
action = "record"
month = "abril"
department = "ropa"
amount = 120

[[steps]]
action = "department"
department = "Deportes"
amount = 5

[[steps]]
action = "month_from_input"
department = "Jugueteria"

[output]
format = "csv"
export = ["json", "tsv"]
output_path = "./out"
"#;

        let config = ScriptConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.script.name, "quarter");
        assert_eq!(config.steps.len(), 3);
        assert_eq!(config.amounts_needed(), 12);
        assert_eq!(config.format(), Some(OutputFormat::Csv));
        assert_eq!(
            config.export_formats(),
            &[OutputFormat::Json, OutputFormat::Tsv]
        );
        assert_eq!(config.output_path(), Some("./out"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_action_is_config_error() {
        let toml_content = r#"
[script]
name = "bad"

[[steps]]
action = "divide"
department = "Ropa"
"#;
        let err = ScriptConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, SalesError::ConfigError { .. }));
    }

    #[test]
    fn test_validation_rejects_empty_and_zero_count() {
        let empty = ScriptConfig::from_toml_str("steps = []\n[script]\nname = \"x\"\n").unwrap();
        assert!(empty.validate().is_err());

        let zero = r#"
[script]
name = "zero"

[[steps]]
action = "department_from_input"
department = "Ropa"
count = 0
"#;
        let config = ScriptConfig::from_toml_str(zero).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_labels_pass_validation() {
        let toml_content = r#"
[script]
name = "typo"

[[steps]]
action = "record"
month = "Smarch"
department = "Ropa"
amount = 1
"#;
        let config = ScriptConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SALES_GRID_TEST_MONTH", "Junio");

        let toml_content = r#"
[script]
name = "env"

[[steps]]
action = "clear"
month = "${SALES_GRID_TEST_MONTH}"
department = "Ropa"
"#;
        let config = ScriptConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.steps[0],
            Step::Clear {
                month: "Junio".to_string(),
                department: "Ropa".to_string()
            }
        );

        std::env::remove_var("SALES_GRID_TEST_MONTH");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[script]\nname = \"file\"\n\n[[steps]]\naction = \"department\"\ndepartment = \"Ropa\"\namount = 3\n")
            .unwrap();

        let config = ScriptConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.script.name, "file");
    }
}
