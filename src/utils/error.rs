use crate::domain::model::LabelKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalesError {
    #[error("Invalid {kind} label: '{value}'")]
    InvalidLabel { kind: LabelKind, value: String },

    #[error("Input exhausted: expected {expected} amounts, only {consumed} available")]
    InputExhausted { expected: usize, consumed: usize },

    #[error("Input format error: token '{token}' at position {position} is not an integer")]
    InputFormat { token: String, position: usize },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Label,
    Input,
    Io,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SalesError {
    pub fn invalid_label(kind: LabelKind, value: &str) -> Self {
        SalesError::InvalidLabel {
            kind,
            value: value.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SalesError::InvalidLabel { .. } => ErrorCategory::Label,
            SalesError::InputExhausted { .. } | SalesError::InputFormat { .. } => {
                ErrorCategory::Input
            }
            SalesError::IoError(_) => ErrorCategory::Io,
            SalesError::CsvError(_) | SalesError::SerializationError(_) => ErrorCategory::Output,
            SalesError::ConfigError { .. } | SalesError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 無效標籤只是警告，腳本繼續執行
            ErrorCategory::Label => ErrorSeverity::Low,
            ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this error; Low severity still exits successfully.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() > ErrorSeverity::Low
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SalesError::InvalidLabel { kind, value } => format!("Unknown {} '{}'", kind, value),
            SalesError::InputExhausted { expected, consumed } => format!(
                "Not enough sales amounts on input ({} of {} read)",
                consumed, expected
            ),
            SalesError::InputFormat { token, .. } => {
                format!("'{}' is not a whole number", token)
            }
            SalesError::IoError(e) => format!("File system problem: {}", e),
            SalesError::CsvError(_) | SalesError::SerializationError(_) => {
                "Could not export the sales grid".to_string()
            }
            SalesError::ConfigError { message } => format!("Configuration problem: {}", message),
            SalesError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Label => {
                "Use one of the fixed month or department names (case does not matter)".to_string()
            }
            ErrorCategory::Input => {
                "Provide one whitespace-separated integer per requested amount".to_string()
            }
            ErrorCategory::Io => "Check that the paths exist and are accessible".to_string(),
            ErrorCategory::Output => "Check the export format and output directory".to_string(),
            ErrorCategory::Configuration => {
                "Check the script file against the documented TOML layout".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SalesError>;
