use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortSpecError {
    #[error("Empty port specification")]
    EmptySpecification,

    #[error("Invalid port specification '{token}': {reason}")]
    InvalidFormat { token: String, reason: String },

    #[error("CSV format error in '{path}': {detail}")]
    CsvFormat { path: String, detail: String },

    #[error("CSV file not found: {path}")]
    CsvFileNotFound { path: String },

    #[error("Port and IMEI count mismatch: {ports} ports, {imeis} IMEIs")]
    ImeiCountMismatch { ports: usize, imeis: usize },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PortSpecError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Specification,
    CsvInput,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PortSpecError {
    pub fn invalid_format(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub fn csv_format(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::CsvFormat {
            path: path.into(),
            detail: detail.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptySpecification
            | Self::InvalidFormat { .. }
            | Self::ImeiCountMismatch { .. } => ErrorCategory::Specification,
            Self::CsvFormat { .. } | Self::CsvFileNotFound { .. } | Self::CsvError(_) => {
                ErrorCategory::CsvInput
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Specification | ErrorCategory::CsvInput => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::EmptySpecification => "Pass at least one port, e.g. '1A', '1-4' or '2.01-2.04'",
            Self::InvalidFormat { .. } => {
                "Ports are written as 1A..1D or 1.01..1.04; ranges must not mix the two notations"
            }
            Self::CsvFormat { .. } | Self::CsvError(_) => {
                "Check the CSV header row ('port' with optional 'slot', or 'imei') \
                 and the row contents"
            }
            Self::CsvFileNotFound { .. } => "Check the CSV file path and permissions",
            Self::ImeiCountMismatch { .. } => "Provide exactly one IMEI for each selected port",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file or drop --config to use the defaults"
            }
            Self::IoError(_) | Self::SerializationError(_) => {
                "Check file permissions and disk space"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidFormat { token, reason } => {
                format!("'{}' is not a valid port specification: {}", token, reason)
            }
            Self::ImeiCountMismatch { ports, imeis } => format!(
                "Got {} ports but {} IMEIs; they are paired one-to-one",
                ports, imeis
            ),
            other => other.to_string(),
        }
    }
}
