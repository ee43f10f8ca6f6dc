use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input is not valid UTF-8: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    #[error("Malformed record: {reason}")]
    MalformedRecord { reason: String },

    #[error("No email column found in the first record")]
    ColumnNotFound,

    #[error("No records provided")]
    EmptyInput,

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("{stage} stage failed: {source}")]
    StageError {
        stage: &'static str,
        #[source]
        source: Box<ImportError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ImportError {
    /// Wraps the error with the name of the pipeline stage it escaped from.
    /// Already-wrapped errors keep their original stage.
    pub fn in_stage(self, stage: &'static str) -> Self {
        match self {
            ImportError::StageError { .. } => self,
            other => ImportError::StageError {
                stage,
                source: Box::new(other),
            },
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ImportError::IoError(_) => ErrorCategory::Io,
            ImportError::CsvError(_)
            | ImportError::SerializationError(_)
            | ImportError::EncodingError(_)
            | ImportError::MalformedRecord { .. }
            | ImportError::ColumnNotFound
            | ImportError::EmptyInput
            | ImportError::ProcessingError { .. } => ErrorCategory::Data,
            ImportError::ConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. } => ErrorCategory::Config,
            ImportError::StageError { source, .. } => source.category(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ImportError::IoError(_) => ErrorSeverity::Critical,
            ImportError::MalformedRecord { .. } => ErrorSeverity::Low,
            ImportError::CsvError(_)
            | ImportError::SerializationError(_)
            | ImportError::EncodingError(_)
            | ImportError::ColumnNotFound
            | ImportError::EmptyInput
            | ImportError::ProcessingError { .. } => ErrorSeverity::High,
            ImportError::ConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. } => ErrorSeverity::High,
            ImportError::StageError { source, .. } => source.severity(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::IoError(e) => format!("Could not read or write a file: {}", e),
            ImportError::EncodingError(_) => {
                "The input file is not valid UTF-8 text".to_string()
            }
            ImportError::ColumnNotFound => {
                "Could not find an email column in the first row of the input".to_string()
            }
            ImportError::EmptyInput => "The input file contains no records".to_string(),
            ImportError::StageError { stage, source } => {
                format!("{} ({} stage)", source.user_friendly_message(), stage)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ImportError::IoError(_) => {
                "Check that the path exists and that you have permission to access it"
            }
            ImportError::EncodingError(_) => "Re-export the customer file as UTF-8",
            ImportError::ColumnNotFound => {
                "Make sure the first row has an 'email' header or an email-shaped field"
            }
            ImportError::EmptyInput => "Point --input at a non-empty customer export",
            ImportError::ConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. } => "Run with --help to see valid options",
            ImportError::StageError { source, .. } => source.recovery_suggestion(),
            _ => "Re-run with --verbose for more detail",
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_stage_wraps_once() {
        let err = ImportError::EmptyInput.in_stage("transform").in_stage("load");
        match err {
            ImportError::StageError { stage, source } => {
                assert_eq!(stage, "transform");
                assert!(matches!(*source, ImportError::EmptyInput));
            }
            other => panic!("expected StageError, got {:?}", other),
        }
    }

    #[test]
    fn test_stage_error_delegates_severity_and_category() {
        let err = ImportError::ColumnNotFound.in_stage("transform");
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.category(), ErrorCategory::Data);
    }
}
