use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// A record value whose shape has no XML mapping
    #[error("Found an element which could not be transformed: {field}")]
    UnknownElement { field: String },
    /// Failed to parse XML or JSON content
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Invalid input format or configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
}

impl AppError {
    /// Shorthand for an [`AppError::UnknownElement`] naming `field`.
    pub fn unknown_element(field: &str) -> Self {
        AppError::UnknownElement {
            field: field.to_string(),
        }
    }
}

// Conversion implementations for common errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<quick_xml::Error> for AppError {
    fn from(err: quick_xml::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(format!("Invalid JSON: {err}"))
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
