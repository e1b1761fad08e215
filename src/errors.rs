use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpinError {
    #[error("Cannot parse '{text}' as a number in locale {locale}")]
    ParseFailure { text: String, locale: String },

    #[error("Unknown locale: {id}")]
    UnknownLocale { id: String },

    #[error("Settings error: {message}")]
    SettingsError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, SpinError>;

impl SpinError {
    pub fn parse_failure(text: &str, locale: &str) -> Self {
        SpinError::ParseFailure {
            text: text.to_string(),
            locale: locale.to_string(),
        }
    }

    /// Returns true if the user can fix this by editing the input again
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SpinError::ParseFailure { .. } | SpinError::UnknownLocale { .. }
        )
    }

    /// Returns an error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SpinError::ParseFailure { .. } => "PARSE_FAILURE",
            SpinError::UnknownLocale { .. } => "UNKNOWN_LOCALE",
            SpinError::SettingsError { .. } => "SETTINGS_ERROR",
            SpinError::IoError { .. } => "IO_ERROR",
            SpinError::JsonError { .. } => "JSON_ERROR",
        }
    }
}
