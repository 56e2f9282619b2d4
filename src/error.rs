use std::fmt;

use rusqlite;
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

/// Message shown when the catalog could not be reached or returned garbage.
pub const GENERIC_CONNECTIVITY_MESSAGE: &str =
    "Unable to connect to the activity catalog. Check your connection and try again.";

/// Message shown when the bounded catalog wait expired.
pub const TIMEOUT_MESSAGE: &str = "The search took too long to respond. Try again in a moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorCode {
    Unreachable,
    HttpTimeout,
    InvalidResponse,
    Rejected,
    Unknown,
}

impl CatalogErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogErrorCode::Unreachable => "CATALOG_UNREACHABLE",
            CatalogErrorCode::HttpTimeout => "HTTP_TIMEOUT",
            CatalogErrorCode::InvalidResponse => "INVALID_RESPONSE",
            CatalogErrorCode::Rejected => "CATALOG_REJECTED",
            CatalogErrorCode::Unknown => "UNKNOWN_CATALOG_ERROR",
        }
    }
}

impl fmt::Display for CatalogErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error: {message}")]
    Database { message: String },

    #[error("record not found")]
    NotFound,

    #[error("validation failed: {message}")]
    Validation {
        message: String,
        details: Option<JsonValue>,
    },

    #[error("{message}")]
    Catalog {
        code: CatalogErrorCode,
        message: String,
        correlation_id: Option<String>,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, "validation error");
        AppError::Validation {
            message,
            details: None,
        }
    }

    pub fn validation_with_details(message: impl Into<String>, details: JsonValue) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, details = %details, "validation error with details");
        AppError::Validation {
            message,
            details: Some(details),
        }
    }

    pub fn catalog(code: CatalogErrorCode, message: impl Into<String>) -> Self {
        Self::catalog_with_correlation(code, message, None)
    }

    pub fn catalog_with_correlation(
        code: CatalogErrorCode,
        message: impl Into<String>,
        correlation_id: Option<&str>,
    ) -> Self {
        let message = message.into();
        match correlation_id {
            Some(id) => {
                warn!(target: "app::catalog::error", code = %code, correlation_id = %id, %message);
            }
            None => {
                warn!(target: "app::catalog::error", code = %code, %message);
            }
        }

        AppError::Catalog {
            code,
            message,
            correlation_id: correlation_id.map(|value| value.to_string()),
        }
    }

    pub fn catalog_code(&self) -> Option<CatalogErrorCode> {
        match self {
            AppError::Catalog { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn catalog_correlation_id(&self) -> Option<&str> {
        match self {
            AppError::Catalog { correlation_id, .. } => correlation_id.as_deref(),
            _ => None,
        }
    }

    /// Collapses any failure into the string surfaced next to the search
    /// results: catalog rejections keep the API wording verbatim, timeouts get
    /// their own hint, everything else becomes the generic connectivity line.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Catalog {
                code: CatalogErrorCode::Rejected,
                message,
                ..
            } => message.clone(),
            AppError::Catalog {
                code: CatalogErrorCode::HttpTimeout,
                ..
            } => TIMEOUT_MESSAGE.to_string(),
            _ => GENERIC_CONNECTIVITY_MESSAGE.to_string(),
        }
    }

    pub fn not_found() -> Self {
        warn!(target: "app::database", "resource not found");
        AppError::NotFound
    }

    pub fn database(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::database", %message, "database error");
        AppError::Database { message }
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::other", %message, "other error");
        AppError::Other(message)
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(error: rusqlite::Error) -> Self {
        use rusqlite::Error::QueryReturnedNoRows;

        match &error {
            QueryReturnedNoRows => AppError::not_found(),
            _ => {
                error!(target: "app::database", error = ?error, "sqlite error");
                AppError::database(error.to_string())
            }
        }
    }
}
