//! Error handling for domain-scout

use thiserror::Error;

/// Main error type for domain-scout
#[derive(Error, Debug, Clone)]
pub enum ScoutError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("No prompts found for category: {category}")]
    NoPromptsFound { category: String },

    #[error("Lookup error for '{domain}': {message}")]
    Lookup {
        domain: String,
        message: String,
        method: Option<String>,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ScoutError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing-prompts error
    pub fn no_prompts(category: impl Into<String>) -> Self {
        Self::NoPromptsFound {
            category: category.into(),
        }
    }

    /// Create a lookup error
    pub fn lookup(
        domain: impl Into<String>,
        message: impl Into<String>,
        method: Option<String>,
    ) -> Self {
        Self::Lookup {
            domain: domain.into(),
            message: message.into(),
            method,
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or environment", message)
            }
            Self::NoPromptsFound { category } => {
                format!("❌ No prompts found for category: {}\n💡 See prompts.yml for available categories", category)
            }
            Self::Lookup { domain, message, .. } => {
                format!("⚠️  Could not look up domain '{}': {}", domain, message)
            }
            Self::Network { message, status_code, .. } => {
                let status = status_code.map_or(String::new(), |c| format!(" ({})", c));
                format!("❌ Network error{}: {}\n💡 Check your internet connection", status, message)
            }
            Self::Timeout { operation, timeout_secs } => {
                format!("⏱️  Operation '{}' timed out after {}s", operation, timeout_secs)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}\n💡 Check the file format", message)
            }
            Self::Validation { message } => {
                format!("❌ Validation error: {}\n💡 Check your input format", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

/// Why a generative call produced nothing usable.
///
/// These never abort an attempt; the name generator logs them and switches
/// to its rule-based fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Rate limited (429): {message}")]
    RateLimited { message: String },

    #[error("Unauthorized (401): {message}")]
    Unauthorized { message: String },

    #[error("Bad request (400): {message}")]
    BadRequest { message: String },

    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

impl GenerationError {
    /// Classify a non-success HTTP status from a provider
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let message = body.into();
        match status {
            429 => Self::RateLimited { message },
            401 => Self::Unauthorized { message },
            400 => Self::BadRequest { message },
            _ => Self::Unexpected {
                message: format!("HTTP {}: {}", status, message),
            },
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Short operator hint for logs
    pub fn hint(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => "please wait and try again",
            Self::Unauthorized { .. } => "check API key validity",
            Self::BadRequest { .. } => "invalid request format",
            Self::Unexpected { .. } => "unexpected failure",
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        match err.status().map(|s| s.as_u16()) {
            Some(code) => Self::from_status(code, err.to_string()),
            None if err.is_timeout() => Self::unexpected("HTTP request timed out"),
            None => Self::unexpected(err.to_string()),
        }
    }
}

impl From<serde_yaml::Error> for ScoutError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse(format!("Invalid YAML: {}", err), None)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::ScoutError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ScoutError::config(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_from_status() {
        assert!(matches!(GenerationError::from_status(429, "slow down"), GenerationError::RateLimited { .. }));
        assert!(matches!(GenerationError::from_status(401, "bad key"), GenerationError::Unauthorized { .. }));
        assert!(matches!(GenerationError::from_status(400, "bad body"), GenerationError::BadRequest { .. }));

        let err = GenerationError::from_status(503, "down");
        assert!(matches!(err, GenerationError::Unexpected { .. }));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_user_messages() {
        let err = ScoutError::no_prompts("curling");
        assert!(err.to_string().contains("curling"));
        assert!(err.user_message().contains("prompts.yml"));

        let err = config_error!("missing {}", "OPENAI_API_KEY");
        assert!(err.user_message().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_yaml_error_becomes_parse_error() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("key: value").unwrap_err();
        let err: ScoutError = yaml_err.into();
        assert!(matches!(err, ScoutError::Parse { .. }));
        assert!(err.to_string().contains("Invalid YAML"));
    }
}
