//! Provider error types.

use crate::domain::RouteId;

/// Errors from a transit data provider.
///
/// During graph builds these are logged and swallowed per line/stop (a
/// failed fetch degrades coverage, it never aborts the build).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The provider has no such route
    #[error("unknown route: {0}")]
    UnknownRoute(RouteId),

    /// Network description file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Network description was syntactically valid but semantically broken
    #[error("invalid network data: {0}")]
    InvalidData(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProviderError::UnknownRoute(RouteId::from("R9"));
        assert_eq!(err.to_string(), "unknown route: R9");

        let err = ProviderError::Api {
            status: 503,
            message: "upstream down".into(),
        };
        assert_eq!(err.to_string(), "API error 503: upstream down");

        let err = ProviderError::InvalidData("line M1 references no routes".into());
        assert!(err.to_string().contains("invalid network data"));
    }
}
