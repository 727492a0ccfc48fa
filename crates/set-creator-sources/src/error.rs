use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("No URL Provided")]
    NoUrl,

    #[error("URL Invalid: {0}")]
    InvalidUrl(String),

    /// Provider-specific URL parsing failure, message is complete
    #[error("{0}")]
    ParseUrl(String),

    #[error("({status}) {reason}")]
    Http { status: u16, reason: String },

    /// Never carries the request URL, which may hold an API key
    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    #[error("{provider} Error: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} Error: {message}")]
    EmptyList {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} Error: {message}")]
    NotFound {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} Error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        SourceError::Request(e.without_url())
    }
}

impl SourceError {
    pub fn empty_list(provider: &'static str, message: impl Into<String>) -> Self {
        SourceError::EmptyList {
            provider,
            message: message.into(),
        }
    }

    /// "Invalid Response", with the offending body appended when there is one
    pub fn invalid_response(provider: &'static str, body: Option<&str>) -> Self {
        let message = match body {
            Some(body) => format!("Invalid Response {}", body),
            None => "Invalid Response".to_string(),
        };
        SourceError::InvalidResponse { provider, message }
    }

    pub fn not_found(provider: &'static str, message: impl Into<String>) -> Self {
        SourceError::NotFound {
            provider,
            message: message.into(),
        }
    }

    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        SourceError::Provider {
            provider,
            message: message.into(),
        }
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, SourceError::EmptyList { .. })
    }
}
