use std::error::Error;
use std::fmt;

use reqwest::StatusCode;

/// Failure modes shared by every upstream client. "No results" is not an
/// error; clients report that as an empty `Ok`, so callers can tell a quiet
/// provider from a broken one.
#[derive(Debug)]
pub enum ProviderError {
    MissingCredential(&'static str),
    Http(reqwest::Error),
    Status {
        provider: &'static str,
        status: StatusCode,
        body: String,
    },
    Decode {
        provider: &'static str,
        detail: String,
    },
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::MissingCredential(provider) => {
                write!(f, "{} credential not configured", provider)
            }
            ProviderError::Http(err) => write!(f, "HTTP error: {}", err),
            ProviderError::Status {
                provider,
                status,
                body,
            } => write!(f, "{} returned {}: {}", provider, status, body),
            ProviderError::Decode { provider, detail } => {
                write!(f, "{} response not understood: {}", provider, detail)
            }
        }
    }
}

impl Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Http(err)
    }
}

impl ProviderError {
    /// Non-2xx reply turned into a `Status` error, reading the body for the
    /// diagnostic when the provider sent one.
    pub async fn from_response(provider: &'static str, response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        ProviderError::Status {
            provider,
            status,
            body,
        }
    }
}
