//! Typed failures of the gateway fetch pipeline.

use url::Url;

/// Substrings of a failure's text that mark it as retriable.
///
/// Only consulted for failures whose site this crate does not control:
/// socket errors surfaced through `reqwest` and opaque upstream bodies.
/// Failures raised by this crate itself are classified by variant.
const RETRIABLE_PHRASES: &[&str] = &["Gateway timeout", "ETIMEDOUT", "ECONNRESET", "SyntaxError"];

/// Error raised when the client is constructed with unusable options.
#[derive(Debug, thiserror::Error)]
pub enum CreationError {
    /// `max_attempts` was zero.
    #[error("invalid value for max_attempts: {0}; must be a positive integer")]
    InvalidMaxAttempts(u32),

    /// The gateway override URL cannot carry path segments.
    #[error("invalid gateway override: '{0}' cannot be a base URL")]
    InvalidGatewayOverride(Url),
}

/// Failures a gateway fetch can produce.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request could not be sent to the remote gateway.
    #[error("failed to send request: {0}")]
    FailedToSend(reqwest::Error),

    /// The gateway failed to reply with the body of the response.
    #[error("the response text was corrupted: {0}")]
    CorruptedResponse(reqwest::Error),

    /// The gateway does not support the requested method (HTTP 405).
    #[error("the method does not exist / is not available")]
    MethodNotSupported,

    /// The gateway is rate limiting this client (HTTP 418).
    #[error("Request is being rate limited.")]
    RateLimited,

    /// The gateway took too long to process the request (HTTP 503/504).
    #[error(
        "Gateway timeout. The request took too long to process. This can happen when querying logs over too wide a block range."
    )]
    GatewayTimeout,

    /// The gateway answered with a non-success status this crate has no
    /// specific knowledge of. The raw body text is preserved verbatim.
    #[error("unexpected gateway response (HTTP {status}): {body}")]
    OpaqueUpstream {
        /// Status code of the reply.
        status: reqwest::StatusCode,
        /// Raw body text of the reply.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("failed to parse the response body: {error}")]
    MalformedBody {
        /// The parse error.
        error: serde_json::Error,
    },

    /// The request cannot be serialized as JSON.
    #[error(transparent)]
    InvalidJsonRequest(serde_json::Error),

    /// A computed header value contained characters HTTP forbids.
    #[error("invalid value for header '{name}': {error}")]
    InvalidHeaderValue {
        /// Name of the offending header.
        name: &'static str,
        /// The underlying error.
        error: hyper::header::InvalidHeaderValue,
    },

    /// Invalid URL format
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    /// All fetch attempts were consumed by transient failures.
    #[error(
        "gateway client cannot complete request, all {attempts} attempts exhausted; original error: {original}"
    )]
    ExhaustedRetries {
        /// The attempt budget that was consumed.
        attempts: u32,
        /// Text of the last transient failure.
        original: String,
    },
}

impl GatewayError {
    /// Whether another fetch attempt may succeed.
    ///
    /// Failures raised by this crate are classified by kind. Failures
    /// originating in the transport layer or in the gateway's hands are
    /// classified by matching their text against [`RETRIABLE_PHRASES`],
    /// preserving the externally observed retry behavior.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::RateLimited
            | GatewayError::GatewayTimeout
            | GatewayError::MalformedBody { .. } => true,
            GatewayError::FailedToSend(error) | GatewayError::CorruptedResponse(error) => {
                contains_retriable_phrase(&error.to_string())
            }
            GatewayError::OpaqueUpstream { body, .. } => contains_retriable_phrase(body),
            GatewayError::MethodNotSupported
            | GatewayError::InvalidJsonRequest(_)
            | GatewayError::InvalidHeaderValue { .. }
            | GatewayError::InvalidUrl(_)
            | GatewayError::ExhaustedRetries { .. } => false,
        }
    }
}

fn contains_retriable_phrase(text: &str) -> bool {
    RETRIABLE_PHRASES.iter().any(|phrase| text.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(body: &str) -> GatewayError {
        GatewayError::OpaqueUpstream {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: body.to_string(),
        }
    }

    #[test]
    fn gateway_raised_failures_classify_by_kind() {
        assert!(GatewayError::RateLimited.is_transient());
        assert!(GatewayError::GatewayTimeout.is_transient());
        assert!(!GatewayError::MethodNotSupported.is_transient());

        let parse_error =
            serde_json::from_str::<serde_json::Value>("<html>").expect_err("not JSON");
        assert!(GatewayError::MalformedBody { error: parse_error }.is_transient());
    }

    #[test]
    fn opaque_bodies_classify_by_phrase() {
        assert!(opaque("connect ETIMEDOUT 127.0.0.1:443").is_transient());
        assert!(opaque("read ECONNRESET").is_transient());
        assert!(opaque("SyntaxError: unexpected token <").is_transient());
        assert!(opaque("Gateway timeout").is_transient());

        assert!(!opaque("permission denied").is_transient());
        // Case-sensitive on purpose.
        assert!(!opaque("gateway timeout").is_transient());
    }

    #[test]
    fn exhausted_retries_is_terminal() {
        let error = GatewayError::ExhaustedRetries {
            attempts: 5,
            original: "connect ETIMEDOUT".to_string(),
        };
        assert!(!error.is_transient());
        assert!(error.to_string().contains("connect ETIMEDOUT"));
        assert!(error.to_string().contains("all 5 attempts exhausted"));
    }
}
