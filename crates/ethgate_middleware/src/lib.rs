#![warn(missing_docs)]

//! Middleware forwarding JSON-RPC requests to a remote HTTP gateway
//!
//! The surrounding RPC pipeline hands each request to
//! [`ForwardingMiddleware::handle`], which translates it into an HTTP call
//! against the configured gateway, retries transient failures, and populates
//! the response envelope in place.

use ethgate_client::GatewayClient;
pub use ethgate_client::{
    CreationError, Credentials, CredentialsProvider, GatewayConfig, GatewayError,
    StaticCredentials,
};
use ethgate_jsonrpc::{Request, Response};

/// The boundary object exposed to the surrounding RPC pipeline.
///
/// Each [`handle`](Self::handle) call is independent; the only state shared
/// between concurrent calls is the lazily-populated credentials cache.
pub struct ForwardingMiddleware {
    client: GatewayClient,
}

impl ForwardingMiddleware {
    /// Creates the middleware, validating the configuration before any
    /// request is processed.
    pub fn new(
        config: GatewayConfig,
        credentials: Box<dyn CredentialsProvider>,
    ) -> Result<Self, CreationError> {
        Ok(Self {
            client: GatewayClient::new(config, credentials)?,
        })
    }

    /// Handles a single request: forwards it to the gateway and populates
    /// `response` in place.
    ///
    /// Credentials are populated first if still empty; the lookup may
    /// legitimately stay empty while the host environment is initializing,
    /// in which case the next call re-queries it. A fatal failure, or a
    /// transient one that consumed the whole attempt budget, surfaces
    /// through the returned error and leaves `response` untouched.
    pub async fn handle(
        &self,
        request: &Request,
        response: &mut Response,
    ) -> Result<(), GatewayError> {
        self.client.fetch(request, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_a_zero_attempt_budget() {
        let config = GatewayConfig {
            max_attempts: 0,
            ..GatewayConfig::default()
        };

        let error = ForwardingMiddleware::new(
            config,
            Box::new(StaticCredentials(Credentials::default())),
        )
        .err()
        .expect("a zero attempt budget must be rejected at construction");

        assert!(matches!(error, CreationError::InvalidMaxAttempts(0)));
    }
}
