use ethgate_jsonrpc::{Request, Response};
use reqwest::Client as HttpClient;

use crate::{
    config::GatewayConfig,
    credentials::{Credentials, CredentialsCache, CredentialsProvider},
    error::{CreationError, GatewayError},
    method::GET_BLOCK_BY_NUMBER,
    request::{FetchRequest, build_fetch_request},
    retry::with_retries,
};

/// Raw body the gateway sends for a missing block instead of a JSON-RPC
/// null result.
const MISSING_BLOCK_BODY: &str = "Not Found";

/// A client that forwards JSON-RPC requests to a remote HTTP gateway,
/// retrying transient failures up to a bounded attempt budget.
pub struct GatewayClient {
    config: GatewayConfig,
    credentials: CredentialsCache,
    http: HttpClient,
}

impl GatewayClient {
    /// Creates a new client backed by `provider` for its credentials.
    ///
    /// Fails if the configuration is unusable; nothing is validated at call
    /// time.
    pub fn new(
        config: GatewayConfig,
        provider: Box<dyn CredentialsProvider>,
    ) -> Result<Self, CreationError> {
        if config.max_attempts == 0 {
            return Err(CreationError::InvalidMaxAttempts(config.max_attempts));
        }
        if let Some(url) = &config.gateway_override {
            if url.cannot_be_a_base() {
                return Err(CreationError::InvalidGatewayOverride(url.clone()));
            }
        }

        Ok(Self {
            config,
            credentials: CredentialsCache::new(provider),
            http: HttpClient::new(),
        })
    }

    /// Forwards `request` to the gateway and writes the outcome into
    /// `response`.
    ///
    /// Credentials are populated first if the cache is still empty. The
    /// response sink is written exactly once, after the attempt loop has
    /// reached a terminal state; failures surface through the returned error
    /// instead.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip_all, fields(method = %request.method))
    )]
    pub async fn fetch(
        &self,
        request: &Request,
        response: &mut Response,
    ) -> Result<(), GatewayError> {
        let credentials = self.credentials.ensure_populated().await;

        let outcome = with_retries(self.config.max_attempts, || {
            self.fetch_once(request, &credentials)
        })
        .await?;

        response.result = outcome.result;
        response.error = outcome.error;
        Ok(())
    }

    /// Performs exactly one HTTP round trip for `request`.
    ///
    /// The entire body is read as text before any parsing; failure
    /// classification and the missing-block special case both work on the
    /// raw text.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    async fn fetch_once(
        &self,
        request: &Request,
        credentials: &Credentials,
    ) -> Result<Response, GatewayError> {
        let FetchRequest {
            url,
            method,
            headers,
            body,
        } = build_fetch_request(&self.config, request, credentials)?;

        let mut outbound = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            outbound = outbound.body(body);
        }

        let reply = outbound.send().await.map_err(GatewayError::FailedToSend)?;
        let status = reply.status();
        let raw_body = reply
            .text()
            .await
            .map_err(GatewayError::CorruptedResponse)?;

        if !status.is_success() {
            return Err(match status.as_u16() {
                405 => GatewayError::MethodNotSupported,
                418 => GatewayError::RateLimited,
                503 | 504 => GatewayError::GatewayTimeout,
                _ => GatewayError::OpaqueUpstream {
                    status,
                    body: raw_body,
                },
            });
        }

        // The gateway reports a missing block with a plain-text body rather
        // than a JSON-RPC null result.
        if request.method == GET_BLOCK_BY_NUMBER && raw_body == MISSING_BLOCK_BODY {
            return Ok(Response {
                result: Some(serde_json::Value::Null),
                error: None,
            });
        }

        serde_json::from_str(&raw_body).map_err(|error| GatewayError::MalformedBody { error })
    }
}
