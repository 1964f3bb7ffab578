//! Translation of a JSON-RPC request into an outbound HTTP request.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use ethgate_jsonrpc::Request;
use hyper::{
    HeaderMap,
    header::{self, HeaderValue},
};
use reqwest::Method;
use url::Url;

use crate::{
    config::GatewayConfig,
    credentials::Credentials,
    error::GatewayError,
    method::{CacheHint, Dispatch, dispatch_for},
};

/// Production gateway domain.
const GATEWAY_DOMAIN: &str = "infura.io";
/// Staging gateway domain, selected by `dev_mode`.
const STAGING_GATEWAY_DOMAIN: &str = "infura-dev.io";
/// Path prefix in front of the project credential segment.
const GATEWAY_PATH_PREFIX: &str = "v3";

/// Header carrying the stringified params of a block-by-number request.
const GET_BLOCK_HEADER: &str = "X-Eth-Get-Block";
/// Boolean-valued header marking a latest-block request.
const LATEST_BLOCK_HEADER: &str = "X-Eth-Block";
/// Attribution header identifying the calling application and the request
/// origin to the gateway.
const SOURCE_HEADER: &str = "Infura-Source";

/// Origin attributed to requests the pipeline did not label.
const DEFAULT_ORIGIN: &str = "internal";

/// An outbound HTTP request, ready for the transport.
#[derive(Clone, Debug)]
pub struct FetchRequest {
    /// Fully-composed request URL.
    pub url: Url,
    /// HTTP verb.
    pub method: Method,
    /// Outbound headers.
    pub headers: HeaderMap,
    /// JSON body, for POST dispatches only.
    pub body: Option<String>,
}

/// Builds the outbound HTTP request for a single RPC request.
///
/// The request is normalized down to its envelope fields before the cache
/// hint, the body, or the query string is derived from it.
pub(crate) fn build_fetch_request(
    config: &GatewayConfig,
    request: &Request,
    credentials: &Credentials,
) -> Result<FetchRequest, GatewayError> {
    let normalized = request.normalized();

    match dispatch_for(&request.method) {
        Dispatch::Post { cache_hint } => {
            let mut url = base_url(config)?;
            push_segment(&mut url, &credentials.project_id);

            let mut headers = HeaderMap::new();
            headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            if let Some(source) = &config.source {
                headers.insert(SOURCE_HEADER, attribution_value(source, request)?);
            }
            match cache_hint {
                Some(CacheHint::BlockParams) => {
                    let params = serde_json::to_string(normalized.params)
                        .map_err(GatewayError::InvalidJsonRequest)?;
                    headers.insert(GET_BLOCK_HEADER, header_value(GET_BLOCK_HEADER, &params)?);
                }
                Some(CacheHint::LatestBlock) => {
                    headers.insert(LATEST_BLOCK_HEADER, HeaderValue::from_static("true"));
                }
                None => {}
            }
            if let Some(secret_key) = &credentials.secret_key {
                headers.insert(header::AUTHORIZATION, basic_auth_value(secret_key)?);
            }

            let body =
                serde_json::to_string(&normalized).map_err(GatewayError::InvalidJsonRequest)?;

            Ok(FetchRequest {
                url,
                method: Method::POST,
                headers,
                body: Some(body),
            })
        }
        Dispatch::Get => {
            let mut url = base_url(config)?;
            push_segment(&mut url, &credentials.project_id);
            push_segment(&mut url, normalized.method);

            let params = serde_json::to_string(normalized.params)
                .map_err(GatewayError::InvalidJsonRequest)?;
            url.query_pairs_mut().append_pair("params", &params);

            let mut headers = HeaderMap::new();
            if let Some(source) = &config.source {
                headers.insert(SOURCE_HEADER, attribution_value(source, request)?);
            }

            Ok(FetchRequest {
                url,
                method: Method::GET,
                headers,
                body: None,
            })
        }
    }
}

fn base_url(config: &GatewayConfig) -> Result<Url, GatewayError> {
    if let Some(url) = &config.gateway_override {
        return Ok(url.clone());
    }

    let domain = if config.dev_mode {
        STAGING_GATEWAY_DOMAIN
    } else {
        GATEWAY_DOMAIN
    };

    let url = format!(
        "https://{network}.{domain}/{GATEWAY_PATH_PREFIX}",
        network = config.network
    );
    Ok(Url::parse(&url)?)
}

fn push_segment(url: &mut Url, segment: &str) {
    url.path_segments_mut()
        .expect("gateway URLs are validated to be base URLs at construction")
        .pop_if_empty()
        .push(segment);
}

/// `{source}/{origin}`, attributing the request to the calling application.
fn attribution_value(source: &str, request: &Request) -> Result<HeaderValue, GatewayError> {
    let origin = request.origin.as_deref().unwrap_or(DEFAULT_ORIGIN);
    header_value(SOURCE_HEADER, &format!("{source}/{origin}"))
}

fn basic_auth_value(secret_key: &str) -> Result<HeaderValue, GatewayError> {
    let encoded = BASE64.encode(format!(":{secret_key}"));
    header_value("Authorization", &format!("Basic {encoded}"))
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, GatewayError> {
    HeaderValue::from_str(value).map_err(|error| GatewayError::InvalidHeaderValue { name, error })
}
