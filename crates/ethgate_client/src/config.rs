use url::Url;

/// Network whose gateway is targeted when none is configured.
pub const DEFAULT_NETWORK: &str = "mainnet";

/// Attempt budget applied when none is configured.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Construction-time options of the gateway client.
///
/// Immutable once the client is constructed.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Network whose gateway endpoint requests are forwarded to.
    pub network: String,
    /// Upper bound on fetch attempts per request. Must be at least 1;
    /// validated at construction.
    pub max_attempts: u32,
    /// Attribution label identifying the calling application to the gateway.
    pub source: Option<String>,
    /// Target the staging gateway instead of the production one.
    pub dev_mode: bool,
    /// Replaces the base URL derived from `network` and `dev_mode` (scheme,
    /// host and path prefix). The credential path segment and any
    /// method-specific suffix still apply.
    pub gateway_override: Option<Url>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            source: None,
            dev_mode: false,
            gateway_override: None,
        }
    }
}
