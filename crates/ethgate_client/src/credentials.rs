//! Lazily-populated gateway credentials.

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Credential pair identifying this client to the gateway.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Project identifier, carried as a path segment of every request URL.
    pub project_id: String,
    /// Secret key, sent as an authentication header when present.
    pub secret_key: Option<String>,
}

impl Credentials {
    /// Whether the pair has not been populated yet.
    pub fn is_empty(&self) -> bool {
        self.project_id.is_empty()
    }
}

/// External capability that looks up gateway credentials.
///
/// The lookup is asynchronous and may legitimately come back empty while the
/// host environment is still initializing its wallet integration; callers
/// re-query on the next request.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Looks up the current credentials, if any are available yet.
    async fn credentials(&self) -> Option<Credentials>;
}

/// Provider backed by credentials known up front.
#[derive(Clone, Debug)]
pub struct StaticCredentials(pub Credentials);

#[async_trait]
impl CredentialsProvider for StaticCredentials {
    async fn credentials(&self) -> Option<Credentials> {
        Some(self.0.clone())
    }
}

/// Cache of the gateway credentials, shared by every request that flows
/// through a client.
///
/// Population is idempotent and re-checked per call while the cache is still
/// empty. Concurrent first-use races are benign: the looked-up value is
/// stable for the process lifetime, so last write wins.
pub struct CredentialsCache {
    provider: Box<dyn CredentialsProvider>,
    cached: RwLock<Credentials>,
}

impl CredentialsCache {
    /// Creates an empty cache backed by `provider`.
    pub fn new(provider: Box<dyn CredentialsProvider>) -> Self {
        Self {
            provider,
            cached: RwLock::new(Credentials::default()),
        }
    }

    /// Returns the cached credentials, populating the cache first if it is
    /// still empty.
    ///
    /// An empty lookup result leaves the cache empty and the returned pair
    /// blank; the next call retries the lookup.
    pub async fn ensure_populated(&self) -> Credentials {
        {
            let cached = self.cached.read().await;
            if !cached.is_empty() {
                return cached.clone();
            }
        }

        if let Some(credentials) = self.provider.credentials().await {
            let mut cached = self.cached.write().await;
            *cached = credentials.clone();
            return credentials;
        }

        Credentials::default()
    }
}
