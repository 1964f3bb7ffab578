#![warn(missing_docs)]

//! HTTP client forwarding Ethereum JSON-RPC requests to a remote gateway

mod client;
mod config;
mod credentials;
mod error;
mod method;
mod request;
mod retry;

pub use hyper::{HeaderMap, header};

pub use self::{
    client::GatewayClient,
    config::{DEFAULT_MAX_ATTEMPTS, DEFAULT_NETWORK, GatewayConfig},
    credentials::{Credentials, CredentialsCache, CredentialsProvider, StaticCredentials},
    error::{CreationError, GatewayError},
    request::FetchRequest,
};
