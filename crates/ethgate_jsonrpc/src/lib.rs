#![warn(missing_docs)]

//! Ethereum JSON-RPC envelope types

use serde::{Deserialize, Serialize};

/// A JSON-RPC 2.0 request id.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Id {
    /// A numeric id.
    Num(u64),
    /// A string id.
    Str(String),
}

/// The JSON-RPC protocol version. Only 2.0 is supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Version {
    /// Version 2.0 of the JSON-RPC specification.
    #[serde(rename = "2.0")]
    V2_0,
}

/// A single JSON-RPC request, as handed over by the surrounding pipeline.
///
/// The pipeline may attach fields beyond the envelope proper, such as the
/// origin of the request or vendor extensions. Those are captured on
/// deserialization so that [`Request::normalized`] can strip them before the
/// request goes back on the wire.
#[derive(Clone, Debug, Deserialize)]
pub struct Request {
    /// The request id.
    pub id: Id,
    /// The protocol version.
    pub jsonrpc: Version,
    /// The method name.
    pub method: String,
    /// The method parameters.
    #[serde(default)]
    pub params: Vec<serde_json::Value>,
    /// Origin the pipeline attributes the request to.
    #[serde(default)]
    pub origin: Option<String>,
    /// Remaining fields. Never forwarded.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Request {
    /// Constructs a request with the given id, method and parameters.
    pub fn new(id: Id, method: impl Into<String>, params: Vec<serde_json::Value>) -> Self {
        Self {
            id,
            jsonrpc: Version::V2_0,
            method: method.into(),
            params,
            origin: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Borrows the subset of fields that makes up the JSON-RPC envelope.
    ///
    /// Strict nodes reject requests carrying unknown keys, so this is the
    /// only shape that ever leaves the process.
    pub fn normalized(&self) -> NormalizedRequest<'_> {
        NormalizedRequest {
            id: &self.id,
            jsonrpc: self.jsonrpc,
            method: &self.method,
            params: &self.params,
        }
    }
}

/// The serializable projection of a [`Request`]: exactly `id`, `jsonrpc`,
/// `method` and `params`.
#[derive(Clone, Debug, Serialize)]
pub struct NormalizedRequest<'req> {
    /// The request id.
    pub id: &'req Id,
    /// The protocol version.
    pub jsonrpc: Version,
    /// The method name.
    pub method: &'req str,
    /// The method parameters.
    pub params: &'req [serde_json::Value],
}

/// The response sink the middleware writes into, mirroring the `{result,
/// error}` shape of the JSON-RPC convention.
///
/// At most one of the two fields is meaningfully populated, and each request
/// writes the sink at most once.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Response {
    /// The result value, if the call succeeded.
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// The error value, if the gateway reported one.
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn normalized_request_strips_pipeline_fields() {
        let request: Request = serde_json::from_value(json!({
            "id": 1,
            "jsonrpc": "2.0",
            "method": "eth_getBalance",
            "params": ["0xab", "latest"],
            "origin": "https://example.com",
            "walletInternal": true,
        }))
        .expect("request should deserialize");

        assert_eq!(request.origin.as_deref(), Some("https://example.com"));
        assert_eq!(request.extra.len(), 1);

        let forwarded =
            serde_json::to_value(request.normalized()).expect("request should serialize");
        assert_eq!(
            forwarded,
            json!({
                "id": 1,
                "jsonrpc": "2.0",
                "method": "eth_getBalance",
                "params": ["0xab", "latest"],
            })
        );
    }

    #[test]
    fn id_accepts_numbers_and_strings() {
        assert_eq!(
            serde_json::from_value::<Id>(json!(7)).expect("numeric id"),
            Id::Num(7)
        );
        assert_eq!(
            serde_json::from_value::<Id>(json!("seven")).expect("string id"),
            Id::Str("seven".to_string())
        );
    }

    #[test]
    fn version_is_the_literal_2_0() {
        assert_eq!(
            serde_json::to_value(Version::V2_0).expect("version should serialize"),
            json!("2.0")
        );
        assert!(serde_json::from_value::<Version>(json!("1.0")).is_err());
    }

    #[test]
    fn params_default_to_empty() {
        let request: Request = serde_json::from_value(json!({
            "id": "a",
            "jsonrpc": "2.0",
            "method": "eth_blockNumber",
        }))
        .expect("request should deserialize");

        assert!(request.params.is_empty());
        assert!(request.origin.is_none());
    }

    #[test]
    fn response_parses_from_a_gateway_body() {
        let response: Response = serde_json::from_str(
            r#"{"id":1,"jsonrpc":"2.0","result":"0x10","error":null}"#,
        )
        .expect("body should parse");

        assert_eq!(response.result, Some(json!("0x10")));
        assert_eq!(response.error, None);
    }
}
