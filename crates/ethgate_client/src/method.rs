//! Classification of RPC method names into their HTTP dispatch.

/// Method whose missing-block replies the gateway signals with a plain-text
/// body instead of a JSON-RPC null result.
pub(crate) const GET_BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";

const BLOCK_NUMBER: &str = "eth_blockNumber";

/// Methods that must travel as an HTTP POST. Everything else goes as a GET.
const POST_METHODS: &[&str] = &[
    BLOCK_NUMBER,
    GET_BLOCK_BY_NUMBER,
    "eth_call",
    "eth_estimateGas",
    "eth_sendRawTransaction",
];

/// Cache hint the gateway accepts alongside certain POST methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CacheHint {
    /// The requested block is named by the request params.
    BlockParams,
    /// The request targets the latest block.
    LatestBlock,
}

/// HTTP dispatch of a single RPC method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Dispatch {
    /// Forward as a GET with the params in the query string.
    Get,
    /// Forward as a POST with a JSON body.
    Post {
        /// Cache hint header to attach, if the method has one.
        cache_hint: Option<CacheHint>,
    },
}

/// Maps an RPC method name to its HTTP dispatch.
///
/// Total: unknown methods default to a GET without a cache hint.
pub(crate) fn dispatch_for(method: &str) -> Dispatch {
    if !POST_METHODS.contains(&method) {
        return Dispatch::Get;
    }

    let cache_hint = match method {
        GET_BLOCK_BY_NUMBER => Some(CacheHint::BlockParams),
        BLOCK_NUMBER => Some(CacheHint::LatestBlock),
        _ => None,
    };

    Dispatch::Post { cache_hint }
}
