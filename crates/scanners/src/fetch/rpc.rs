//! JSON-RPC envelope types for the single get-code call.
//!
//! Envelope interpretation is pure so the error paths are testable without
//! sockets; the HTTP transport lives in [`super::HttpChainSource`].

use crate::error::Error;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: Vec<String>,
    pub id: u32,
}

impl RpcRequest {
    pub fn get_code(address: &str) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "eth_getCode",
            params: vec![address.to_string(), "latest".to_string()],
            id: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<String>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// Interpret the envelope: an RPC-level error payload is a network failure,
/// and a missing result is treated the same way.
pub fn code_from_response(response: RpcResponse) -> Result<String, Error> {
    if let Some(err) = response.error {
        return Err(Error::Network(format!(
            "rpc error {}: {}",
            err.code, err.message
        )));
    }
    response
        .result
        .ok_or_else(|| Error::Network("rpc response carried neither result nor error".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_code_request_shape() {
        let req = RpcRequest::get_code("0xabc");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["method"], "eth_getCode");
        assert_eq!(json["params"][1], "latest");
    }

    #[test]
    fn result_envelope_yields_code() {
        let resp: RpcResponse = serde_json::from_str(r#"{"result":"0x6080"}"#).unwrap();
        assert_eq!(code_from_response(resp).unwrap(), "0x6080");
    }

    #[test]
    fn error_envelope_is_a_network_error() {
        let resp: RpcResponse =
            serde_json::from_str(r#"{"error":{"code":-32000,"message":"boom"}}"#).unwrap();
        let err = code_from_response(resp).unwrap_err();
        assert!(matches!(err, Error::Network(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn empty_envelope_is_a_network_error() {
        let resp: RpcResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(code_from_response(resp), Err(Error::Network(_))));
    }
}
