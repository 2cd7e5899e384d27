// Request/response shapes for transaction execution and contract deployment.
// The connector accepts and returns these but does not act on them; payloads
// stay opaque JSON so no particular signing or fee model is implied.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTransactionRequest {
    #[serde(default)]
    pub signing_credential: Value,
    #[serde(default)]
    pub transaction_config: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTransactionResponse {
    #[serde(default)]
    pub transaction_receipt: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployContractInkRequest {
    #[serde(default)]
    pub signing_credential: Value,
    /// Hex-encoded contract code.
    #[serde(default)]
    pub wasm: String,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub constructor_args: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployContractInkResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub transaction_receipt: Value,
}
