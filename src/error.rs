use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ProposalError {
    #[error("no global window available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("nothing to mount into: {0}")]
    NoMountPoint(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("malformed configuration JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl From<JsValue> for ProposalError {
    fn from(value: JsValue) -> Self {
        ProposalError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<ProposalError> for JsValue {
    fn from(err: ProposalError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
