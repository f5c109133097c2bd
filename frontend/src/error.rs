use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum LandingError {
    #[error("no global window available")]
    MissingWindow,
    #[error("window has no document")]
    MissingDocument,
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error("invalid landing config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for LandingError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        LandingError::Dom(message)
    }
}
