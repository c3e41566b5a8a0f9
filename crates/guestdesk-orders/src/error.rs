use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersError {
    #[error("JSON deserialization error for orders body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("orders endpoint returned HTML; the session is likely not authenticated")]
    HtmlResponse,

    #[error("orders response contained no parsable items. Sample: {sample}")]
    NoParsableItems { sample: String },
}
