use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("extraction backend is not configured (OPENROUTER_API_KEY is unset)")]
    Unconfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("extraction request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("extraction backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("extraction backend returned no message content")]
    EmptyResponse,

    #[error("no JSON array found in extraction response")]
    NoJsonArray,
}
