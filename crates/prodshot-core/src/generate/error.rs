//! Errors from the generative collaborators.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Credential not configured; raised before any network call.
    #[error("missing {0}")]
    MissingApiKey(&'static str),

    #[error("transport: {0}")]
    Transport(#[from] curl::Error),

    #[error("building multipart form: {0}")]
    Form(#[from] curl::FormError),

    /// The API answered with a non-success status.
    #[error("API returned HTTP {status}: {body}")]
    Api { status: u32, body: String },

    #[error("decoding API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API response contained no text")]
    EmptyResponse,

    #[error("writing output: {0}")]
    Io(#[from] std::io::Error),
}
