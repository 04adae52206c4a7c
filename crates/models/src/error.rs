/// Errors from the model clients and image storage.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The model service returned a non-2xx status code.
    #[error("Model API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered but produced nothing usable.
    #[error("Model returned an empty response")]
    EmptyResponse,

    /// The payload could not be decoded (bad base64, unknown image format).
    #[error("Failed to decode model output: {0}")]
    Decode(String),

    /// Writing a rendered image to disk failed.
    #[error("Image storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Return the response unchanged on 2xx, otherwise [`ModelError::Api`]
/// carrying the status and body text.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ModelError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(ModelError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
