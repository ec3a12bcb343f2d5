/// Why a presented token was rejected.
///
/// These kinds are internal. Callers collapse them into user-facing errors
/// before anything reaches a client.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Wrong structure, bad base64, or claims that fail to parse.
    #[error("token is malformed")]
    Malformed,
    /// Signature does not match the claims under the current key.
    #[error("token signature is invalid")]
    BadSignature,
    /// Signature is valid but `now >= exp`.
    #[error("token has expired")]
    Expired,
    #[error("failed to encode token claims: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl TokenError {
    /// Stable label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed",
            TokenError::BadSignature => "bad_signature",
            TokenError::Expired => "expired",
            TokenError::Encoding(_) => "encoding",
        }
    }
}
