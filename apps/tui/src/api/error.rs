/// Fetch failure taxonomy. Network and status failures trigger the next
/// fallback tier (or a silent no-op at the last tier); parse failures skip
/// the affected feature.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Error {
    pub fn status(status: reqwest::StatusCode, url: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }
}
