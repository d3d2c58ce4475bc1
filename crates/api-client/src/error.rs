use trackingtags_core::CatalogError;

/// Why a remote document could not be loaded.
///
/// `Network`, `Timeout` and `Status` are transport failures; `Parse` means
/// the body arrived but was not a usable document.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid catalog: {0}")]
    Parse(#[from] CatalogError),

    #[error("invalid version manifest: {0}")]
    Manifest(#[source] serde_json::Error),
}

impl FetchError {
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout | Self::Status { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Manifest(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
