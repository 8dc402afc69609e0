use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("pagination limit reached for {url}: exceeded {max_pages} pages")]
    PaginationLimit { url: String, max_pages: usize },

    #[error("failed to write artifact {path}: {source}")]
    ArtifactIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact serialization error: {0}")]
    ArtifactSerialize(#[from] serde_json::Error),
}
