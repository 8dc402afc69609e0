use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::CatalogError;

/// Maximum number of pages to fetch per collection.
/// Prevents infinite loops on a misbehaving upstream.
const MAX_PAGES: usize = 200;

/// HTTP client for the upstream catalog API.
///
/// Fetches the `products` and `variations` collections with page-number
/// pagination, surfacing rate limiting (429), not-found (404), and other
/// non-2xx responses as typed errors. Records come back as raw
/// `serde_json::Value`s so the import loop can decode them one at a time.
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches every page of the `products` collection.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_collection`].
    pub async fn fetch_products(
        &self,
        base_url: &str,
        per_page: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<Value>, CatalogError> {
        self.fetch_collection(base_url, "products", per_page, inter_request_delay_ms)
            .await
    }

    /// Fetches every page of the `variations` collection.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_collection`].
    pub async fn fetch_variants(
        &self,
        base_url: &str,
        per_page: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<Value>, CatalogError> {
        self.fetch_collection(base_url, "variations", per_page, inter_request_delay_ms)
            .await
    }

    /// Pages through `GET {base}/{resource}?per_page=N&page=K` until a short
    /// page signals the end of the collection.
    ///
    /// `inter_request_delay_ms` is applied between page requests (never
    /// before the first).
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RateLimited`] — HTTP 429, with the upstream's
    ///   `Retry-After` when present.
    /// - [`CatalogError::NotFound`] — HTTP 404.
    /// - [`CatalogError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`CatalogError::Http`] — network or TLS failure.
    /// - [`CatalogError::Deserialize`] — a page body that is not a JSON array.
    /// - [`CatalogError::PaginationLimit`] — more than [`MAX_PAGES`] pages.
    async fn fetch_collection(
        &self,
        base_url: &str,
        resource: &str,
        per_page: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<Value>, CatalogError> {
        let origin = base_url.trim_end_matches('/');
        let mut records: Vec<Value> = Vec::new();
        let mut page = 0usize;

        loop {
            page += 1;
            if page > MAX_PAGES {
                return Err(CatalogError::PaginationLimit {
                    url: format!("{origin}/{resource}"),
                    max_pages: MAX_PAGES,
                });
            }

            if page > 1 && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }

            let url = format!("{origin}/{resource}?per_page={per_page}&page={page}");
            let batch = self.fetch_page(&url, base_url, resource).await?;
            let batch_len = batch.len();
            records.extend(batch);

            // A short page is the end of the collection.
            if batch_len < per_page as usize {
                break;
            }
        }

        Ok(records)
    }

    async fn fetch_page(
        &self,
        url: &str,
        base_url: &str,
        resource: &str,
    ) -> Result<Vec<Value>, CatalogError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);

            return Err(CatalogError::RateLimited {
                domain: extract_domain(base_url),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<Vec<Value>>(&body).map_err(|e| CatalogError::Deserialize {
            context: format!("{resource} page from {base_url}"),
            source: e,
        })
    }
}

/// Extracts the hostname from the base URL for use in error messages.
///
/// Falls back to the full URL string if parsing fails.
fn extract_domain(base_url: &str) -> String {
    // Strip scheme and take up to the first `/`.
    let without_scheme = base_url
        .strip_prefix("https://")
        .or_else(|| base_url.strip_prefix("http://"))
        .unwrap_or(base_url);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(base_url)
        .to_owned()
}
