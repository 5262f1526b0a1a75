use async_trait::async_trait;

/// Retrieves the raw body behind a URL.
///
/// Implementations must treat a non-success HTTP status as an error.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>>;
}
