use super::client::HttpClient;
use async_trait::async_trait;

pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        let resp = self.0.get(url).send().await?.error_for_status()?;
        Ok(resp.bytes().await?.to_vec())
    }
}
