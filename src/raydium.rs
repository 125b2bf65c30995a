use crate::error::{Result, SwapError};
use crate::interface::{ParsedPool, Pool, PoolList};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the Raydium liquidity pool directory.
pub struct PoolDirectory {
    reqwest_client: Client,
    url: String,
}

impl PoolDirectory {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            reqwest_client: Client::new(),
            url: url.into(),
        }
    }

    async fn get<T: DeserializeOwned>(&self) -> Result<T> {
        let response = self.reqwest_client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SwapError::Network(format!(
                "failed to get raydium pools; status_code={}",
                status.as_u16()
            )));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Downloads the full official + unofficial pool list.
    pub async fn fetch_pools(&self) -> Result<PoolList> {
        let pools: PoolList = self.get().await?;
        debug!(
            "Fetched {} official and {} unofficial pools",
            pools.official.len(),
            pools.un_official.len()
        );
        Ok(pools)
    }

    /// # Errors
    /// `NotFound` if no pool in the directory has this id.
    pub async fn find_pool_by_id(&self, id: &str) -> Result<Pool> {
        let pools = self.fetch_pools().await?;
        pools.find_by_id(id).cloned()
    }

    pub async fn parsed_pools(&self) -> Result<Vec<ParsedPool>> {
        self.fetch_pools().await?.parsed()
    }
}
