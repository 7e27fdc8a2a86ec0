//! HTTP adapter for the product service
//!
//! `GET {base}/product/{id}` with the caller's `Token` header. The service
//! answers with a `{code, message, data}` envelope where `code == 0` means
//! success.

use async_trait::async_trait;
use serde::Deserialize;
use shared::models::ProductSnapshot;
use std::time::Duration;

use super::{LookupError, ProductAuthority};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    data: Option<ProductSnapshot>,
}

/// Product authority reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpProductAuthority {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProductAuthority {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ProductAuthority for HttpProductAuthority {
    async fn get_product(
        &self,
        product_id: i64,
        credential: &str,
    ) -> Result<ProductSnapshot, LookupError> {
        let url = format!("{}/product/{}", self.base_url, product_id);

        let resp = self
            .client
            .get(&url)
            .header("Token", credential)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let envelope: Envelope = resp
            .json()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        if envelope.code != 0 {
            return Err(LookupError::Rejected {
                code: envelope.code,
                message: envelope.message,
            });
        }

        envelope.data.ok_or(LookupError::Empty)
    }
}
