use std::time::Duration;

use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::error::{ProviderError, Result};

/// Used when a provider is built without an explicit timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    let version = env!("CARGO_PKG_VERSION");
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(format!("songsearch/{version}"))
        .build()?)
}

/// GETs `url` and returns the body of a successful response.
pub(crate) async fn get_text(client: &Client, url: Url) -> Result<String> {
    debug!("Request: GET {}", url);
    let response = client.get(url).send().await?;
    read_body(response).await
}

async fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    if status.is_success() {
        Ok(response.text().await?)
    } else {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error body".to_string());
        Err(ProviderError::Api {
            status: status.as_u16(),
            message: text,
        })
    }
}
