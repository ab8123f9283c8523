use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicU64;
use thiserror::Error;

use crate::{provider::ProviderError, rpc::common::*};

static LOCALHOST: &str = "http://127.0.0.1:9650";

/// Errors raised while moving a request over HTTP
#[derive(Debug, Error)]
pub enum FetchError {
    /// Serde issue
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),

    /// Reqwest issue
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
}

impl From<FetchError> for ProviderError {
    fn from(e: FetchError) -> ProviderError {
        let from_parsing = matches!(e, FetchError::SerdeError(_));
        ProviderError::Custom {
            from_parsing,
            e: Box::new(e),
        }
    }
}

#[derive(Debug)]
/// An HTTP Transport for JSON RPC
pub struct HttpTransport {
    id: AtomicU64,
    url: String,
    client: reqwest::Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(LOCALHOST)
    }
}

impl HttpTransport {
    /// Instantiate a transport for the node at `url`, e.g. `http://127.0.0.1:9650`
    pub fn new(url: &str) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    /// Instantiate a transport with a preconfigured client
    pub fn with_client(url: &str, client: reqwest::Client) -> Self {
        Self {
            id: 1.into(),
            url: url.trim_end_matches('/').to_owned(),
            client,
        }
    }

    /// The node's base URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl JsonRpcTransport for HttpTransport {
    fn id(&self) -> &AtomicU64 {
        &self.id
    }

    /// Sends a POST request to `endpoint` with the provided method and the params serialized
    /// as JSON
    #[tracing::instrument(skip(self, params), fields(id), err)]
    async fn request<T: Serialize + Send + Sync, R: for<'a> Deserialize<'a>>(
        &self,
        endpoint: &str,
        method: &str,
        params: T,
    ) -> Result<R, ProviderError> {
        let next_id = self.next_id();
        tracing::Span::current().record("id", next_id);

        let payload = Request::new(next_id, method, params);

        let res = self
            .client
            .post(format!("{}{}", self.url, endpoint))
            .json(&payload)
            .send()
            .await
            .map_err(Into::<FetchError>::into)?;
        let body = res.text().await.map_err(Into::<FetchError>::into)?;
        tracing::trace!(%body, "rpc response");
        let res: Response<R> = serde_json::from_str(&body).map_err(Into::<FetchError>::into)?;
        Ok(res.data.into_result()?)
    }
}
