//! reqwest-backed implementation of [`PostsApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::blog::{Post, PostDraft};
use crate::config::ApiConfig;

use super::client::PostsApi;
use super::error::{ApiError, ValidationErrors};

/// JSON-over-HTTP posts API rooted at `{base_url}/posts`.
pub struct HttpPostsApi {
    client: Client,
    base_url: String,
    collection_url: Url,
    request_timeout: Duration,
}

impl HttpPostsApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let request_timeout = Duration::from_secs(u64::from(config.timeout_seconds));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .timeout(request_timeout)
            .build()
            .map_err(ApiError::Build)?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let raw = format!("{base_url}/posts");
        let collection_url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            url: raw.clone(),
            message: e.to_string(),
        })?;
        if collection_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: raw,
                message: "URL cannot carry path segments".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url,
            collection_url,
            request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> Url {
        self.collection_url.clone()
    }

    /// `{base_url}/posts/{id}` with the id percent-encoded as one segment.
    fn item_url(&self, post_id: &str) -> Result<Url, ApiError> {
        let mut url = self.collection_url();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl {
                url: self.collection_url.to_string(),
                message: "URL cannot carry path segments".to_string(),
            })?
            .push(post_id);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: Url,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let url = url.to_string();
        tracing::debug!(url = %url, "Sending request");
        let response = builder.send().await.map_err(|source| {
            if source.is_timeout() {
                ApiError::Timeout {
                    url: url.clone(),
                    duration: self.request_timeout.as_secs(),
                }
            } else {
                ApiError::Connection {
                    url: url.clone(),
                    source,
                }
            }
        })?;

        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }
}

/// Map non-success statuses to errors; 422 carries validation details.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(status = status.as_u16(), error = %e, "Failed to read error body");
            Default::default()
        }
    };
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        return Err(ApiError::Validation(ValidationErrors::from_body(&body)));
    }

    Err(ApiError::Status {
        status: status.as_u16(),
        message: String::from_utf8_lossy(&body).into_owned(),
    })
}

#[async_trait]
impl PostsApi for HttpPostsApi {
    async fn fetch_all(&self) -> Result<Vec<Post>, ApiError> {
        let url = self.collection_url();
        let builder = self.client.get(url.clone());
        self.send(url, builder).await
    }

    async fn create(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        let url = self.collection_url();
        let builder = self.client.post(url.clone()).json(draft);
        self.send(url, builder).await
    }

    async fn update(&self, post_id: &str, post: &Post) -> Result<Post, ApiError> {
        let url = self.item_url(post_id)?;
        let builder = self.client.put(url.clone()).json(post);
        self.send(url, builder).await
    }

    async fn delete(&self, post_id: &str) -> Result<Post, ApiError> {
        let url = self.item_url(post_id)?;
        let builder = self.client.delete(url.clone());
        self.send(url, builder).await
    }
}
