use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RollingError;
use crate::models::message::{MessageId, MessageList};
use crate::models::page::Page;
use crate::models::post::{Post, PostId};
use crate::models::reaction::{Reaction, ReactionRequest};

/// Calls the page makes against the rolling-paper backend.
#[async_trait]
pub trait RollingApi: Send + Sync {
    async fn fetch_post(&self, post_id: PostId) -> Result<Post, RollingError>;

    async fn fetch_reactions(&self, post_id: PostId) -> Result<Page<Reaction>, RollingError>;

    async fn fetch_messages(&self, post_id: PostId, limit: u32) -> Result<MessageList, RollingError>;

    async fn add_reaction(&self, post_id: PostId, emoji: &str) -> Result<(), RollingError>;

    async fn delete_message(&self, message_id: MessageId) -> Result<(), RollingError>;

    async fn delete_post(&self, post_id: PostId) -> Result<(), RollingError>;
}

/// Thin JSON-over-HTTP wrapper rooted at the API base URL.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RollingError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RollingError> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, &url)?;
        Ok(response.json::<T>().await?)
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), RollingError> {
        let url = self.url(path);
        log::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        check_status(response, &url)?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), RollingError> {
        let url = self.url(path);
        log::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        check_status(response, &url)?;
        Ok(())
    }
}

fn check_status(response: reqwest::Response, url: &str) -> Result<reqwest::Response, RollingError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        log::warn!("{} answered {}", url, status);
        Err(RollingError::Api {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

pub fn post_path(post_id: PostId) -> String {
    format!("recipients/{}/", post_id)
}

pub fn reactions_path(post_id: PostId) -> String {
    format!("recipients/{}/reactions/", post_id)
}

pub fn messages_path(post_id: PostId, limit: u32) -> String {
    format!("recipients/{}/messages/?limit={}&offset=0", post_id, limit)
}

pub fn message_path(message_id: MessageId) -> String {
    format!("messages/{}/", message_id)
}

#[async_trait]
impl RollingApi for HttpClient {
    async fn fetch_post(&self, post_id: PostId) -> Result<Post, RollingError> {
        self.get(&post_path(post_id)).await
    }

    async fn fetch_reactions(&self, post_id: PostId) -> Result<Page<Reaction>, RollingError> {
        self.get(&reactions_path(post_id)).await
    }

    async fn fetch_messages(&self, post_id: PostId, limit: u32) -> Result<MessageList, RollingError> {
        self.get(&messages_path(post_id, limit)).await
    }

    async fn add_reaction(&self, post_id: PostId, emoji: &str) -> Result<(), RollingError> {
        self.post(&reactions_path(post_id), &ReactionRequest::increase(emoji)).await
    }

    async fn delete_message(&self, message_id: MessageId) -> Result<(), RollingError> {
        self.delete(&message_path(message_id)).await
    }

    async fn delete_post(&self, post_id: PostId) -> Result<(), RollingError> {
        self.delete(&post_path(post_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_onto_base() {
        let client = HttpClient::new("https://api.example/2-1/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "https://api.example/2-1");
        assert_eq!(client.url(&post_path(7)), "https://api.example/2-1/recipients/7/");
        assert_eq!(client.url("/messages/3/"), "https://api.example/2-1/messages/3/");
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(reactions_path(7), "recipients/7/reactions/");
        assert_eq!(messages_path(7, 20), "recipients/7/messages/?limit=20&offset=0");
        assert_eq!(message_path(31), "messages/31/");
    }
}
