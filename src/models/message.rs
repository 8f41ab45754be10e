use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::models::page::Page;
use crate::models::post::PostId;

pub type MessageId = u64;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    #[serde(default)]
    pub recipient_id: PostId,
    pub sender: String,
    #[serde(rename = "profileImageURL", default)]
    pub profile_image_url: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub font: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Date shown on cards and in the modal, in local time.
    pub fn created_label(&self) -> String {
        let local: DateTime<Local> = DateTime::from(self.created_at);
        local.format("%Y.%m.%d").to_string()
    }

    /// Single-letter stand-in for the avatar image.
    pub fn initial(&self) -> String {
        self.sender
            .chars()
            .next()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

pub type MessageList = Page<Message>;

impl Page<Message> {
    pub fn find(&self, id: MessageId) -> Option<&Message> {
        self.results.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.find(id).is_some()
    }
}
