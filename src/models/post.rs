use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::message::Message;
use crate::models::reaction::Reaction;

pub type PostId = u64;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub name: String,
    #[serde(default)]
    pub background_color: String,
    #[serde(rename = "backgroundImageURL", default)]
    pub background_image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message_count: u64,
    #[serde(default)]
    pub recent_messages: Vec<Message>,
    #[serde(default)]
    pub reaction_count: u64,
    #[serde(default)]
    pub top_reactions: Vec<Reaction>,
}

impl Post {
    /// Public address of this post on the web front-end.
    pub fn address(web_base_url: &str, id: PostId) -> String {
        format!("{}/post/{}", web_base_url.trim_end_matches('/'), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recipient() {
        let json = r#"{
            "id": 7,
            "name": "Ava",
            "backgroundColor": "beige",
            "backgroundImageURL": null,
            "createdAt": "2023-10-31T01:02:03Z",
            "messageCount": 3,
            "recentMessages": [
                {
                    "id": 31,
                    "recipientId": 7,
                    "sender": "김하은",
                    "profileImageURL": "https://example.com/a.png",
                    "relationship": "친구",
                    "content": "hi",
                    "createdAt": "2023-11-01T08:05:25Z"
                }
            ],
            "reactionCount": 4,
            "topReactions": [{ "id": 1, "emoji": "👍", "count": 4 }]
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.name, "Ava");
        assert_eq!(post.background_image_url, None);
        assert_eq!(post.message_count, 3);
        assert_eq!(post.recent_messages[0].profile_image_url, "https://example.com/a.png");
        assert_eq!(post.top_reactions[0].count, 4);
    }

    #[test]
    fn address_strips_trailing_slash() {
        assert_eq!(Post::address("https://rolling.example/", 7), "https://rolling.example/post/7");
    }
}
