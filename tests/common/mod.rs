#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use rollingtui::clipboard::Clipboard;
use rollingtui::locale::Locale;
use rollingtui::models::{Message, MessageId, MessageList, Page, Post, PostId, Reaction};
use rollingtui::{Config, PageController, RollingApi, RollingError};

pub const POST_ID: PostId = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchPost(PostId),
    FetchReactions(PostId),
    FetchMessages(PostId, u32),
    AddReaction(PostId, String),
    DeleteMessage(MessageId),
    DeletePost(PostId),
}

impl Call {
    pub fn is_write(&self) -> bool {
        matches!(self, Call::AddReaction(..) | Call::DeleteMessage(_) | Call::DeletePost(_))
    }
}

/// In-memory backend that records every call.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    pub post: Mutex<Option<Post>>,
    pub reactions: Mutex<Vec<Reaction>>,
    pub messages: Mutex<Option<Vec<Message>>>,
    pub fail_writes: AtomicBool,
    /// Held by a test to park writes mid-flight.
    pub write_gate: tokio::sync::Mutex<()>,
}

pub fn message(id: MessageId, sender: &str) -> Message {
    Message {
        id,
        recipient_id: POST_ID,
        sender: sender.to_string(),
        profile_image_url: format!("https://img.example/{}.png", id),
        relationship: "동료".to_string(),
        content: format!("note from {}", sender),
        font: Some("Pretendard".to_string()),
        created_at: Utc.with_ymd_and_hms(2023, 11, 1, 8, 5, 25).unwrap(),
    }
}

pub fn post() -> Post {
    Post {
        id: POST_ID,
        name: "Ava".to_string(),
        background_color: "beige".to_string(),
        background_image_url: None,
        created_at: None,
        message_count: 2,
        recent_messages: vec![message(31, "Sam")],
        reaction_count: 1,
        top_reactions: vec![Reaction { id: 1, emoji: "👍".into(), count: 1 }],
    }
}

impl FakeApi {
    pub fn with_post() -> Arc<Self> {
        let api = FakeApi::default();
        *api.post.lock().unwrap() = Some(post());
        *api.reactions.lock().unwrap() = vec![Reaction { id: 1, emoji: "👍".into(), count: 1 }];
        *api.messages.lock().unwrap() = Some(vec![message(31, "Sam"), message(32, "Kim")]);
        Arc::new(api)
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(FakeApi::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn write_result(&self) -> Result<(), RollingError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(RollingError::Api { status: 500, url: "http://api.test".into() })
        } else {
            Ok(())
        }
    }
}

fn not_found(what: &str) -> RollingError {
    RollingError::Api { status: 404, url: format!("http://api.test/{}", what) }
}

#[async_trait]
impl RollingApi for FakeApi {
    async fn fetch_post(&self, post_id: PostId) -> Result<Post, RollingError> {
        self.record(Call::FetchPost(post_id));
        let post = self.post.lock().unwrap().clone();
        post.ok_or_else(|| not_found("post"))
    }

    async fn fetch_reactions(&self, post_id: PostId) -> Result<Page<Reaction>, RollingError> {
        self.record(Call::FetchReactions(post_id));
        Ok(Page::from_results(self.reactions.lock().unwrap().clone()))
    }

    async fn fetch_messages(&self, post_id: PostId, limit: u32) -> Result<MessageList, RollingError> {
        self.record(Call::FetchMessages(post_id, limit));
        let messages = self.messages.lock().unwrap().clone().ok_or_else(|| not_found("messages"))?;
        let total = messages.len() as u64;
        let results: Vec<Message> = messages.into_iter().take(limit as usize).collect();
        let next = if (results.len() as u64) < total {
            Some(format!("/recipients/{}/messages/?limit={}&offset={}", post_id, limit, limit))
        } else {
            None
        };
        Ok(Page { count: total, next, previous: None, results })
    }

    async fn add_reaction(&self, post_id: PostId, emoji: &str) -> Result<(), RollingError> {
        self.record(Call::AddReaction(post_id, emoji.to_string()));
        let _gate = self.write_gate.lock().await;
        self.write_result()?;
        let mut reactions = self.reactions.lock().unwrap();
        match reactions.iter_mut().find(|r| r.emoji == emoji) {
            Some(r) => r.count += 1,
            None => reactions.push(Reaction { id: 99, emoji: emoji.to_string(), count: 1 }),
        }
        Ok(())
    }

    async fn delete_message(&self, message_id: MessageId) -> Result<(), RollingError> {
        self.record(Call::DeleteMessage(message_id));
        let _gate = self.write_gate.lock().await;
        self.write_result()?;
        if let Some(messages) = self.messages.lock().unwrap().as_mut() {
            messages.retain(|m| m.id != message_id);
        }
        Ok(())
    }

    async fn delete_post(&self, post_id: PostId) -> Result<(), RollingError> {
        self.record(Call::DeletePost(post_id));
        let _gate = self.write_gate.lock().await;
        self.write_result()?;
        *self.post.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FakeClipboard {
    pub writes: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl FakeClipboard {
    pub fn broken() -> Self {
        FakeClipboard { fail: true, ..FakeClipboard::default() }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl Clipboard for FakeClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), RollingError> {
        self.writes.lock().unwrap().push(text.to_string());
        if self.fail {
            Err(RollingError::Clipboard("no display".into()))
        } else {
            Ok(())
        }
    }
}

pub fn config() -> Config {
    Config {
        web_base_url: "http://web.test".to_string(),
        locale: Locale::Ko,
        ..Config::default()
    }
}

pub fn controller(api: &Arc<FakeApi>, clipboard: &FakeClipboard, config: &Config) -> PageController {
    let api: Arc<dyn RollingApi> = api.clone();
    PageController::new(POST_ID, api, Box::new(clipboard.clone()), config)
}

/// Controller with all three resources fetched and the load calls cleared.
pub async fn loaded(api: &Arc<FakeApi>, clipboard: &FakeClipboard) -> PageController {
    let c = controller(api, clipboard, &config());
    c.refresh_all().await;
    api.take_calls();
    c
}
