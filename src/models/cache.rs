use std::future::Future;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use tokio::sync::watch;

use crate::error::RollingError;
use crate::models::client::RollingApi;
use crate::models::message::MessageList;
use crate::models::page::Page;
use crate::models::post::{Post, PostId};
use crate::models::reaction::Reaction;

type Fetch<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, RollingError>> + Send + Sync>;

/// Ticket handed out when a refresh starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// In-memory copy of one remote resource. Clones share the same copy.
///
/// Every refresh takes a [`Generation`]; a result is only applied when its
/// generation is newer than the last one applied, so a slow response can never
/// overwrite a fresher one.
pub struct Provider<T> {
    name: &'static str,
    fetch: Fetch<T>,
    issued: Arc<AtomicU64>,
    applied: Arc<Mutex<u64>>,
    value: Arc<watch::Sender<Option<T>>>,
}

impl<T> Clone for Provider<T> {
    fn clone(&self) -> Self {
        Provider {
            name: self.name,
            fetch: Arc::clone(&self.fetch),
            issued: Arc::clone(&self.issued),
            applied: Arc::clone(&self.applied),
            value: Arc::clone(&self.value),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Provider<T> {
    pub fn new<F, Fut>(name: &'static str, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, RollingError>> + Send + 'static,
    {
        let (value, _) = watch::channel(None);
        Provider {
            name,
            fetch: Arc::new(move || -> BoxFuture<'static, Result<T, RollingError>> { Box::pin(fetch()) }),
            issued: Arc::new(AtomicU64::new(0)),
            applied: Arc::new(Mutex::new(0)),
            value: Arc::new(value),
        }
    }

    pub fn get(&self) -> Option<T> {
        self.value.borrow().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.value.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.value.subscribe()
    }

    pub fn begin(&self) -> Generation {
        Generation(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Stores `value` unless a newer generation already landed.
    pub fn commit(&self, generation: Generation, value: T) -> bool {
        let mut applied = self.applied.lock().unwrap_or_else(|e| e.into_inner());
        if generation.0 <= *applied {
            log::debug!("{}: dropping stale generation {} (have {})", self.name, generation.0, *applied);
            return false;
        }
        *applied = generation.0;
        self.value.send_replace(Some(value));
        true
    }

    /// Re-fetches the resource. On failure the previous value stays in place.
    pub async fn refresh(&self) -> Result<bool, RollingError> {
        let generation = self.begin();
        match (self.fetch)().await {
            Ok(value) => Ok(self.commit(generation, value)),
            Err(e) => {
                log::warn!("{}: refresh failed: {}", self.name, e);
                Err(e)
            }
        }
    }
}

/// The three read models of one post, keyed by its id.
#[derive(Clone)]
pub struct PostResources {
    pub post_id: PostId,
    pub post: Provider<Post>,
    pub reactions: Provider<Page<Reaction>>,
    pub messages: Provider<MessageList>,
    page_size: Arc<AtomicU32>,
}

impl PostResources {
    pub fn new(api: Arc<dyn RollingApi>, post_id: PostId, page_size: u32) -> Self {
        let page_size = Arc::new(AtomicU32::new(page_size.max(1)));

        let post = {
            let api = Arc::clone(&api);
            Provider::new("post", move || {
                let api = Arc::clone(&api);
                async move { api.fetch_post(post_id).await }
            })
        };

        let reactions = {
            let api = Arc::clone(&api);
            Provider::new("reactions", move || {
                let api = Arc::clone(&api);
                async move { api.fetch_reactions(post_id).await }
            })
        };

        let messages = {
            let api = Arc::clone(&api);
            let page_size = Arc::clone(&page_size);
            Provider::new("messages", move || {
                let api = Arc::clone(&api);
                let limit = page_size.load(Ordering::SeqCst);
                async move { api.fetch_messages(post_id, limit).await }
            })
        };

        PostResources {
            post_id,
            post,
            reactions,
            messages,
            page_size,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.load(Ordering::SeqCst)
    }

    /// Grows the message window by `step`; takes effect on the next refresh.
    pub fn grow_page(&self, step: u32) -> u32 {
        self.page_size.fetch_add(step.max(1), Ordering::SeqCst) + step.max(1)
    }

    /// Refreshes everything concurrently, logging failures.
    pub async fn refresh_all(&self) {
        let (post, reactions, messages) = futures::join!(
            self.post.refresh(),
            self.reactions.refresh(),
            self.messages.refresh()
        );
        for (name, result) in [("post", post), ("reactions", reactions), ("messages", messages)] {
            if let Err(e) = result {
                log::warn!("initial load of {} for post {} failed: {}", name, self.post_id, e);
            }
        }
    }
}
