use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::clipboard::Clipboard;
use crate::controllers::notifications::Notifications;
use crate::error::RollingError;
use crate::locale::{Locale, Text};
use crate::models::{Config, Message, MessageId, Post, PostId, PostResources, RollingApi};

/// Where the page wants to go next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    WriteMessage(PostId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::WriteMessage(post_id) => format!("/post/{}/message", post_id),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub picker_visible: bool,
    pub show_reactions: bool,
    pub selected: Option<Message>,
    pub modal_open: bool,
    pub route: Option<Route>,
}

/// Keys for the in-flight guard.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Reaction(String),
    DeleteMessage(MessageId),
    DeletePost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Failed,
    /// Same action still pending, nothing was sent.
    Busy,
    /// Post or messages not loaded yet, nothing was sent.
    NotReady,
}

struct InFlightGuard {
    set: Arc<Mutex<HashSet<Action>>>,
    action: Action,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut set = self.set.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.action);
    }
}

/// Owns the post view's UI state and turns user actions into API calls.
///
/// Every write is followed by a refresh of the read model it touched; nothing
/// is mutated locally. Clones share all state, so handlers can be spawned.
#[derive(Clone)]
pub struct PageController {
    post_id: PostId,
    api: Arc<dyn RollingApi>,
    clipboard: Arc<Mutex<Box<dyn Clipboard>>>,
    resources: PostResources,
    ui: Arc<Mutex<UiState>>,
    notifications: Notifications,
    in_flight: Arc<Mutex<HashSet<Action>>>,
    locale: Locale,
    web_base_url: String,
    address: String,
    page_step: u32,
}

impl PageController {
    pub fn new(
        post_id: PostId,
        api: Arc<dyn RollingApi>,
        clipboard: Box<dyn Clipboard>,
        config: &Config,
    ) -> Self {
        let resources = PostResources::new(Arc::clone(&api), post_id, config.page_size());
        PageController {
            post_id,
            api,
            clipboard: Arc::new(Mutex::new(clipboard)),
            resources,
            ui: Arc::new(Mutex::new(UiState::default())),
            notifications: Notifications::default(),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            locale: config.locale,
            web_base_url: config.web_base_url.trim_end_matches('/').to_string(),
            address: Post::address(&config.web_base_url, post_id),
            page_step: config.page_size(),
        }
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Absolute web URL for a route of this front-end.
    pub fn url_for(&self, route: &Route) -> String {
        format!("{}{}", self.web_base_url, route.path())
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn resources(&self) -> &PostResources {
        &self.resources
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn ui(&self) -> UiState {
        self.ui.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn update_ui<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> R {
        let mut ui = self.ui.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut ui)
    }

    /// Both post and message data are present.
    pub fn is_ready(&self) -> bool {
        self.resources.post.is_loaded() && self.resources.messages.is_loaded()
    }

    fn begin(&self, action: Action) -> Option<InFlightGuard> {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(action.clone()) {
            log::debug!("{:?} already in flight", action);
            return None;
        }
        Some(InFlightGuard {
            set: Arc::clone(&self.in_flight),
            action,
        })
    }

    pub fn is_in_flight(&self, action: &Action) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(action)
    }

    fn report_failure(&self, what: &str, err: &RollingError) {
        if err.is_remote() {
            log::warn!("{} on post {} failed: {}", what, self.post_id, err);
        } else {
            log::error!("{} on post {} failed: {}", what, self.post_id, err);
        }
        self.notifications.error(self.locale.text(Text::Failure));
    }

    pub async fn refresh_all(&self) {
        self.resources.refresh_all().await
    }

    pub async fn send_reaction(&self, emoji: &str) -> Outcome {
        let outcome = self.try_send_reaction(emoji).await;
        self.update_ui(|ui| ui.picker_visible = false);
        outcome
    }

    async fn try_send_reaction(&self, emoji: &str) -> Outcome {
        if !self.is_ready() {
            return Outcome::NotReady;
        }
        let Some(_guard) = self.begin(Action::Reaction(emoji.to_string())) else {
            return Outcome::Busy;
        };

        match self.api.add_reaction(self.post_id, emoji).await {
            Ok(()) => {
                log::info!("reacted {} on post {}", emoji, self.post_id);
                let _ = futures::join!(
                    self.resources.post.refresh(),
                    self.resources.reactions.refresh()
                );
                Outcome::Done
            }
            Err(e) => {
                self.report_failure("reaction", &e);
                Outcome::Failed
            }
        }
    }

    /// Looks the message up among the fetched ones and opens it in the modal.
    /// Returns `None`, leaving the UI untouched, when the id is unknown.
    pub fn card_clicked(&self, message_id: MessageId) -> Option<Message> {
        let messages = self.resources.messages.get()?;
        let message = messages.find(message_id)?.clone();
        self.update_ui(|ui| {
            ui.selected = Some(message.clone());
            ui.modal_open = true;
        });
        Some(message)
    }

    pub async fn on_delete(&self, message_id: MessageId) -> Outcome {
        if !self.is_ready() {
            return Outcome::NotReady;
        }
        let Some(_guard) = self.begin(Action::DeleteMessage(message_id)) else {
            return Outcome::Busy;
        };

        match self.api.delete_message(message_id).await {
            Ok(()) => {
                log::info!("deleted message {} from post {}", message_id, self.post_id);
                // The modal is left as is, even when it shows this message
                let _ = self.resources.messages.refresh().await;
                Outcome::Done
            }
            Err(e) => {
                self.report_failure("message delete", &e);
                Outcome::Failed
            }
        }
    }

    pub async fn on_post_delete(&self) -> Outcome {
        if !self.is_ready() {
            return Outcome::NotReady;
        }
        let Some(_guard) = self.begin(Action::DeletePost) else {
            return Outcome::Busy;
        };

        match self.api.delete_post(self.post_id).await {
            Ok(()) => {
                log::info!("deleted post {}", self.post_id);
                self.navigate(Route::Home);
                Outcome::Done
            }
            Err(e) => {
                self.report_failure("post delete", &e);
                Outcome::Failed
            }
        }
    }

    pub fn copy_to_clipboard(&self) -> Outcome {
        let result = {
            let mut clipboard = self.clipboard.lock().unwrap_or_else(|e| e.into_inner());
            clipboard.write_text(&self.address)
        };

        match result {
            Ok(()) => {
                self.notifications.success(self.locale.text(Text::CopySuccess));
                Outcome::Done
            }
            Err(e) => {
                log::error!("copying {} failed: {}", self.address, e);
                self.notifications.error(self.locale.text(Text::CopyFailure));
                Outcome::Failed
            }
        }
    }

    pub async fn load_more_messages(&self) -> Outcome {
        let has_more = self
            .resources
            .messages
            .get()
            .map(|page| page.has_more())
            .unwrap_or(false);
        if !has_more {
            return Outcome::Done;
        }

        let limit = self.resources.grow_page(self.page_step);
        log::debug!("loading up to {} messages for post {}", limit, self.post_id);
        match self.resources.messages.refresh().await {
            Ok(_) => Outcome::Done,
            Err(e) => {
                self.report_failure("loading messages", &e);
                Outcome::Failed
            }
        }
    }

    pub fn toggle_picker(&self) {
        self.update_ui(|ui| ui.picker_visible = !ui.picker_visible);
    }

    pub fn toggle_reactions(&self) {
        self.update_ui(|ui| ui.show_reactions = !ui.show_reactions);
    }

    pub fn close_modal(&self) {
        self.update_ui(|ui| ui.modal_open = false);
    }

    pub fn write_message(&self) {
        self.navigate(Route::WriteMessage(self.post_id));
    }

    fn navigate(&self, route: Route) {
        log::debug!("navigating to {}", route.path());
        self.update_ui(|ui| ui.route = Some(route));
    }

    pub fn take_route(&self) -> Option<Route> {
        self.update_ui(|ui| ui.route.take())
    }
}
