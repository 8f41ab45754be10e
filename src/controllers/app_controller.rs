use std::env;
use std::future::Future;
use std::process::{Command, Stdio};
use std::time::Duration;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::Terminal;

use crate::controllers::page_controller::{Outcome, PageController, Route, UiState};
use crate::error::RollingError;
use crate::locale::Text;
use crate::models::reaction::EMOJI_CHOICES;
use crate::models::MessageId;
use crate::views::tui::{self, PageView};
use crate::views::{CardCursor, StatefulList};

const TICK: Duration = Duration::from_millis(100);

/// Why the post view closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    Quit,
    /// The post was deleted; go back to the home route.
    Home,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Picker,
    Modal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserCommand {
    Quit,
    Up,
    Down,
    Open,
    Close,
    DeleteMessage,
    DeletePost,
    TogglePicker,
    ToggleReactions,
    Share,
    WriteMessage,
    Refresh,
    LoadMore,
    PickerUp,
    PickerDown,
    PickerSend,
}

pub fn mode(ui: &UiState) -> Mode {
    if ui.picker_visible {
        Mode::Picker
    } else if ui.modal_open && ui.selected.is_some() {
        Mode::Modal
    } else {
        Mode::Normal
    }
}

pub fn map_key(code: KeyCode, mode: Mode) -> Option<UserCommand> {
    use UserCommand::*;
    match mode {
        Mode::Picker => match code {
            KeyCode::Up | KeyCode::Char('k') => Some(PickerUp),
            KeyCode::Down | KeyCode::Char('j') => Some(PickerDown),
            KeyCode::Enter => Some(PickerSend),
            KeyCode::Esc | KeyCode::Char('e') => Some(TogglePicker),
            KeyCode::Char('q') => Some(Quit),
            _ => None,
        },
        Mode::Modal => match code {
            KeyCode::Esc | KeyCode::Enter => Some(Close),
            KeyCode::Char('d') => Some(DeleteMessage),
            KeyCode::Char('q') => Some(Quit),
            _ => None,
        },
        Mode::Normal => match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Quit),
            KeyCode::Down | KeyCode::Char('j') => Some(Down),
            KeyCode::Up | KeyCode::Char('k') => Some(Up),
            KeyCode::Enter => Some(Open),
            KeyCode::Char('d') => Some(DeleteMessage),
            KeyCode::Char('D') => Some(DeletePost),
            KeyCode::Char('e') => Some(TogglePicker),
            KeyCode::Char('v') => Some(ToggleReactions),
            KeyCode::Char('s') => Some(Share),
            KeyCode::Char('n') => Some(WriteMessage),
            KeyCode::Char('r') => Some(Refresh),
            KeyCode::Char('m') => Some(LoadMore),
            _ => None,
        },
    }
}

pub fn snapshot(controller: &PageController, ttl: Duration) -> PageView {
    let resources = controller.resources();
    PageView {
        locale: controller.locale(),
        post: resources.post.get(),
        reactions: resources.reactions.get(),
        messages: resources.messages.get(),
        ui: controller.ui(),
        notification: controller.notifications().current(ttl),
        address: controller.address().to_string(),
    }
}

pub async fn start_app(controller: PageController, ttl: Duration) -> Result<Exit, RollingError> {
    // Setup terminal
    let mut terminal = tui::setup_terminal()?;

    let loader = controller.clone();
    tokio::spawn(async move { loader.refresh_all().await });

    let res = run_app(&mut terminal, &controller, ttl).await;

    // Restore terminal
    tui::restore_terminal(&mut terminal)?;

    res
}

pub async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    controller: &PageController,
    ttl: Duration,
) -> Result<Exit, RollingError> {
    let mut cursor = CardCursor::default();
    let mut picker = StatefulList::with_items(EMOJI_CHOICES.to_vec());

    loop {
        controller.notifications().prune(ttl);
        let view = snapshot(controller, ttl);
        terminal.draw(|f| tui::render_page(f, &view, &mut cursor, &mut picker))?;

        match controller.take_route() {
            Some(Route::Home) => return Ok(Exit::Home),
            Some(route) => follow_route(controller, &route),
            None => {}
        }

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if let Some(command) = map_key(key.code, mode(&view.ui)) {
            if !dispatch(controller, command, &view, &mut cursor, &mut picker) {
                return Ok(Exit::Quit);
            }
        }
    }
}

fn spawn_action<F>(label: &'static str, action: F)
where
    F: Future<Output = Outcome> + Send + 'static,
{
    tokio::spawn(async move {
        let outcome = action.await;
        log::debug!("{} finished: {:?}", label, outcome);
    });
}

fn highlighted_message(view: &PageView, cursor: &CardCursor) -> Option<MessageId> {
    let messages = view.messages.as_ref()?;
    let index = cursor.selected(messages.len())?;
    messages.results.get(index).map(|m| m.id)
}

/// Applies one command. Returns `false` when the app should quit.
///
/// Network actions are spawned so the loop keeps drawing while they settle.
pub fn dispatch(
    controller: &PageController,
    command: UserCommand,
    view: &PageView,
    cursor: &mut CardCursor,
    picker: &mut StatefulList<&'static str>,
) -> bool {
    match command {
        UserCommand::Quit => return false,
        UserCommand::Refresh => {
            let c = controller.clone();
            tokio::spawn(async move { c.refresh_all().await });
        }
        // Only the placeholder is on screen; nothing else may fire
        _ if !controller.is_ready() => {}
        UserCommand::Up => cursor.previous(view.messages.as_ref().map_or(0, |m| m.len())),
        UserCommand::Down => cursor.next(view.messages.as_ref().map_or(0, |m| m.len())),
        UserCommand::Open => {
            if let Some(id) = highlighted_message(view, cursor) {
                if controller.card_clicked(id).is_none() {
                    log::warn!("message {} vanished before it could be opened", id);
                    controller
                        .notifications()
                        .error(controller.locale().text(Text::MessageNotFound));
                }
            }
        }
        UserCommand::Close => controller.close_modal(),
        UserCommand::DeleteMessage => {
            let target = match mode(&view.ui) {
                Mode::Modal => view.ui.selected.as_ref().map(|m| m.id),
                _ => highlighted_message(view, cursor),
            };
            if let Some(id) = target {
                let c = controller.clone();
                spawn_action("delete message", async move { c.on_delete(id).await });
            }
        }
        UserCommand::DeletePost => {
            let c = controller.clone();
            spawn_action("delete post", async move { c.on_post_delete().await });
        }
        UserCommand::TogglePicker => controller.toggle_picker(),
        UserCommand::ToggleReactions => controller.toggle_reactions(),
        UserCommand::Share => {
            controller.copy_to_clipboard();
        }
        UserCommand::WriteMessage => controller.write_message(),
        UserCommand::LoadMore => {
            let c = controller.clone();
            spawn_action("load more", async move { c.load_more_messages().await });
        }
        UserCommand::PickerUp => picker.previous(),
        UserCommand::PickerDown => picker.next(),
        UserCommand::PickerSend => {
            if let Some(emoji) = picker.selected_item() {
                let emoji = emoji.to_string();
                let c = controller.clone();
                spawn_action("reaction", async move { c.send_reaction(&emoji).await });
            }
        }
    }
    true
}

fn follow_route(controller: &PageController, route: &Route) {
    let url = controller.url_for(route);
    if let Err(e) = open_in_browser(&url) {
        log::info!("not opening {}: {}", url, e);
        controller.notifications().info(format!(
            "{} {}",
            controller.locale().text(Text::WriteMessageAt),
            url
        ));
    }
}

/// Hands `url` to `$BROWSER` without waiting for it.
pub fn open_in_browser(url: &str) -> Result<(), RollingError> {
    let browser = env::var("BROWSER")
        .map_err(|_| RollingError::Config("BROWSER is not set".to_string()))?;

    Command::new(browser)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}

/// Loads the post once and renders it as plain lines (the `show` command).
pub async fn show_post(controller: &PageController) -> Vec<String> {
    controller.refresh_all().await;
    let resources = controller.resources();
    match (resources.post.get(), resources.messages.get()) {
        (Some(post), Some(messages)) => tui::summary_lines(
            &post,
            resources.reactions.get().as_ref(),
            &messages,
            controller.locale(),
        ),
        _ => vec![controller.locale().text(Text::NoData).to_string()],
    }
}
