use std::io;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};
use crossterm::{
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    execute,
    event::{DisableMouseCapture, EnableMouseCapture},
};

use crate::controllers::notifications::{Notification, NotificationKind};
use crate::controllers::page_controller::UiState;
use crate::locale::{Locale, Text};
use crate::models::reaction::format_tally;
use crate::models::{Message, MessageList, Page, Post, Reaction};
use crate::views::widgets::{CardCursor, StatefulList};

pub fn setup_terminal() -> io::Result<Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

pub fn restore_terminal(terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}

/// Everything one frame needs, captured from the controller.
pub struct PageView {
    pub locale: Locale,
    pub post: Option<Post>,
    pub reactions: Option<Page<Reaction>>,
    pub messages: Option<MessageList>,
    pub ui: UiState,
    pub notification: Option<Notification>,
    pub address: String,
}

const MAX_AVATARS: usize = 3;
const PREVIEW_CHARS: usize = 80;

pub fn background_color(name: &str) -> Color {
    match name {
        "beige" => Color::Rgb(255, 227, 194),
        "purple" => Color::Rgb(236, 216, 255),
        "blue" => Color::Rgb(184, 221, 255),
        "green" => Color::Rgb(212, 244, 201),
        _ => Color::Reset,
    }
}

pub fn render_page(
    f: &mut Frame,
    view: &PageView,
    cursor: &mut CardCursor,
    picker: &mut StatefulList<&'static str>,
) {
    // Nothing but the placeholder until both post and messages are in
    let (post, messages) = match (&view.post, &view.messages) {
        (Some(post), Some(messages)) => (post, messages),
        _ => {
            render_placeholder(f, view.locale);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.size());

    render_header(f, chunks[0], post, view.locale);
    render_background(f, chunks[1], post, view.locale);
    render_cards(f, chunks[2], messages, cursor, &view.address);
    render_status(f, chunks[3], view.notification.as_ref());

    if view.ui.show_reactions {
        render_reactions(f, view.reactions.as_ref(), view.locale);
    }
    if view.ui.picker_visible {
        render_picker(f, picker, view.locale);
    }
    if view.ui.modal_open {
        if let Some(message) = &view.ui.selected {
            render_modal(f, message);
        }
    }
}

fn render_placeholder(f: &mut Frame, locale: Locale) {
    let placeholder = Paragraph::new(locale.text(Text::NoData))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(placeholder, f.size());
}

fn render_header(f: &mut Frame, area: Rect, post: &Post, locale: Locale) {
    let mut spans: Vec<Span> = post
        .recent_messages
        .iter()
        .take(MAX_AVATARS)
        .map(|m| Span::styled(format!("[{}]", m.initial()), Style::default().fg(Color::Magenta)))
        .collect();
    spans.push(Span::raw(format!(" +{}  ", post.message_count)));
    spans.push(Span::raw(locale.writer_count(post.message_count)));
    spans.push(Span::raw("  |  "));
    spans.push(Span::raw(format_tally(&post.top_reactions)));
    spans.push(Span::styled(" ▾", Style::default().fg(Color::DarkGray)));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                format!("To. {}", post.name),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(header, area);
}

fn render_background(f: &mut Frame, area: Rect, post: &Post, locale: Locale) {
    let label = post
        .background_image_url
        .clone()
        .unwrap_or_else(|| post.background_color.clone());
    let line = Line::from(vec![
        Span::raw(label),
        Span::raw("   "),
        Span::styled(
            format!("[D] {}", locale.text(Text::Delete)),
            Style::default().fg(Color::White).bg(Color::Magenta),
        ),
    ]);
    let banner = Paragraph::new(line)
        .style(Style::default().bg(background_color(&post.background_color)).fg(Color::Black))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(banner, area);
}

fn card_item(message: &Message) -> ListItem<'_> {
    let header = Line::from(vec![
        Span::styled(
            format!("From. {}", message.sender),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  [{}]", message.relationship)),
    ]);
    let preview: String = message.content.chars().take(PREVIEW_CHARS).collect();

    ListItem::new(vec![
        header,
        Line::from(preview),
        Line::from(Span::styled(message.created_label(), Style::default().fg(Color::DarkGray))),
        Line::from(""),
    ])
}

fn render_cards(f: &mut Frame, area: Rect, messages: &MessageList, cursor: &mut CardCursor, address: &str) {
    cursor.clamp(messages.len());
    let items: Vec<ListItem> = messages.results.iter().map(card_item).collect();

    let mut title = format!("{} ({})", address, messages.count);
    if messages.has_more() {
        title.push_str(" [m] more");
    }

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Gray)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut cursor.state);
}

fn render_status(f: &mut Frame, area: Rect, notification: Option<&Notification>) {
    let line = match notification {
        Some(n) => {
            let color = match n.kind {
                NotificationKind::Success => Color::Green,
                NotificationKind::Error => Color::Red,
                NotificationKind::Info => Color::Yellow,
            };
            Line::from(Span::styled(n.text.clone(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            "j/k move  enter open  e emoji  v reactions  s share  n write  d delete  r refresh  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_reactions(f: &mut Frame, reactions: Option<&Page<Reaction>>, locale: Locale) {
    let area = popup_area(f.size(), 40, 50);
    let lines: Vec<Line> = match reactions {
        Some(page) if !page.is_empty() => page
            .results
            .iter()
            .map(|r| Line::from(format!("{}  {}", r.emoji, r.count)))
            .collect(),
        Some(_) => vec![Line::from("-")],
        None => vec![Line::from(locale.text(Text::Loading))],
    };
    let panel = Paragraph::new(lines)
        .block(Block::default().title(locale.text(Text::Reactions)).borders(Borders::ALL));
    f.render_widget(Clear, area);
    f.render_widget(panel, area);
}

fn render_picker(f: &mut Frame, picker: &mut StatefulList<&'static str>, locale: Locale) {
    let area = popup_area(f.size(), 30, 60);
    let items: Vec<ListItem> = picker.items.iter().map(|e| ListItem::new(*e)).collect();
    let list = List::new(items)
        .block(Block::default().title(locale.text(Text::PickEmoji)).borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
        .highlight_symbol("> ");
    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut picker.state);
}

fn render_modal(f: &mut Frame, message: &Message) {
    let area = popup_area(f.size(), 70, 70);
    let mut lines = vec![
        Line::from(Span::raw(format!("[{}]", message.relationship))),
        Line::from(Span::styled(message.profile_image_url.clone(), Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(message.created_label(), Style::default().fg(Color::DarkGray))),
        Line::from(""),
    ];
    lines.extend(message.content.lines().map(|l| Line::from(l.to_string())));
    lines.push(Line::from(""));
    let mut footer = vec![Span::styled("[Esc]", Style::default().fg(Color::DarkGray))];
    // A terminal can't switch typefaces, so the sender's choice is shown instead
    if let Some(font) = &message.font {
        footer.push(Span::styled(format!("  ({})", font), Style::default().fg(Color::DarkGray)));
    }
    lines.push(Line::from(footer));

    let modal = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!("From. {}", message.sender),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(Clear, area);
    f.render_widget(modal, area);
}

/// Rectangle of `percent_x` by `percent_y` centered in `r`.
pub fn popup_area(r: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Plain-text rendering used by the `show` command.
pub fn summary_lines(
    post: &Post,
    reactions: Option<&Page<Reaction>>,
    messages: &MessageList,
    locale: Locale,
) -> Vec<String> {
    let mut lines = vec![
        format!("To. {}", post.name),
        locale.writer_count(post.message_count),
    ];
    let tally = match reactions {
        Some(page) => format_tally(&page.results),
        None => format_tally(&post.top_reactions),
    };
    if !tally.is_empty() {
        lines.push(tally);
    }
    for message in &messages.results {
        lines.push(String::new());
        lines.push(format!(
            "#{} From. {} [{}] {}",
            message.id,
            message.sender,
            message.relationship,
            message.created_label()
        ));
        lines.extend(message.content.lines().map(|l| format!("  {}", l)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ratatui::backend::TestBackend;

    fn message(id: u64, sender: &str) -> Message {
        Message {
            id,
            recipient_id: 7,
            sender: sender.to_string(),
            profile_image_url: format!("https://img.example/{}.png", id),
            relationship: "friend".to_string(),
            content: format!("hello from {}", sender),
            font: None,
            created_at: Utc.with_ymd_and_hms(2023, 11, 1, 12, 0, 0).unwrap(),
        }
    }

    fn post() -> Post {
        Post {
            id: 7,
            name: "Ava".to_string(),
            background_color: "blue".to_string(),
            background_image_url: None,
            created_at: None,
            message_count: 2,
            recent_messages: vec![message(1, "Sam")],
            reaction_count: 0,
            top_reactions: vec![],
        }
    }

    fn view(post: Option<Post>, messages: Option<MessageList>) -> PageView {
        PageView {
            locale: Locale::En,
            post,
            reactions: None,
            messages,
            ui: UiState::default(),
            notification: None,
            address: "http://web/post/7".to_string(),
        }
    }

    fn draw(view: &PageView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut cursor = CardCursor::default();
        let mut picker = StatefulList::with_items(vec!["x"]);
        terminal
            .draw(|f| render_page(f, view, &mut cursor, &mut picker))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn placeholder_without_messages() {
        let screen = draw(&view(Some(post()), None));
        assert!(screen.contains("no data"));
        assert!(!screen.contains("To. Ava"));
    }

    #[test]
    fn placeholder_without_post() {
        let messages = Page::from_results(vec![message(1, "Sam")]);
        let screen = draw(&view(None, Some(messages)));
        assert!(screen.contains("no data"));
        assert!(!screen.contains("From. Sam"));
    }

    #[test]
    fn renders_cards_when_loaded() {
        let messages = Page::from_results(vec![message(1, "Sam"), message(2, "Kim")]);
        let screen = draw(&view(Some(post()), Some(messages)));
        assert!(screen.contains("To. Ava"));
        assert!(screen.contains("From. Sam"));
        assert!(screen.contains("From. Kim"));
        assert!(!screen.contains("no data"));
    }

    #[test]
    fn modal_shows_selected_message() {
        let selected = message(2, "Kim");
        let mut v = view(Some(post()), Some(Page::from_results(vec![selected.clone()])));
        v.ui.selected = Some(selected);
        v.ui.modal_open = true;
        let screen = draw(&v);
        assert!(screen.contains("https://img.example/2.png"));
        assert!(!screen.contains("(Pretendard)"));
    }

    #[test]
    fn modal_names_the_chosen_font() {
        let selected = Message {
            font: Some("Pretendard".to_string()),
            ..message(2, "Kim")
        };
        let mut v = view(Some(post()), Some(Page::from_results(vec![selected.clone()])));
        v.ui.selected = Some(selected);
        v.ui.modal_open = true;
        let screen = draw(&v);
        assert!(screen.contains("(Pretendard)"));
    }

    #[test]
    fn summary_lists_messages() {
        let messages = Page::from_results(vec![message(1, "Sam")]);
        let lines = summary_lines(&post(), None, &messages, Locale::En);
        assert_eq!(lines[0], "To. Ava");
        assert!(lines.iter().any(|l| l.starts_with("#1 From. Sam [friend]")));
        assert!(lines.iter().any(|l| l == "  hello from Sam"));
    }
}
