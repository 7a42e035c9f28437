//! Terminal surface: applies a [`View`] with ratatui and feeds key presses
//! back to the search controller.

use crate::actors::SearchControllerMessage;
use crate::models::ViewState;
use crate::render::{render, View, REPOSITORY_HEADING};
use anyhow::{anyhow, Result};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Paragraph};
use ratatui::Frame;
use ractor::ActorRef;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// What a key press means for the input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Changed(String),
    Submit(String),
    Quit,
    None,
}

/// The text field the user types the username into
#[derive(Debug, Default)]
pub struct InputField {
    text: String,
}

impl InputField {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => InputAction::Quit,
            KeyCode::Char('c') if ctrl => InputAction::Quit,
            KeyCode::Char('u') if ctrl => {
                if self.text.is_empty() {
                    return InputAction::None;
                }
                self.text.clear();
                InputAction::Changed(self.text.clone())
            }
            KeyCode::Enter => InputAction::Submit(self.text.clone()),
            KeyCode::Backspace => {
                if self.text.pop().is_some() {
                    InputAction::Changed(self.text.clone())
                } else {
                    InputAction::None
                }
            }
            KeyCode::Char(c) if !ctrl => {
                self.text.push(c);
                InputAction::Changed(self.text.clone())
            }
            _ => InputAction::None,
        }
    }
}

/// Pump terminal events and redraw until the user quits
pub async fn run(
    controller: ActorRef<SearchControllerMessage>,
    mut views: watch::Receiver<ViewState>,
) -> Result<()> {
    let mut terminal = ratatui::init();
    terminal.clear()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let event_loop_running = Arc::new(AtomicBool::new(true));
    let event_loop_flag = Arc::clone(&event_loop_running);

    // crossterm reads block, so they live on their own thread
    let event_thread = thread::spawn(move || -> Result<()> {
        while event_loop_flag.load(Ordering::Relaxed) {
            if event::poll(Duration::from_millis(50))? {
                let event = event::read()?;
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        }
        Ok(())
    });

    let mut input = InputField::default();
    let mut view = render(&views.borrow_and_update());

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| draw(frame, &input, &view)) {
            break Err(e.into());
        }

        tokio::select! {
            maybe_event = event_rx.recv() => {
                let Some(event) = maybe_event else {
                    break Err(anyhow!("input event channel disconnected"));
                };
                let Event::Key(key) = event else { continue };
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let message = match input.handle_key(key) {
                    InputAction::Quit => break Ok(()),
                    InputAction::None => continue,
                    InputAction::Changed(text) => SearchControllerMessage::InputChanged(text),
                    InputAction::Submit(text) => SearchControllerMessage::Submit(text),
                };
                if let Err(e) = controller.send_message(message) {
                    break Err(anyhow!("search controller is gone: {}", e));
                }
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break Err(anyhow!("search controller stopped publishing"));
                }
                view = render(&views.borrow_and_update());
                debug!(status = %view.status, "View updated");
            }
        }
    };

    ratatui::restore();

    event_loop_running.store(false, Ordering::Relaxed);
    match event_thread.join() {
        Ok(join_result) => join_result?,
        Err(err) => std::panic::resume_unwind(err),
    }

    info!("Terminal session ended");
    result
}

pub fn draw(frame: &mut Frame, input: &InputField, view: &View) {
    let profile_height = view.profile.as_ref().map_or(0, |panel| {
        // borders + name + avatar + stats, plus optional lines
        5 + panel.location.is_some() as u16 + panel.website.is_some() as u16
    });
    let heading_height = if view.heading_visible { 1 } else { 0 };

    let [input_area, status_area, profile_area, heading_area, repos_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(profile_height),
        Constraint::Length(heading_height),
        Constraint::Min(0),
    ])
    .areas(frame.area());

    draw_input(frame, input, input_area);
    frame.render_widget(Paragraph::new(view.status.as_str()).fg(Color::Yellow), status_area);

    if let Some(panel) = &view.profile {
        let mut lines = vec![
            Line::from(panel.name.as_str().bold()),
            Line::from(vec![Span::raw("Avatar: "), Span::raw(panel.avatar.src.as_str()).dim()]),
        ];
        if let Some(location) = &panel.location {
            lines.push(Line::from(format!("📍 {}", location)));
        }
        if let Some(website) = &panel.website {
            lines.push(Line::from(vec![
                Span::raw("🔗 "),
                Span::styled(
                    website.href.as_str(),
                    Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
        let mut stats = Vec::new();
        for stat in &panel.stats {
            if !stats.is_empty() {
                stats.push(Span::raw("  │  "));
            }
            stats.push(Span::raw(format!("{} ", stat.label)));
            stats.push(Span::raw(stat.value.as_str()).bold());
        }
        lines.push(Line::from(stats));

        let block = Block::bordered().title(panel.overview.as_str());
        frame.render_widget(Paragraph::new(lines).block(block), profile_area);
    }

    if view.heading_visible {
        frame.render_widget(Paragraph::new(REPOSITORY_HEADING).bold(), heading_area);
    }

    let items: Vec<ListItem> = view
        .repositories
        .iter()
        .map(|repo| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(repo.link.text.as_str()).fg(Color::Cyan).bold(),
                    Span::raw("  "),
                    Span::raw(repo.language.as_str()).dim(),
                ]),
                Line::from(Span::raw(repo.link.href.as_str()).dim()),
            ])
        })
        .collect();
    frame.render_widget(List::new(items), repos_area);
}

fn draw_input(frame: &mut Frame, input: &InputField, area: Rect) {
    let block = Block::bordered().title("GitHub username (Enter to search, Esc to quit)");
    frame.render_widget(Paragraph::new(input.text()).block(block), area);

    let cursor_x = area.x + 1 + input.text().chars().count() as u16;
    frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
}
