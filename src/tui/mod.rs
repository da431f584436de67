//! Terminal adapter.
//!
//! A single-threaded, blocking full-screen loop over the store. The loop is
//! an explicit state machine: `Mode` captures the two full-screen states
//! (list navigation and search input), and `transition` maps one key event
//! to a `Step` the runner applies. Add/Edit/Delete/View are line-oriented
//! flows in `crate::prompts`; the runner tears the full-screen terminal down
//! before entering one and rebuilds it afterwards.
//!
//! The visible list is never cached: every iteration re-runs the store query
//! with the confirmed search term, so it always reflects the latest state.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};

use crate::clipboard;
use crate::config::Config;
use crate::prompts;
use crate::store::{Snippet, Store};

/// Full-screen input modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Navigate the snippet list.
    List,
    /// Type a search term; Enter confirms, Esc cancels.
    Search { buffer: String },
}

#[derive(Debug)]
pub struct ViewState {
    pub mode: Mode,
    pub selected: usize,
    pub search_term: String,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            mode: Mode::List,
            selected: 0,
            search_term: String::new(),
        }
    }
}

/// What the runner should do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Redraw,
    Quit,
    /// Pipe the selected snippet's content to the clipboard helper.
    Copy,
    /// Suspend the full screen and run a line-oriented flow.
    Flow(Flow),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Add,
    Edit(i64),
    Delete(i64),
    View(i64),
}

/// Apply one key event to the state. `visible` is the currently listed
/// slice of snippets and `visible_rows` the number of list rows on screen;
/// the selection never leaves `[0, min(len, visible_rows) - 1]`.
pub fn transition(
    state: &mut ViewState,
    key: KeyEvent,
    visible: &[Snippet],
    visible_rows: usize,
) -> Step {
    if let Mode::Search { buffer } = &mut state.mode {
        match key.code {
            KeyCode::Char(c) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => {
                state.search_term = buffer.clone();
                state.selected = 0;
                state.mode = Mode::List;
            }
            KeyCode::Esc => state.mode = Mode::List,
            _ => {}
        }
        return Step::Redraw;
    }

    let selected_id = visible.get(state.selected).map(|s| s.id);
    let limit = visible.len().min(visible_rows);

    match key.code {
        KeyCode::Up => {
            state.selected = state.selected.saturating_sub(1);
            Step::Redraw
        }
        KeyCode::Down => {
            if state.selected + 1 < limit {
                state.selected += 1;
            }
            Step::Redraw
        }
        KeyCode::Char('a') => Step::Flow(Flow::Add),
        KeyCode::Char('e') => match selected_id {
            Some(id) => Step::Flow(Flow::Edit(id)),
            None => Step::Redraw,
        },
        KeyCode::Char('d') => match selected_id {
            Some(id) => Step::Flow(Flow::Delete(id)),
            None => Step::Redraw,
        },
        KeyCode::Char('y') if selected_id.is_some() => Step::Copy,
        KeyCode::Char('/') => {
            state.mode = Mode::Search {
                buffer: String::new(),
            };
            Step::Redraw
        }
        KeyCode::Enter => match selected_id {
            Some(id) => Step::Flow(Flow::View(id)),
            None => Step::Redraw,
        },
        KeyCode::Char('q') => Step::Quit,
        _ => Step::Redraw,
    }
}

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(&config.db_path)?;

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &store, config);
    ratatui::restore();
    result
}

// header + search + footer + notice
const CHROME_ROWS: u16 = 4;

fn visible_rows(height: u16) -> usize {
    height.saturating_sub(CHROME_ROWS) as usize
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    store: &Store,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = ViewState::default();

    loop {
        let term = if state.search_term.is_empty() {
            None
        } else {
            Some(state.search_term.as_str())
        };
        let snippets = store.list(term, None)?;

        let rows = visible_rows(terminal.size()?.height);
        let limit = snippets.len().min(rows);
        if limit == 0 {
            state.selected = 0;
        } else if state.selected >= limit {
            state.selected = limit - 1;
        }

        terminal.draw(|f| draw(f, &state, &snippets, None))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match transition(&mut state, key, &snippets, rows) {
            Step::Redraw => {}
            Step::Quit => return Ok(()),
            Step::Copy => {
                if let Some(snippet) = snippets.get(state.selected) {
                    let notice = match clipboard::copy(&config.clipboard_helper, &snippet.content) {
                        Ok(()) => "Copied to clipboard".to_string(),
                        Err(e) => e,
                    };
                    terminal.draw(|f| draw(f, &state, &snippets, Some(&notice)))?;
                    std::thread::sleep(Duration::from_secs(1));
                }
            }
            Step::Flow(flow) => {
                // leave the full-screen mode for the line-oriented flow
                ratatui::restore();
                let flow_result = match flow {
                    Flow::Add => prompts::add(store),
                    Flow::Edit(id) => prompts::edit(store, id),
                    Flow::Delete(id) => prompts::delete(store, id),
                    Flow::View(id) => prompts::view(store, id, &config.clipboard_helper),
                };
                *terminal = ratatui::init();
                flow_result?;

                match flow {
                    Flow::Add => state.selected = 0,
                    Flow::Delete(_) => state.selected = state.selected.saturating_sub(1),
                    _ => {}
                }
            }
        }
    }
}

fn draw(frame: &mut Frame, state: &ViewState, snippets: &[Snippet], notice: Option<&str>) {
    let [header, search, list_area, footer, notice_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new("snipstash - snippets & notes")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        header,
    );

    let search_text = match &state.mode {
        Mode::Search { buffer } => format!(" Search: {buffer}_"),
        Mode::List => format!(" Search: {}", state.search_term),
    };
    frame.render_widget(
        Paragraph::new(search_text).style(Style::default().fg(Color::Yellow)),
        search,
    );

    if snippets.is_empty() {
        frame.render_widget(
            Paragraph::new("No snippets found. Press 'a' to add one.")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center),
            list_area,
        );
    } else {
        let width = list_area.width as usize;
        let lines: Vec<Line> = snippets
            .iter()
            .take(list_area.height as usize)
            .enumerate()
            .map(|(idx, snippet)| {
                let text = format!(" {:>3}. {}", idx + 1, truncate(&snippet.title, width.saturating_sub(8)));
                if idx == state.selected && matches!(state.mode, Mode::List) {
                    Line::styled(
                        text,
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::REVERSED),
                    )
                } else {
                    Line::raw(text)
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), list_area);
    }

    frame.render_widget(
        Paragraph::new(" [Up/Down] move  [Enter] view  [a]dd  [e]dit  [d]elete  [y]ank  [/] search  [q]uit")
            .style(Style::default().fg(Color::Magenta)),
        footer,
    );

    if let Some(message) = notice {
        frame.render_widget(
            Paragraph::new(format!(" {message}")).style(Style::default().fg(Color::Green)),
            notice_area,
        );
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
