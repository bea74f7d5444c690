//! Interactive sessions on the alternate screen

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use measurehud_core::QueryParams;
use measurehud_utils::logging::{get_logger, Logger};
use measurehud_viz::{AuthenticationPresenter, AuthenticationTab, TreemapPresenter};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::cell::RefCell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Raw mode, alternate screen and mouse capture; all undone on drop
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let terminal = undo_on_error(Self::open_screen(), || {
            let mut stdout = io::stdout();
            let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
            if let Err(e) = disable_raw_mode() {
                get_logger("measurehud.tui").error(&format!("Failed to leave raw mode: {}", e));
            }
        })?;
        Ok(Self { terminal })
    }

    fn open_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to initialize terminal")?;
        Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render).context("Failed to draw frame")?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let restored = disable_raw_mode()
            .and_then(|()| {
                execute!(
                    self.terminal.backend_mut(),
                    LeaveAlternateScreen,
                    DisableMouseCapture
                )
            })
            .and_then(|()| self.terminal.show_cursor());
        if let Err(e) = restored {
            get_logger("measurehud.tui").error(&format!("Failed to restore terminal: {}", e));
        }
    }
}

/// Run `undo` when a half-finished setup step failed
fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

fn key_hint(key: &str, action: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            key.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(":{} ", action)),
    ]
}

fn render_footer(frame: &mut Frame, area: Rect, hints: &[(&str, &str)], status: Option<&str>) {
    let mut spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| key_hint(key, action))
        .collect();
    if let Some(status) = status {
        spans.push(Span::styled(
            format!("  {}", status),
            Style::default().fg(Color::Gray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn split_footer(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

enum Input {
    Quit,
    Left,
    Right,
    Jump(usize),
    Click(u16, u16),
    Other,
}

fn next_input() -> Result<Input> {
    if !event::poll(POLL_INTERVAL)? {
        return Ok(Input::Other);
    }
    let input = match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Input::Quit,
            KeyCode::Left | KeyCode::Char('h') => Input::Left,
            KeyCode::Right | KeyCode::Char('l') => Input::Right,
            KeyCode::Char(c @ '1'..='9') => Input::Jump(usize::from(c as u8 - b'1')),
            _ => Input::Other,
        },
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            Input::Click(mouse.column, mouse.row)
        }
        _ => Input::Other,
    };
    Ok(input)
}

/// Run the treemap until `q`; returns the keys of clicked components in order
pub fn run_treemap(presenter: TreemapPresenter) -> Result<Vec<String>> {
    let logger: Logger = get_logger("measurehud.tui");
    let selections = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&selections);
    let mut presenter = presenter.on_select(move |entity| {
        sink.borrow_mut()
            .push((Local::now().format("%H:%M:%S").to_string(), entity.key.clone()));
    });

    let mut session = TerminalSession::enter()?;
    logger.info("Treemap session started");

    loop {
        let status = selections
            .borrow()
            .last()
            .map(|(time, key)| format!("{} selected {}", time, key));
        session.draw(|frame| {
            let (body, footer) = split_footer(frame.size());
            presenter.render(frame, body);
            render_footer(frame, footer, &[("q", "quit"), ("click", "select")], status.as_deref());
        })?;

        match next_input()? {
            Input::Quit => break,
            Input::Click(column, row) => {
                presenter.click(column, row);
            }
            _ => {}
        }
    }

    drop(session);
    let keys = selections.borrow().iter().map(|(_, key)| key.clone()).collect();
    Ok(keys)
}

/// Run the settings panel until `q`; returns the final query
pub fn run_authentication(presenter: &AuthenticationPresenter, query: QueryParams) -> Result<QueryParams> {
    let logger = get_logger("measurehud.tui");
    let mut query = query;
    let mut session = TerminalSession::enter()?;
    logger.info("Authentication session started");

    loop {
        let current = presenter.current_tab(&query);
        let status = format!("?{}", query);
        session.draw(|frame| {
            let (body, footer) = split_footer(frame.size());
            presenter.render(frame, body, &query);
            render_footer(
                frame,
                footer,
                &[("q", "quit"), ("←→/hl", "tabs"), ("1-4", "jump")],
                Some(&status),
            );
        })?;

        let target = match next_input()? {
            Input::Quit => break,
            Input::Left => Some(current.previous()),
            Input::Right => Some(current.next()),
            Input::Jump(index) => AuthenticationTab::ALL.get(index).copied(),
            Input::Click(..) | Input::Other => None,
        };
        if let Some(tab) = target.filter(|tab| *tab != current) {
            query = presenter.select(&query, tab);
        }
    }

    Ok(query)
}
