use anyhow::Result;
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use std::collections::VecDeque;
use std::io::{self, Stdout};

use crate::config::{Config, ThemeConfig};
use crate::model::Status;

use super::board::{Board, BoardOutcome};
use super::column::Column;
use super::event::{AppEvent, EventSource, TerminalEvents};
use super::form::{FormOutcome, TaskForm};
use super::input::{FormField, Mode};
use super::text_input::TextInput;

/// Shown once the user quits
pub const FAREWELL: &str = "bye!";

/// Shown until the first terminal size is known
pub const LOADING: &str = "loading...";

/// Helper to convert hex color string to ratatui Color
fn hex_to_color(hex: &str) -> Color {
    ThemeConfig::parse_hex(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

/// Build footer help text based on current mode
pub fn build_footer_text(mode: &Mode, board: &Board) -> &'static str {
    match mode {
        Mode::Board if board.is_filtering() => " Filter tasks... [esc] clear [enter] apply ",
        Mode::Board if board.column(board.focused()).filter_query().is_some() => {
            " [j/k] task  [enter] advance  [/] edit filter  [esc] clear filter  [q] quit "
        }
        Mode::Board => " [h/l] column  [j/k] task  [enter] advance  [/] filter  [n] new  [q] quit ",
        Mode::CreatingTask(form) => match form.active_field() {
            FormField::Title => " Enter task title... [esc] cancel [enter] next ",
            FormField::Description => " Enter description... [esc] cancel [enter] save ",
        },
    }
}

type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Controller state: the board, the active mode, and the pending event queue.
/// Kept apart from the terminal so it can be driven without one.
#[derive(Debug)]
pub struct AppState {
    mode: Mode,
    board: Board,
    theme: ThemeConfig,
    should_quit: bool,
    queue: VecDeque<AppEvent>,
    // Resize seen while the form was open; applied on return to the board
    deferred_resize: Option<(u16, u16)>,
}

impl AppState {
    pub fn new(board: Board, theme: ThemeConfig) -> Self {
        Self {
            mode: Mode::Board,
            board,
            theme,
            should_quit: false,
            queue: VecDeque::new(),
            deferred_resize: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Queue an event and process everything pending, one event at a time.
    /// Events arriving after quit are dropped.
    pub fn handle_event(&mut self, event: AppEvent) {
        self.queue.push_back(event);
        while let Some(event) = self.queue.pop_front() {
            if self.should_quit {
                self.queue.clear();
                break;
            }
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: AppEvent) {
        match event {
            AppEvent::Resize(width, height) => {
                if self.mode.is_board() {
                    self.board.resize(width, height);
                } else {
                    self.deferred_resize = Some((width, height));
                }
            }
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::TaskCreated(task) => {
                tracing::info!(title = %task.title, column = task.status.as_str(), "task created");
                self.board.add_task(task);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let outcome = match &mut self.mode {
            Mode::Board => {
                self.handle_board_key(key);
                return;
            }
            Mode::CreatingTask(form) => form.handle_key(key),
        };

        match outcome {
            FormOutcome::Pending => {}
            FormOutcome::Submitted(task) => {
                self.queue.push_back(AppEvent::TaskCreated(task));
                self.close_form();
            }
            FormOutcome::Cancelled => {
                tracing::debug!("task form cancelled");
                self.close_form();
            }
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('n')
            && !key.modifiers.contains(KeyModifiers::CONTROL)
            && !self.board.is_filtering()
        {
            self.open_form();
            return;
        }
        if self.board.handle_key(key) == BoardOutcome::Quit {
            tracing::info!("quit requested");
            self.should_quit = true;
        }
    }

    fn open_form(&mut self) {
        let target = self.board.focused();
        tracing::debug!(target = target.as_str(), "opening task form");
        self.mode = Mode::CreatingTask(TaskForm::new(target));
    }

    fn close_form(&mut self) {
        self.mode = Mode::Board;
        if let Some((width, height)) = self.deferred_resize.take() {
            self.board.resize(width, height);
        }
    }
}

pub struct App {
    terminal: Terminal,
    state: AppState,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state: AppState::new(Board::with_sample_tasks(), config.theme.clone()),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        run_loop(&mut self.terminal, &mut self.state, &mut TerminalEvents)
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}

/// Draw, wait for an event, handle it; until the user quits.
/// The current terminal size is fed in first so the board can load.
pub fn run_loop<B: Backend>(
    terminal: &mut ratatui::Terminal<B>,
    state: &mut AppState,
    events: &mut dyn EventSource,
) -> Result<()> {
    let size = terminal
        .size()
        .map_err(|e| anyhow::anyhow!("Failed to read terminal size: {e}"))?;
    state.handle_event(AppEvent::Resize(size.width, size.height));

    while !state.should_quit() {
        redraw(terminal, state)?;
        let event = events.next_event()?;
        state.handle_event(event);
    }

    // Farewell frame
    redraw(terminal, state)
}

fn redraw<B: Backend>(terminal: &mut ratatui::Terminal<B>, state: &mut AppState) -> Result<()> {
    terminal
        .draw(|frame| draw(state, frame))
        .map_err(|e| anyhow::anyhow!("Failed to draw: {e}"))?;
    Ok(())
}

/// Render the whole UI for the current state.
/// Takes the state mutably so the lists keep their scroll offsets between frames.
pub fn draw(state: &mut AppState, frame: &mut Frame) {
    let area = frame.area();

    if state.board.is_quitting() {
        frame.render_widget(Paragraph::new(FAREWELL), area);
        return;
    }
    if !state.board.is_loaded() {
        frame.render_widget(Paragraph::new(LOADING), area);
        return;
    }

    draw_board(state, frame, area);

    if let Mode::CreatingTask(form) = &state.mode {
        draw_form(form, &state.theme, frame, area);
    }
}

fn draw_board(state: &mut AppState, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Columns
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let (column_width, column_height) = state.board.column_size().unwrap_or((area.width / 3, area.height));
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(column_width),
            Constraint::Length(column_width),
            Constraint::Length(column_width),
        ])
        .split(chunks[0]);

    let focused = state.board.focused();
    for (status, column_area) in Status::columns().iter().zip(columns.iter()) {
        let column_area = Rect {
            height: column_area.height.min(column_height),
            ..*column_area
        };
        let column = state.board.column_mut(*status);
        draw_column(column, *status == focused, &state.theme, frame, column_area);
    }

    let footer = Paragraph::new(build_footer_text(&state.mode, &state.board))
        .style(Style::default().fg(hex_to_color(&state.theme.color_dimmed)));
    frame.render_widget(footer, chunks[1]);
}

fn draw_column(column: &mut Column, focused: bool, theme: &ThemeConfig, frame: &mut Frame, area: Rect) {
    // Padding takes the border's place so the columns stay aligned
    let block = if focused {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(hex_to_color(&theme.color_focused)))
    } else {
        Block::default().padding(Padding::uniform(1))
    };
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title + gap
            Constraint::Min(0),    // Tasks
        ])
        .split(inner);

    let mut header = vec![Span::styled(
        format!(" {} ", column.title()),
        Style::default().fg(Color::Black).bg(hex_to_color(&theme.color_normal)),
    )];
    if let Some(query) = column.filter_query() {
        let cursor = if column.is_filtering() { "█" } else { "" };
        header.push(Span::styled(
            format!(" /{}{}", query, cursor),
            Style::default().fg(hex_to_color(&theme.color_selected)),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

    let text_style = Style::default().fg(hex_to_color(&theme.color_text));
    let description_style = Style::default().fg(hex_to_color(&theme.color_description));
    let items: Vec<ListItem> = column
        .visible()
        .into_iter()
        .map(|task| {
            ListItem::new(vec![
                Line::styled(task.title.clone(), text_style),
                Line::styled(task.description.clone(), description_style),
                Line::raw(""),
            ])
        })
        .collect();

    let highlight = if focused {
        Style::default().fg(hex_to_color(&theme.color_selected)).bold()
    } else {
        Style::default().bold()
    };
    let list = List::new(items).highlight_style(highlight).highlight_symbol("│ ");

    frame.render_stateful_widget(list, chunks[1], column.list_state_mut());
}

fn draw_form(form: &TaskForm, theme: &ThemeConfig, frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 40, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(format!(" New task in {} ", form.target().title()))
        .border_style(Style::default().fg(hex_to_color(&theme.color_focused)));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title field
            Constraint::Length(3), // Description field
            Constraint::Min(0),
        ])
        .split(inner);

    draw_text_input(form.title(), theme, frame, chunks[0]);
    draw_text_input(form.description(), theme, frame, chunks[1]);
}

fn draw_text_input(input: &TextInput, theme: &ThemeConfig, frame: &mut Frame, area: Rect) {
    let dimmed = Style::default().fg(hex_to_color(&theme.color_dimmed));
    let border_style = if input.is_focused() {
        Style::default().fg(hex_to_color(&theme.color_selected))
    } else {
        dimmed
    };

    let mut spans = vec![Span::raw("> ")];
    if input.is_focused() {
        let before: String = input.value().chars().take(input.cursor()).collect();
        let after: String = input.value().chars().skip(input.cursor()).collect();
        spans.push(Span::raw(before));
        spans.push(Span::raw("█"));
        spans.push(Span::raw(after));
        if input.value().is_empty() {
            spans.push(Span::styled(input.placeholder().to_string(), dimmed));
        }
    } else if input.value().is_empty() {
        spans.push(Span::styled(input.placeholder().to_string(), dimmed));
    } else {
        spans.push(Span::raw(input.value().to_string()));
    }

    let field = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(hex_to_color(&theme.color_text)))
        .block(Block::bordered().border_style(border_style));
    frame.render_widget(field, area);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
