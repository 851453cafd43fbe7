use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use crate::error::BoardError;
use crate::model::{Status, Task};

/// Terminal rows taken by one task: title, description, gap
pub const ITEM_HEIGHT: u16 = 3;

/// Rows around the list inside a column: border or padding, title line and gap
const CHROME_HEIGHT: u16 = 4;

/// Title filter typed after `/`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Filter {
    #[default]
    Off,
    /// Query is being typed; the column takes every key
    Typing(String),
    /// Query accepted with Enter; navigation works on the matches
    Applied(String),
}

/// One board column: the tasks sharing a status plus the list widget's selection.
///
/// The `ListState` selection indexes the *visible* rows, which are all items
/// unless a filter is active. `selected_index()` maps back into `items`.
#[derive(Debug, Clone)]
pub struct Column {
    status: Status,
    title: String,
    items: Vec<Task>,
    list_state: ListState,
    filter: Filter,
    page_size: usize,
}

impl Column {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            title: status.title().to_string(),
            items: vec![],
            list_state: ListState::default(),
            filter: Filter::Off,
            page_size: 1,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[Task] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Selection state handed to the list widget when rendering
    pub fn list_state(&self) -> &ListState {
        &self.list_state
    }

    /// Rendering writes the scroll offset back through this
    pub fn list_state_mut(&mut self) -> &mut ListState {
        &mut self.list_state
    }

    /// Size PgUp/PgDn jumps from the column height
    pub fn set_height(&mut self, height: u16) {
        self.page_size = usize::from((height.saturating_sub(CHROME_HEIGHT) / ITEM_HEIGHT).max(1));
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current filter query, if any
    pub fn filter_query(&self) -> Option<&str> {
        match &self.filter {
            Filter::Off => None,
            Filter::Typing(q) | Filter::Applied(q) => Some(q),
        }
    }

    /// True while the filter query is being typed
    pub fn is_filtering(&self) -> bool {
        matches!(self.filter, Filter::Typing(_))
    }

    /// Indices into `items` of the rows currently shown
    pub fn visible_indices(&self) -> Vec<usize> {
        let query = self.filter_query().unwrap_or_default().to_lowercase();
        self.items
            .iter()
            .enumerate()
            .filter(|(_, task)| fuzzy_match(&task.title.to_lowercase(), &query))
            .map(|(i, _)| i)
            .collect()
    }

    /// Tasks currently shown, in column order
    pub fn visible(&self) -> Vec<&Task> {
        self.visible_indices().into_iter().map(|i| &self.items[i]).collect()
    }

    /// Index into `items` of the highlighted row, `None` when nothing is shown
    pub fn selected_index(&self) -> Option<usize> {
        let row = self.list_state.selected()?;
        self.visible_indices().get(row).copied()
    }

    /// Highlighted task, `None` when nothing is shown
    pub fn selected(&self) -> Option<&Task> {
        self.selected_index().and_then(|i| self.items.get(i))
    }

    /// Insert a task at `index` (`index == len` appends).
    pub fn insert(&mut self, index: usize, task: Task) -> Result<(), BoardError> {
        if task.status != self.status {
            return Err(BoardError::StatusMismatch {
                expected: self.status,
                found: task.status,
            });
        }
        if index > self.items.len() {
            return Err(BoardError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }

        self.items.insert(index, task);
        self.clamp_selection();
        Ok(())
    }

    /// Append a task to the end of the column
    pub fn push(&mut self, task: Task) -> Result<(), BoardError> {
        self.insert(self.items.len(), task)
    }

    /// Remove and return the task at `index` (an index into `items`)
    pub fn remove_at(&mut self, index: usize) -> Result<Task, BoardError> {
        if index >= self.items.len() {
            return Err(BoardError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let task = self.items.remove(index);
        self.clamp_selection();
        Ok(task)
    }

    /// Row navigation and filtering. Keys it does not know are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.is_filtering() {
            self.handle_filter_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('/') => self.start_filter(),
            KeyCode::Esc => self.clear_filter(),
            KeyCode::Char('j') | KeyCode::Down => self.select_down(),
            KeyCode::Char('k') | KeyCode::Up => self.select_up(),
            KeyCode::Char('g') | KeyCode::Home => self.select_first(),
            KeyCode::Char('G') | KeyCode::End => self.select_last(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.clear_filter(),
            KeyCode::Enter => self.apply_filter(),
            KeyCode::Backspace => {
                if let Filter::Typing(query) = &mut self.filter {
                    query.pop();
                }
                self.select_first();
            }
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if let Filter::Typing(query) = &mut self.filter {
                    query.push(c);
                }
                self.select_first();
            }
            _ => {}
        }
    }

    /// Start typing a filter query, keeping any previous one for editing
    pub fn start_filter(&mut self) {
        let query = self.filter_query().unwrap_or_default().to_string();
        self.filter = Filter::Typing(query);
    }

    /// Stop typing and keep the matches. An empty query turns the filter off.
    pub fn apply_filter(&mut self) {
        self.filter = match std::mem::take(&mut self.filter) {
            Filter::Typing(q) | Filter::Applied(q) if !q.is_empty() => Filter::Applied(q),
            _ => Filter::Off,
        };
        self.clamp_selection();
    }

    /// Drop the filter and keep the highlighted task selected
    pub fn clear_filter(&mut self) {
        let selected = self.selected_index();
        self.filter = Filter::Off;
        self.list_state.select(selected);
        self.clamp_selection();
    }

    pub fn select_down(&mut self) {
        let visible = self.visible_indices().len();
        if let Some(row) = self.list_state.selected() {
            if row + 1 < visible {
                self.list_state.select(Some(row + 1));
            }
        }
    }

    pub fn select_up(&mut self) {
        if let Some(row) = self.list_state.selected() {
            self.list_state.select(Some(row.saturating_sub(1)));
        }
    }

    pub fn select_first(&mut self) {
        let visible = self.visible_indices().len();
        self.list_state.select(if visible == 0 { None } else { Some(0) });
    }

    pub fn select_last(&mut self) {
        let visible = self.visible_indices().len();
        if visible > 0 {
            self.list_state.select(Some(visible - 1));
        }
    }

    pub fn page_down(&mut self) {
        let visible = self.visible_indices().len();
        if let Some(row) = self.list_state.selected() {
            let last = visible.saturating_sub(1);
            self.list_state.select(Some((row + self.page_size).min(last)));
        }
    }

    pub fn page_up(&mut self) {
        if let Some(row) = self.list_state.selected() {
            self.list_state.select(Some(row.saturating_sub(self.page_size)));
        }
    }

    /// Keep the selection on a valid visible row after the rows changed
    fn clamp_selection(&mut self) {
        let visible = self.visible_indices().len();
        if visible == 0 {
            self.list_state.select(None);
        } else if let Some(row) = self.list_state.selected() {
            if row >= visible {
                self.list_state.select(Some(visible - 1));
            }
        } else {
            self.list_state.select(Some(0));
        }
    }
}

/// Case-folded subsequence match: every needle char appears in order
fn fuzzy_match(haystack: &str, needle: &str) -> bool {
    let mut needle_chars = needle.chars().peekable();
    for c in haystack.chars() {
        if needle_chars.peek() == Some(&c) {
            needle_chars.next();
        }
    }
    needle_chars.peek().is_none()
}
