use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{sample_tasks, Status, Task};

use super::column::Column;

/// Rows kept free below the columns
const VERTICAL_INSET: u16 = 3;

/// What the controller should do after the board handled a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardOutcome {
    Continue,
    Quit,
}

/// State for the kanban board view
#[derive(Debug)]
pub struct Board {
    columns: [Column; 3],
    focused: Status,
    column_size: Option<(u16, u16)>,
    quitting: bool,
}

impl Board {
    /// Empty board, focus on the first column, not yet sized
    pub fn new() -> Self {
        Self {
            columns: [
                Column::new(Status::Todo),
                Column::new(Status::Doing),
                Column::new(Status::Done),
            ],
            focused: Status::Todo,
            column_size: None,
            quitting: false,
        }
    }

    /// Board seeded with the startup sample tasks
    pub fn with_sample_tasks() -> Self {
        let mut board = Self::new();
        for task in sample_tasks() {
            board.add_task(task);
        }
        board
    }

    pub fn focused(&self) -> Status {
        self.focused
    }

    pub fn column(&self, status: Status) -> &Column {
        &self.columns[status.index()]
    }

    pub fn column_mut(&mut self, status: Status) -> &mut Column {
        &mut self.columns[status.index()]
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of tasks across all columns
    pub fn total_tasks(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    pub fn is_loaded(&self) -> bool {
        self.column_size.is_some()
    }

    /// Width and height allotted to each column once loaded
    pub fn column_size(&self) -> Option<(u16, u16)> {
        self.column_size
    }

    /// Size the columns from the first terminal dimensions seen.
    /// Later dimensions are ignored. Returns true if this call loaded the board.
    pub fn resize(&mut self, width: u16, height: u16) -> bool {
        if self.column_size.is_some() {
            return false;
        }
        let size = (width / 3, height.saturating_sub(VERTICAL_INSET));
        tracing::debug!(width = size.0, height = size.1, "board loaded");
        for column in &mut self.columns {
            column.set_height(size.1);
        }
        self.column_size = Some(size);
        true
    }

    /// Move focus one column right, wrapping to the first
    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
        tracing::trace!(focused = self.focused.as_str(), "focus next");
    }

    /// Move focus one column left, wrapping to the last
    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
        tracing::trace!(focused = self.focused.as_str(), "focus prev");
    }

    /// File a task at the end of the column matching its status
    pub fn add_task(&mut self, task: Task) {
        let status = task.status;
        if let Err(err) = self.column_mut(status).push(task) {
            tracing::warn!(%err, "task not added");
        }
    }

    /// Advance the selected task of the focused column and append it to the
    /// column of its new status. Returns that status, or `None` when there
    /// was nothing to move.
    pub fn move_selected_forward(&mut self) -> Option<Status> {
        let source = self.column_mut(self.focused);
        let Some(index) = source.selected_index() else {
            tracing::debug!(column = source.status().as_str(), "nothing selected to move");
            return None;
        };

        let task = match source.remove_at(index) {
            Ok(task) => task.advance(),
            Err(err) => {
                tracing::debug!(%err, "move ignored");
                return None;
            }
        };

        let target = task.status;
        tracing::debug!(title = %task.title, to = target.as_str(), "moving task");
        if let Err(err) = self.column_mut(target).push(task) {
            tracing::error!(%err, "moved task could not be filed");
            return None;
        }
        Some(target)
    }

    /// True while the focused column is taking a filter query
    pub fn is_filtering(&self) -> bool {
        self.column(self.focused).is_filtering()
    }

    pub fn quit(&mut self) {
        self.quitting = true;
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Board key bindings. Keys the board does not bind go to the focused column,
    /// as does everything but Ctrl+C while a filter query is being typed.
    pub fn handle_key(&mut self, key: KeyEvent) -> BoardOutcome {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit();
                return BoardOutcome::Quit;
            }
            _ if self.is_filtering() => self.column_mut(self.focused).handle_key(key),
            KeyCode::Char('q') => {
                self.quit();
                return BoardOutcome::Quit;
            }
            KeyCode::Char('h') | KeyCode::Left => self.focus_prev(),
            KeyCode::Char('l') | KeyCode::Right => self.focus_next(),
            KeyCode::Enter => {
                self.move_selected_forward();
            }
            _ => self.column_mut(self.focused).handle_key(key),
        }
        BoardOutcome::Continue
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
