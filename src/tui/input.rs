use super::form::TaskForm;

/// What the app is currently routing input to
#[derive(Debug, Clone, Default)]
pub enum Mode {
    /// Navigating the board
    #[default]
    Board,
    /// Filling in the new-task form
    CreatingTask(TaskForm),
}

impl Mode {
    pub fn is_board(&self) -> bool {
        matches!(self, Mode::Board)
    }

    pub fn form(&self) -> Option<&TaskForm> {
        match self {
            Mode::CreatingTask(form) => Some(form),
            Mode::Board => None,
        }
    }
}

/// Field of the task form that has input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Entering task title
    Title,
    /// Entering task description
    Description,
}
