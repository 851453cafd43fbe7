use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{Status, Task};

use super::input::FormField;
use super::text_input::TextInput;

/// Result of feeding a key to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Still editing
    Pending,
    /// Both fields confirmed; the form is done
    Submitted(Task),
    /// User backed out; nothing is created
    Cancelled,
}

/// Modal two-step form that produces a new task for one column
#[derive(Debug, Clone)]
pub struct TaskForm {
    target: Status,
    title: TextInput,
    description: TextInput,
    active: FormField,
}

impl TaskForm {
    pub fn new(target: Status) -> Self {
        let mut title = TextInput::new("Title");
        title.focus();
        Self {
            target,
            title,
            description: TextInput::new("Description"),
            active: FormField::Title,
        }
    }

    /// Column the new task will land in
    pub fn target(&self) -> Status {
        self.target
    }

    pub fn active_field(&self) -> FormField {
        self.active
    }

    pub fn title(&self) -> &TextInput {
        &self.title
    }

    pub fn description(&self) -> &TextInput {
        &self.description
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Esc => return FormOutcome::Cancelled,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return FormOutcome::Cancelled;
            }
            KeyCode::Enter => match self.active {
                FormField::Title => {
                    self.title.blur();
                    self.description.focus();
                    self.active = FormField::Description;
                }
                FormField::Description => return FormOutcome::Submitted(self.build_task()),
            },
            _ => match self.active {
                FormField::Title => self.title.handle_key(key),
                FormField::Description => self.description.handle_key(key),
            },
        }
        FormOutcome::Pending
    }

    /// Empty title or description is accepted as-is
    fn build_task(&self) -> Task {
        Task::new(self.target, self.title.value(), self.description.value())
    }
}
