//! Events driving the app and the trait that supplies them.

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

use crate::model::Task;

/// Everything the controller reacts to, handled one at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Terminal dimensions (width, height)
    Resize(u16, u16),
    Key(KeyEvent),
    /// Emitted by the form when it produced a task
    TaskCreated(Task),
}

/// Source of input events (injectable for testing)
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
pub trait EventSource {
    /// Block until the next relevant event arrives
    fn next_event(&mut self) -> Result<AppEvent>;
}

/// Real implementation reading from the terminal via crossterm
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> Result<AppEvent> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(AppEvent::Key(key)),
                Event::Resize(width, height) => return Ok(AppEvent::Resize(width, height)),
                _ => {}
            }
        }
    }
}
