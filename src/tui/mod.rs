mod app;
pub mod board;
pub mod column;
pub mod event;
pub mod form;
pub mod input;
pub mod text_input;

pub use app::{build_footer_text, draw, run_loop, App, AppState, FAREWELL, LOADING};
pub use board::{Board, BoardOutcome};
pub use column::Column;
pub use event::{AppEvent, EventSource, TerminalEvents};
pub use form::{FormOutcome, TaskForm};
pub use input::{FormField, Mode};
pub use text_input::TextInput;

#[cfg(feature = "test-mocks")]
pub use event::MockEventSource;
