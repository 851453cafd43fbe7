//! Unit tests for the controller and the event loop

use super::*;
use crate::model::{Status, Task};
use crate::tui::event::MockEventSource;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        state.handle_event(key(KeyCode::Char(c)));
    }
}

fn loaded_state() -> AppState {
    let mut state = AppState::new(Board::with_sample_tasks(), ThemeConfig::default());
    state.handle_event(AppEvent::Resize(90, 30));
    state
}

fn column_counts(state: &AppState) -> [usize; 3] {
    [
        state.board().column(Status::Todo).len(),
        state.board().column(Status::Doing).len(),
        state.board().column(Status::Done).len(),
    ]
}

fn snapshot(state: &AppState) -> Vec<Vec<Task>> {
    state
        .board()
        .columns()
        .iter()
        .map(|c| c.items().to_vec())
        .collect()
}

fn render(state: &mut AppState, width: u16, height: u16) -> String {
    let mut terminal = ratatui::Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| draw(state, frame)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

// === Controller ===

#[test]
fn test_starts_in_board_mode() {
    let state = AppState::new(Board::with_sample_tasks(), ThemeConfig::default());

    assert!(state.mode().is_board());
    assert!(!state.should_quit());
    assert!(!state.board().is_loaded());
    assert_eq!(state.board().focused(), Status::Todo);
}

#[test]
fn test_end_to_end_advance_done_wraps_to_todo() {
    let mut state = loaded_state();
    assert_eq!(column_counts(&state), [3, 2, 1]);

    state.handle_event(key(KeyCode::Char('l')));
    state.handle_event(key(KeyCode::Char('l')));
    assert_eq!(state.board().focused(), Status::Done);

    state.handle_event(key(KeyCode::Enter));

    assert_eq!(column_counts(&state), [4, 2, 0]);
    let moved = state.board().column(Status::Todo).items().last().unwrap();
    assert_eq!(moved.title, "Feed rabbit");
    assert_eq!(moved.status, Status::Todo);
}

#[test]
fn test_new_task_lands_in_focused_column() {
    let mut state = loaded_state();
    state.handle_event(key(KeyCode::Right));
    let before = snapshot(&state);

    state.handle_event(key(KeyCode::Char('n')));
    assert_eq!(state.mode().form().unwrap().target(), Status::Doing);

    type_text(&mut state, "Buy milk");
    state.handle_event(key(KeyCode::Enter));
    type_text(&mut state, "2%");
    state.handle_event(key(KeyCode::Enter));

    assert!(state.mode().is_board());
    assert_eq!(column_counts(&state), [3, 3, 1]);
    assert_eq!(
        state.board().column(Status::Doing).items().last().unwrap(),
        &Task::new(Status::Doing, "Buy milk", "2%")
    );

    let after = snapshot(&state);
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
}

#[test]
fn test_new_task_with_empty_fields_is_accepted() {
    let mut state = loaded_state();

    state.handle_event(key(KeyCode::Char('n')));
    state.handle_event(key(KeyCode::Enter));
    state.handle_event(key(KeyCode::Enter));

    assert_eq!(column_counts(&state), [4, 2, 1]);
    assert_eq!(
        state.board().column(Status::Todo).items().last().unwrap(),
        &Task::new(Status::Todo, "", "")
    );
}

#[test]
fn test_cancel_form_leaves_board_untouched() {
    let mut state = loaded_state();
    state.handle_event(key(KeyCode::Char('l')));
    let before = snapshot(&state);

    state.handle_event(key(KeyCode::Char('n')));
    type_text(&mut state, "half typed");
    state.handle_event(key(KeyCode::Esc));

    assert!(state.mode().is_board());
    assert_eq!(snapshot(&state), before);
    assert_eq!(state.board().focused(), Status::Doing);
}

#[test]
fn test_cancel_form_with_ctrl_c_does_not_quit() {
    let mut state = loaded_state();

    state.handle_event(key(KeyCode::Char('n')));
    state.handle_event(key(KeyCode::Enter));
    state.handle_event(ctrl('c'));

    assert!(state.mode().is_board());
    assert!(!state.should_quit());
    assert_eq!(column_counts(&state), [3, 2, 1]);
}

#[test]
fn test_board_keys_are_text_inside_form() {
    let mut state = loaded_state();

    state.handle_event(key(KeyCode::Char('n')));
    type_text(&mut state, "qhln");

    assert!(!state.should_quit());
    assert_eq!(state.board().focused(), Status::Todo);
    assert_eq!(state.mode().form().unwrap().title().value(), "qhln");
}

#[test]
fn test_quit_stops_processing_events() {
    let mut state = loaded_state();

    state.handle_event(key(KeyCode::Char('q')));
    assert!(state.should_quit());
    assert!(state.board().is_quitting());

    state.handle_event(key(KeyCode::Char('l')));
    state.handle_event(key(KeyCode::Enter));
    assert_eq!(state.board().focused(), Status::Todo);
    assert_eq!(column_counts(&state), [3, 2, 1]);
}

#[test]
fn test_ctrl_c_quits_from_board() {
    let mut state = loaded_state();

    state.handle_event(ctrl('c'));

    assert!(state.should_quit());
}

#[test]
fn test_resize_while_form_open_is_deferred() {
    let mut state = AppState::new(Board::with_sample_tasks(), ThemeConfig::default());

    state.handle_event(key(KeyCode::Char('n')));
    state.handle_event(AppEvent::Resize(90, 30));
    assert!(!state.board().is_loaded());

    state.handle_event(key(KeyCode::Esc));
    assert!(state.board().is_loaded());
    assert_eq!(state.board().column_size(), Some((30, 27)));
}

#[test]
fn test_resize_after_load_is_ignored() {
    let mut state = loaded_state();

    state.handle_event(AppEvent::Resize(300, 100));

    assert_eq!(state.board().column_size(), Some((30, 27)));
}

#[test]
fn test_task_created_event_appends_to_matching_column() {
    let mut state = loaded_state();

    state.handle_event(AppEvent::TaskCreated(Task::new(Status::Done, "Ship it", "")));

    assert_eq!(column_counts(&state), [3, 2, 2]);
    assert_eq!(state.board().column(Status::Done).items()[1].title, "Ship it");
}

#[test]
fn test_footer_text_follows_mode() {
    let mut state = loaded_state();
    assert!(build_footer_text(state.mode(), state.board()).contains("[n] new"));

    state.handle_event(key(KeyCode::Char('n')));
    assert!(build_footer_text(state.mode(), state.board()).contains("[enter] next"));

    state.handle_event(key(KeyCode::Enter));
    assert!(build_footer_text(state.mode(), state.board()).contains("[enter] save"));
}

#[test]
fn test_footer_text_while_filtering() {
    let mut state = loaded_state();
    assert!(build_footer_text(state.mode(), state.board()).contains("[/] filter"));

    state.handle_event(key(KeyCode::Char('/')));
    assert!(build_footer_text(state.mode(), state.board()).contains("[enter] apply"));

    type_text(&mut state, "milk");
    state.handle_event(key(KeyCode::Enter));
    assert!(build_footer_text(state.mode(), state.board()).contains("[esc] clear filter"));
}

#[test]
fn test_filter_then_advance_moves_matching_task() {
    let mut state = loaded_state();

    state.handle_event(key(KeyCode::Char('/')));
    type_text(&mut state, "bread");
    state.handle_event(key(KeyCode::Enter));
    assert_eq!(state.board().column(Status::Todo).selected().unwrap().title, "Buy bread");

    state.handle_event(key(KeyCode::Enter));

    assert_eq!(column_counts(&state), [2, 3, 1]);
    let moved = state.board().column(Status::Doing).items().last().unwrap();
    assert_eq!(moved, &Task::new(Status::Doing, "Buy bread", "White fresh bread"));
}

#[test]
fn test_new_task_key_is_text_while_filtering() {
    let mut state = loaded_state();

    state.handle_event(key(KeyCode::Char('/')));
    type_text(&mut state, "nq");

    assert!(state.mode().is_board());
    assert!(!state.should_quit());
    assert_eq!(state.board().column(Status::Todo).filter_query(), Some("nq"));
}

// === Rendering ===

#[test]
fn test_render_loading_before_first_resize() {
    let mut state = AppState::new(Board::with_sample_tasks(), ThemeConfig::default());

    let content = render(&mut state, 90, 24);

    assert!(content.contains(LOADING));
    assert!(!content.contains("To do"));
}

#[test]
fn test_render_three_columns() {
    let mut state = AppState::new(Board::with_sample_tasks(), ThemeConfig::default());
    state.handle_event(AppEvent::Resize(90, 24));

    let content = render(&mut state, 90, 24);

    assert!(content.contains("To do"));
    assert!(content.contains("In progress"));
    assert!(content.contains("Done"));
    assert!(content.contains("Do coffee"));
    assert!(content.contains("Feed rabbit"));
    // Rounded border only around the focused column
    assert_eq!(content.matches('╭').count(), 1);
}

#[test]
fn test_render_form_popup() {
    let mut state = AppState::new(Board::with_sample_tasks(), ThemeConfig::default());
    state.handle_event(AppEvent::Resize(90, 24));
    state.handle_event(key(KeyCode::Char('n')));
    type_text(&mut state, "Walk");

    let content = render(&mut state, 90, 24);

    assert!(content.contains("New task in To do"));
    assert!(content.contains("Walk"));
    assert!(content.contains("Description"));
}

#[test]
fn test_render_filter_shows_only_matches() {
    let mut state = loaded_state();
    state.handle_event(key(KeyCode::Char('/')));
    type_text(&mut state, "milk");

    let content = render(&mut state, 90, 24);

    assert!(content.contains("/milk"));
    assert!(content.contains("Buy milk"));
    assert!(!content.contains("Do coffee"));
    assert!(!content.contains("Buy bread"));
}

#[test]
fn test_render_keeps_scroll_offset_between_frames() {
    let mut board = Board::new();
    for i in 0..10 {
        board.add_task(Task::new(Status::Todo, format!("Task {i}"), ""));
    }
    let mut state = AppState::new(board, ThemeConfig::default());
    state.handle_event(AppEvent::Resize(90, 24));

    state.handle_event(key(KeyCode::End));
    render(&mut state, 90, 24);
    let offset = state.board().column(Status::Todo).list_state().offset();
    assert!(offset > 0);

    state.handle_event(key(KeyCode::Up));
    render(&mut state, 90, 24);

    assert_eq!(state.board().column(Status::Todo).list_state().offset(), offset);
}

#[test]
fn test_render_farewell_after_quit() {
    let mut state = loaded_state();
    state.handle_event(key(KeyCode::Char('q')));

    let content = render(&mut state, 90, 24);

    assert!(content.contains(FAREWELL));
    assert!(!content.contains("To do"));
}

// === Event loop ===

#[test]
fn test_run_loop_processes_events_until_quit() {
    let mut events = std::collections::VecDeque::from(vec![
        key(KeyCode::Char('l')),
        key(KeyCode::Char('l')),
        key(KeyCode::Enter),
        key(KeyCode::Char('q')),
    ]);
    let mut source = MockEventSource::new();
    source
        .expect_next_event()
        .times(4)
        .returning(move || Ok(events.pop_front().expect("no more events")));

    let mut terminal = ratatui::Terminal::new(TestBackend::new(90, 24)).unwrap();
    let mut state = AppState::new(Board::with_sample_tasks(), ThemeConfig::default());

    run_loop(&mut terminal, &mut state, &mut source).unwrap();

    assert!(state.should_quit());
    assert_eq!(state.board().column_size(), Some((30, 21)));
    assert_eq!(column_counts(&state), [4, 2, 0]);

    let content: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(content.contains(FAREWELL));
}

#[test]
fn test_run_loop_propagates_event_source_errors() {
    let mut source = MockEventSource::new();
    source
        .expect_next_event()
        .times(1)
        .returning(|| Err(anyhow::anyhow!("input stream closed")));

    let mut terminal = ratatui::Terminal::new(TestBackend::new(90, 24)).unwrap();
    let mut state = AppState::new(Board::with_sample_tasks(), ThemeConfig::default());

    let err = run_loop(&mut terminal, &mut state, &mut source).unwrap_err();

    assert!(err.to_string().contains("input stream closed"));
    assert!(!state.should_quit());
}
