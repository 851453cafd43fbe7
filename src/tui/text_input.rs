use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line editable text field.
/// The cursor counts chars, not bytes, so multi-byte input edits cleanly.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
    focused: bool,
    placeholder: String,
}

impl TextInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Cursor position in chars
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Edit the buffer. Blurred fields ignore input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if !self.focused {
            return;
        }
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Left if alt => self.cursor = word_boundary_left(&self.value, self.cursor),
            KeyCode::Right if alt => self.cursor = word_boundary_right(&self.value, self.cursor),
            // macOS: Option+Left/Right sends Alt+b / Alt+f
            KeyCode::Char('b') if alt => self.cursor = word_boundary_left(&self.value, self.cursor),
            KeyCode::Char('f') if alt => self.cursor = word_boundary_right(&self.value, self.cursor),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.char_len(),
            KeyCode::Char('u') if ctrl => {
                let tail = self.value.chars().skip(self.cursor).collect();
                self.value = tail;
                self.cursor = 0;
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_len(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.value.remove(self.byte_offset(self.cursor));
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.char_len() {
                    self.value.remove(self.byte_offset(self.cursor));
                }
            }
            KeyCode::Char(c) if !ctrl && !alt => {
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
            }
            _ => {}
        }
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

/// Find the previous word boundary (for Alt+Left)
fn word_boundary_left(s: &str, pos: usize) -> usize {
    let chars: Vec<char> = s.chars().collect();
    let mut i = pos.min(chars.len());
    // Skip whitespace/punctuation
    while i > 0 && !chars[i - 1].is_alphanumeric() {
        i -= 1;
    }
    // Skip word characters
    while i > 0 && chars[i - 1].is_alphanumeric() {
        i -= 1;
    }
    i
}

/// Find the next word boundary (for Alt+Right)
fn word_boundary_right(s: &str, pos: usize) -> usize {
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    let mut i = pos.min(len);
    while i < len && chars[i].is_alphanumeric() {
        i += 1;
    }
    while i < len && !chars[i].is_alphanumeric() {
        i += 1;
    }
    i
}
