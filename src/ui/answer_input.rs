use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the surrounding screen should do after a key went to the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Edited,
    Submit,
    Skip,
    /// Tab / Shift-Tab.
    Switch,
    Cancel,
}

/// Single-line answer field with a char-indexed cursor.
#[derive(Clone, Debug, Default)]
pub struct AnswerInput {
    text: String,
    cursor: usize,
}

impl AnswerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert pasted text at the cursor. Line breaks are dropped since an
    /// answer is a single line.
    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars().filter(|c| !matches!(c, '\n' | '\r')) {
            self.insert_char(ch);
        }
    }

    /// (before cursor, char under cursor, after it). The middle is `None` at end of line.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let at = self.byte_at(self.cursor);
        match self.text[at..].chars().next() {
            Some(ch) => (&self.text[..at], Some(ch), &self.text[at + ch.len_utf8()..]),
            None => (&self.text, None, ""),
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return InputAction::Cancel,
            KeyCode::Enter => return InputAction::Submit,
            KeyCode::Tab | KeyCode::BackTab => return InputAction::Switch,
            KeyCode::Char('n') if ctrl => return InputAction::Skip,
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_len(),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.char_len(),
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_at_cursor();
                }
            }
            KeyCode::Delete => self.remove_at_cursor(),
            KeyCode::Char(ch) if !ctrl => self.insert_char(ch),
            _ => {}
        }
        InputAction::Edited
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn insert_char(&mut self, ch: char) {
        let at = self.byte_at(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    fn remove_at_cursor(&mut self) {
        let at = self.byte_at(self.cursor);
        if at < self.text.len() {
            self.text.remove(at);
        }
    }

    /// unix-word-rubout: trailing whitespace, then the word before it.
    fn delete_word_back(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let (from, to) = (self.byte_at(start), self.byte_at(self.cursor));
        self.text.replace_range(from..to, "");
        self.cursor = start;
    }
}
