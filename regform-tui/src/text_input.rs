use regform_lib::Field;

use crate::event::{Key, Modifiers};

/// Data for a single text input: text content and cursor state.
///
/// `cursor` and `anchor` are character indices, not byte offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInputData {
    pub text: String,
    pub cursor: usize,
    /// Anchor position for selection. When Some and != cursor, text is selected.
    pub anchor: Option<usize>,
}

impl TextInputData {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            anchor: None,
        }
    }

    /// Get the selection range as (start, end) where start <= end.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.anchor.and_then(|a| {
            if a != self.cursor {
                Some(if a < self.cursor {
                    (a, self.cursor)
                } else {
                    (self.cursor, a)
                })
            } else {
                None
            }
        })
    }

    pub fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    pub fn select_all(&mut self) {
        if !self.text.is_empty() {
            self.anchor = Some(0);
            self.cursor = self.char_count();
        }
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Remove the characters in `start..end`, leaving the cursor at `start`.
    fn remove_range(&mut self, start: usize, end: usize) {
        let from = char_to_byte_index(&self.text, start);
        let to = char_to_byte_index(&self.text, end);
        self.text.replace_range(from..to, "");
        self.cursor = start;
        self.clear_selection();
    }

    /// Insert a character at cursor, replacing selection if any.
    fn insert_char(&mut self, c: char) {
        if let Some((start, end)) = self.selection() {
            self.remove_range(start, end);
        }
        let byte_pos = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(byte_pos, c);
        self.cursor += 1;
    }

    /// Delete character before cursor or delete selection.
    /// Returns true if text changed.
    fn delete_back(&mut self) -> bool {
        if let Some((start, end)) = self.selection() {
            self.remove_range(start, end);
            true
        } else if self.cursor > 0 {
            self.remove_range(self.cursor - 1, self.cursor);
            true
        } else {
            false
        }
    }

    /// Delete character after cursor or delete selection.
    /// Returns true if text changed.
    fn delete_forward(&mut self) -> bool {
        if let Some((start, end)) = self.selection() {
            self.remove_range(start, end);
            true
        } else if self.cursor < self.char_count() {
            self.remove_range(self.cursor, self.cursor + 1);
            true
        } else {
            false
        }
    }

    /// Move cursor by delta characters.
    fn move_cursor(&mut self, delta: isize, extend_selection: bool) {
        if extend_selection && self.anchor.is_none() {
            self.anchor = Some(self.cursor);
        } else if !extend_selection {
            // Collapse to the edge of an existing selection
            if let Some((start, end)) = self.selection() {
                self.cursor = if delta < 0 { start } else { end };
                self.clear_selection();
                return;
            }
            self.clear_selection();
        }

        self.cursor = self
            .cursor
            .saturating_add_signed(delta)
            .min(self.char_count());
    }

    fn move_to(&mut self, pos: usize, extend_selection: bool) {
        if extend_selection && self.anchor.is_none() {
            self.anchor = Some(self.cursor);
        } else if !extend_selection {
            self.clear_selection();
        }
        self.cursor = pos;
    }

    /// Handle a key press for text editing.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> TextEditResult {
        match key {
            Key::Char('a') if modifiers.ctrl => {
                self.select_all();
                TextEditResult::Handled
            }

            Key::Char(c) if modifiers.none() || (modifiers.shift && !modifiers.ctrl) => {
                self.insert_char(c);
                TextEditResult::Changed
            }

            Key::Backspace if modifiers.none() => {
                if self.delete_back() {
                    TextEditResult::Changed
                } else {
                    TextEditResult::Handled
                }
            }

            Key::Delete if modifiers.none() => {
                if self.delete_forward() {
                    TextEditResult::Changed
                } else {
                    TextEditResult::Handled
                }
            }

            Key::Left if !modifiers.ctrl => {
                self.move_cursor(-1, modifiers.shift);
                TextEditResult::Handled
            }

            Key::Right if !modifiers.ctrl => {
                self.move_cursor(1, modifiers.shift);
                TextEditResult::Handled
            }

            Key::Home if !modifiers.ctrl => {
                self.move_to(0, modifiers.shift);
                TextEditResult::Handled
            }

            Key::End if !modifiers.ctrl => {
                let end = self.char_count();
                self.move_to(end, modifiers.shift);
                TextEditResult::Handled
            }

            Key::Enter => TextEditResult::Submitted,

            _ => TextEditResult::Ignored,
        }
    }
}

/// Text input state for every field on the form.
#[derive(Debug, Default)]
pub struct TextInputs {
    inputs: [TextInputData; 4],
}

impl TextInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &TextInputData {
        &self.inputs[field.index()]
    }

    pub fn text(&self, field: Field) -> &str {
        &self.get(field).text
    }

    pub fn handle_key(&mut self, field: Field, key: Key, modifiers: Modifiers) -> TextEditResult {
        self.inputs[field.index()].handle_key(key, modifiers)
    }

    pub fn clear(&mut self) {
        self.inputs = Default::default();
    }
}

/// Result of handling a text editing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditResult {
    /// Text was modified.
    Changed,
    /// Enter was pressed.
    Submitted,
    /// Key was handled but text didn't change (e.g., cursor movement).
    Handled,
    /// Key was not handled, should be passed through.
    Ignored,
}

/// Convert character index to byte index in a string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(data: &mut TextInputData, s: &str) {
        for c in s.chars() {
            assert_eq!(data.handle_key(Key::Char(c), Modifiers::new()), TextEditResult::Changed);
        }
    }

    #[test]
    fn test_typing_appends() {
        let mut data = TextInputData::default();
        type_str(&mut data, "alice");
        assert_eq!(data.text, "alice");
        assert_eq!(data.cursor, 5);
    }

    #[test]
    fn test_insert_in_middle_with_multibyte() {
        let mut data = TextInputData::new("héllo");
        data.handle_key(Key::Home, Modifiers::new());
        data.handle_key(Key::Right, Modifiers::new());
        data.handle_key(Key::Right, Modifiers::new());
        type_str(&mut data, "X");
        assert_eq!(data.text, "héXllo");
        assert_eq!(data.cursor, 3);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut data = TextInputData::new("abc");
        assert_eq!(data.handle_key(Key::Backspace, Modifiers::new()), TextEditResult::Changed);
        assert_eq!(data.text, "ab");

        data.handle_key(Key::Home, Modifiers::new());
        assert_eq!(data.handle_key(Key::Backspace, Modifiers::new()), TextEditResult::Handled);
        assert_eq!(data.handle_key(Key::Delete, Modifiers::new()), TextEditResult::Changed);
        assert_eq!(data.text, "b");
    }

    #[test]
    fn test_select_all_then_type_replaces() {
        let mut data = TextInputData::new("secret");
        data.handle_key(Key::Char('a'), Modifiers::ctrl());
        assert_eq!(data.selection(), Some((0, 6)));

        type_str(&mut data, "x");
        assert_eq!(data.text, "x");
        assert!(!data.has_selection());
    }

    #[test]
    fn test_shift_selection_delete() {
        let mut data = TextInputData::new("abcdef");
        data.handle_key(Key::Left, Modifiers::shift());
        data.handle_key(Key::Left, Modifiers::shift());
        assert_eq!(data.selection(), Some((4, 6)));

        data.handle_key(Key::Backspace, Modifiers::new());
        assert_eq!(data.text, "abcd");
        assert_eq!(data.cursor, 4);
    }

    #[test]
    fn test_left_collapses_selection() {
        let mut data = TextInputData::new("abc");
        data.select_all();
        data.handle_key(Key::Left, Modifiers::new());
        assert_eq!(data.cursor, 0);
        assert!(!data.has_selection());
    }

    #[test]
    fn test_cursor_clamped() {
        let mut data = TextInputData::new("ab");
        data.handle_key(Key::Right, Modifiers::new());
        assert_eq!(data.cursor, 2);
        data.handle_key(Key::Home, Modifiers::new());
        data.handle_key(Key::Left, Modifiers::new());
        assert_eq!(data.cursor, 0);
    }

    #[test]
    fn test_enter_submits_and_tab_passes_through() {
        let mut data = TextInputData::default();
        assert_eq!(data.handle_key(Key::Enter, Modifiers::new()), TextEditResult::Submitted);
        assert_eq!(data.handle_key(Key::Tab, Modifiers::new()), TextEditResult::Ignored);
        assert_eq!(data.handle_key(Key::Char('s'), Modifiers::ctrl()), TextEditResult::Ignored);
    }

    #[test]
    fn test_inputs_are_independent() {
        let mut inputs = TextInputs::new();
        inputs.handle_key(Field::Email, Key::Char('a'), Modifiers::new());
        assert_eq!(inputs.text(Field::Email), "a");
        assert_eq!(inputs.text(Field::Username), "");

        inputs.clear();
        assert_eq!(inputs.text(Field::Email), "");
    }
}
