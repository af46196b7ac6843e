//! Text field backing the autocomplete input.
//!
//! Holds the value, caret and selection (all positions in graphemes) plus the
//! element-level state a native text input carries: focus, disabled,
//! required and a custom validity message.

use crate::error::{AutocompleteError, Result};
use unicode_segmentation::UnicodeSegmentation;

/// Where the selection lands after [`TextField::set_range_text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Select the inserted text.
    Select,
    /// Collapse the caret before the inserted text.
    Start,
    /// Collapse the caret after the inserted text.
    End,
    /// Keep the current selection, shifted around the edit.
    #[default]
    Preserve,
}

/// Editable single-line text state.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    selection_start: usize,
    selection_end: usize,
    focused: bool,
    disabled: bool,
    required: bool,
    custom_validity: String,
}

impl TextField {
    /// Create an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial value, caret at the end.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value. Like a native input, the caret moves to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.move_end();
    }

    /// Length in graphemes.
    pub fn len(&self) -> usize {
        self.value.graphemes(true).count()
    }

    /// Returns true when the value is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Caret position (end of the selection).
    pub fn cursor(&self) -> usize {
        self.selection_end
    }

    /// Selection as `(start, end)`; equal when collapsed.
    pub fn selection_range(&self) -> (usize, usize) {
        (self.selection_start, self.selection_end)
    }

    /// Returns true when a non-empty range is selected.
    pub fn has_selection(&self) -> bool {
        self.selection_start != self.selection_end
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.focused = false;
        }
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Insert a character, replacing the selection.
    pub fn insert(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// Insert text at the caret, replacing the selection.
    pub fn insert_str(&mut self, text: &str) {
        let start = self.grapheme_to_byte_offset(self.selection_start);
        let end = self.grapheme_to_byte_offset(self.selection_end);
        self.value.replace_range(start..end, text);
        self.collapse_to(self.selection_start + text.graphemes(true).count());
    }

    /// Delete the selection, or the grapheme before the caret.
    pub fn backspace(&mut self) {
        if self.has_selection() {
            self.delete_selection();
        } else if self.selection_end > 0 {
            let start = self.grapheme_to_byte_offset(self.selection_end - 1);
            let end = self.grapheme_to_byte_offset(self.selection_end);
            self.value.replace_range(start..end, "");
            self.collapse_to(self.selection_end - 1);
        }
    }

    /// Delete the selection, or the grapheme at the caret.
    pub fn delete(&mut self) {
        if self.has_selection() {
            self.delete_selection();
        } else if self.selection_end < self.len() {
            let start = self.grapheme_to_byte_offset(self.selection_end);
            let end = self.grapheme_to_byte_offset(self.selection_end + 1);
            self.value.replace_range(start..end, "");
        }
    }

    pub fn move_left(&mut self) {
        let target = if self.has_selection() {
            self.selection_start
        } else {
            self.selection_end.saturating_sub(1)
        };
        self.collapse_to(target);
    }

    pub fn move_right(&mut self) {
        let target = if self.has_selection() {
            self.selection_end
        } else {
            (self.selection_end + 1).min(self.len())
        };
        self.collapse_to(target);
    }

    pub fn move_home(&mut self) {
        self.collapse_to(0);
    }

    pub fn move_end(&mut self) {
        self.collapse_to(self.len());
    }

    /// Clear the value.
    pub fn clear(&mut self) {
        self.value.clear();
        self.collapse_to(0);
    }

    /// Select the whole value.
    pub fn select_all(&mut self) {
        self.selection_start = 0;
        self.selection_end = self.len();
    }

    /// Set the selection. Out-of-range positions clamp to the length and a
    /// start past the end collapses onto the end.
    pub fn set_selection_range(&mut self, start: usize, end: usize) {
        let len = self.len();
        let end = end.min(len);
        self.selection_start = start.min(end);
        self.selection_end = end;
    }

    /// Replace a range (or the selection when `range` is `None`) with
    /// `replacement`, then place the selection according to `mode`.
    pub fn set_range_text(
        &mut self,
        replacement: &str,
        range: Option<(usize, usize)>,
        mode: SelectionMode,
    ) -> Result<()> {
        let (start, end) = range.unwrap_or((self.selection_start, self.selection_end));
        if start > end {
            return Err(AutocompleteError::IndexSize { start, end });
        }
        let len = self.len();
        let (start, end) = (start.min(len), end.min(len));

        let start_byte = self.grapheme_to_byte_offset(start);
        let end_byte = self.grapheme_to_byte_offset(end);
        self.value.replace_range(start_byte..end_byte, replacement);

        let new_len = replacement.graphemes(true).count();
        let new_end = start + new_len;
        match mode {
            SelectionMode::Select => {
                self.selection_start = start;
                self.selection_end = new_end;
            }
            SelectionMode::Start => self.collapse_to(start),
            SelectionMode::End => self.collapse_to(new_end),
            SelectionMode::Preserve => {
                let shift = |pos: usize| {
                    if pos > end {
                        pos - (end - start) + new_len
                    } else if pos > start {
                        new_end
                    } else {
                        pos
                    }
                };
                let old_start = self.selection_start;
                self.selection_start = if old_start > end {
                    shift(old_start)
                } else if old_start > start {
                    start
                } else {
                    old_start
                };
                self.selection_end = shift(self.selection_end);
            }
        }
        Ok(())
    }

    /// Set a custom validation message; empty marks the field valid.
    pub fn set_custom_validity(&mut self, message: impl Into<String>) {
        self.custom_validity = message.into();
    }

    /// Current validation message, if the field is invalid.
    pub fn validation_message(&self) -> Option<&str> {
        if !self.custom_validity.is_empty() {
            Some(&self.custom_validity)
        } else if self.required && self.value.is_empty() {
            Some("Please fill out this field.")
        } else {
            None
        }
    }

    /// Returns true when the field satisfies its constraints.
    pub fn check_validity(&self) -> bool {
        self.validation_message().is_none()
    }

    fn delete_selection(&mut self) {
        let start = self.grapheme_to_byte_offset(self.selection_start);
        let end = self.grapheme_to_byte_offset(self.selection_end);
        self.value.replace_range(start..end, "");
        self.collapse_to(self.selection_start);
    }

    fn collapse_to(&mut self, pos: usize) {
        self.selection_start = pos;
        self.selection_end = pos;
    }

    fn grapheme_to_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.value.len())
    }
}
