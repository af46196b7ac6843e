//! Keyboard navigation over the filtered view.
//!
//! Index arithmetic only: every function works on the length of the current
//! view plus a selectability predicate over view positions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Keys with dedicated autocomplete behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Tab,
}

impl NavKey {
    /// Classify a key event. Key releases are never navigation keys.
    pub fn from_event(key: &KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        match key.code {
            KeyCode::Down => Some(NavKey::ArrowDown),
            KeyCode::Up => Some(NavKey::ArrowUp),
            KeyCode::Enter => Some(NavKey::Enter),
            KeyCode::Esc => Some(NavKey::Escape),
            KeyCode::Tab | KeyCode::BackTab => Some(NavKey::Tab),
            _ => None,
        }
    }
}

/// Returns true for a genuine Enter press.
///
/// Auto-repeated Enter shares the key code but must not commit a selection.
pub fn is_enter_keystroke(key: &KeyEvent) -> bool {
    key.code == KeyCode::Enter && key.kind == KeyEventKind::Press
}

/// Next selectable position after `current`, wrapping.
///
/// Returns `None` when nothing changes: the view is empty, nothing is
/// selectable, or `current` is the only selectable position.
pub fn next_selectable(
    len: usize,
    current: Option<usize>,
    is_selectable: impl Fn(usize) -> bool,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let start = current.map_or(0, |idx| idx + 1);
    (0..len)
        .map(|step| (start + step) % len)
        .find(|&idx| is_selectable(idx))
        .filter(|&idx| Some(idx) != current)
}

/// Previous selectable position before `current`, wrapping.
///
/// Starts from the last item when nothing is highlighted.
pub fn prev_selectable(
    len: usize,
    current: Option<usize>,
    is_selectable: impl Fn(usize) -> bool,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let origin = current.unwrap_or(len);
    (1..=len)
        .map(|step| (origin + len - step) % len)
        .find(|&idx| is_selectable(idx))
        .filter(|&idx| Some(idx) != current)
}

/// Resolve the auto-highlighted position.
///
/// Walks forward from `current` (or 0) to the first selectable position and
/// highlights it when the non-empty `value` is a case-insensitive prefix of
/// its display value.
pub fn auto_highlight(
    len: usize,
    current: Option<usize>,
    value: &str,
    is_selectable: impl Fn(usize) -> bool,
    item_value: impl Fn(usize) -> String,
) -> Option<usize> {
    if value.is_empty() || len == 0 {
        return None;
    }
    let start = current.unwrap_or(0) % len;
    let candidate = (0..len)
        .map(|step| (start + step) % len)
        .find(|&idx| is_selectable(idx))?;

    let needle = value.to_lowercase();
    item_value(candidate)
        .to_lowercase()
        .starts_with(&needle)
        .then_some(candidate)
}
