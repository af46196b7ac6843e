//! Component trait and result types.
//!
//! The autocomplete implements [`Component`] so hosts can route terminal
//! events to it the same way they do for every other interactive widget.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// Result of handling an event in a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentResult<T = ()> {
    /// Component handled the event, continue displaying
    Handled,
    /// Component did not handle the event, propagate to parent
    NotHandled,
    /// Component completed with a value
    Done(T),
}

impl<T> ComponentResult<T> {
    /// Returns true if the component consumed the event.
    pub fn is_handled(&self) -> bool {
        matches!(self, ComponentResult::Handled | ComponentResult::Done(_))
    }
}

/// Focus state of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    /// Component is not focused
    #[default]
    Unfocused,
    /// Component has focus and is in edit/input mode
    Editing,
}

impl FocusState {
    /// Returns true if the component is in editing mode.
    pub fn is_editing(&self) -> bool {
        matches!(self, FocusState::Editing)
    }
}

/// Interface for interactive TUI components.
///
/// `render` takes `&mut self` because components record the areas they drew
/// into; mouse events are hit-tested against that layout.
pub trait Component {
    /// The type of value this component produces when completed.
    type Output;

    /// Render the component to the buffer.
    fn render(&mut self, area: Rect, buf: &mut Buffer);

    /// Handle a key event.
    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<Self::Output>;

    /// Handle a mouse event. Coordinates are absolute buffer positions.
    fn handle_mouse(&mut self, _mouse: MouseEvent) -> ComponentResult<Self::Output> {
        ComponentResult::NotHandled
    }

    /// Handle pasted text. Returns true if handled.
    fn handle_paste(&mut self, _text: &str) -> bool {
        false
    }

    /// Returns the current focus state of the component.
    fn focus_state(&self) -> FocusState;

    /// Deliver a focus change from the host.
    ///
    /// A component may refuse to lose focus; hosts should re-read
    /// [`focus_state`](Component::focus_state) afterwards.
    fn set_focus(&mut self, focused: bool);

    /// Returns key hints to display for this component.
    ///
    /// Each tuple is (key_label, description).
    fn key_hints(&self) -> Vec<(&'static str, &'static str)>;

    /// Called once per frame tick of the host event loop.
    fn tick(&mut self) {}

    /// Returns true if the component can be focused.
    fn can_focus(&self) -> bool {
        true
    }
}
