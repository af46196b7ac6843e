//! Next-tick deferral and host scroll restoration.
//!
//! Re-focusing the input can make the host scroll it into view after the
//! current event has been handled. The autocomplete restores the recorded
//! offset right away and once more on the next tick.

use std::fmt;

/// Scroll position of the host viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    pub x: u16,
    pub y: u16,
}

impl ScrollOffset {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Host viewport whose scroll position survives a re-focus.
///
/// Takes `&self`; hosts share the viewport with the widget through interior
/// mutability (`Rc<Cell<_>>` and friends).
pub trait ScrollSurface {
    /// Current scroll position.
    fn offset(&self) -> ScrollOffset;

    /// Scroll to `offset`.
    fn scroll_to(&self, offset: ScrollOffset);
}

/// A payload scheduled to fire on the next host tick.
///
/// Scheduling replaces any pending payload, so at most one is ever queued.
pub struct TickTimer<T> {
    pending: Option<T>,
}

impl<T> TickTimer<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Queue `payload` for the next tick, dropping any earlier one.
    pub fn schedule(&mut self, payload: T) {
        self.pending = Some(payload);
    }

    /// Drop the pending payload. Returns true if one was queued.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the payload due on this tick.
    pub fn fire(&mut self) -> Option<T> {
        self.pending.take()
    }
}

impl<T> Default for TickTimer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TickTimer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickTimer")
            .field("pending", &self.pending.is_some())
            .finish()
    }
}
