//! Interaction state shared by the input controller and the menu.

use crate::config::Margins;
use ratatui::layout::Rect;
use serde::Serialize;
use std::collections::VecDeque;

/// Anchor of the suggestion menu, in buffer cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuGeometry {
    pub top: u16,
    pub left: u16,
    pub min_width: u16,
}

impl MenuGeometry {
    /// Anchor the menu under `input`, honoring the input margins.
    pub fn below(input: Rect, margin: Margins) -> Self {
        Self {
            top: input.bottom().saturating_add(margin.bottom),
            left: input.x.saturating_add(margin.left),
            min_width: input
                .width
                .saturating_add(margin.left)
                .saturating_add(margin.right),
        }
    }

    /// Menu rectangle for `content_width` x `height`, clamped into `bounds`.
    ///
    /// The menu is at least `min_width` wide. When it does not fit below the
    /// anchor it is shortened rather than moved.
    pub fn area(&self, content_width: u16, height: u16, bounds: Rect) -> Rect {
        let width = content_width.max(self.min_width).min(bounds.width);
        let x = self
            .left
            .max(bounds.x)
            .min(bounds.right().saturating_sub(width));
        let y = self.top.max(bounds.y).min(bounds.bottom());
        let height = height.min(bounds.bottom().saturating_sub(y));
        Rect::new(x, y, width, height)
    }
}

/// Open/highlight/geometry state of one autocomplete instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InteractionState {
    pub is_open: bool,
    pub highlighted_index: Option<usize>,
    pub menu: Option<MenuGeometry>,
}

impl InteractionState {
    /// Close the menu and drop the highlight.
    pub fn close(&mut self) {
        self.is_open = false;
        self.highlighted_index = None;
    }
}

/// A recorded interaction state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugSnapshot {
    pub id: usize,
    pub state: InteractionState,
}

/// Bounded trace of the most recent interaction states.
#[derive(Debug, Clone)]
pub struct DebugTrace {
    snapshots: VecDeque<DebugSnapshot>,
    next_id: usize,
    capacity: usize,
}

impl DebugTrace {
    /// Number of states kept for display.
    pub const DEFAULT_CAPACITY: usize = 5;

    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            next_id: 0,
            capacity,
        }
    }

    /// Record a state; the oldest one falls off once full.
    pub fn record(&mut self, state: InteractionState) {
        if self.capacity == 0 {
            return;
        }
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(DebugSnapshot {
            id: self.next_id,
            state,
        });
        self.next_id += 1;
    }

    /// Recorded states, oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = &DebugSnapshot> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Pretty JSON of the recorded states, newest first.
    pub fn to_json(&self) -> String {
        let snapshots: Vec<&DebugSnapshot> = self.snapshots.iter().rev().collect();
        serde_json::to_string_pretty(&snapshots).unwrap_or_default()
    }
}

impl Default for DebugTrace {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
