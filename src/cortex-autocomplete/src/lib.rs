//! # Cortex Autocomplete
//!
//! A combobox for terminal UIs: a single-line text input paired with a
//! filtered, keyboard- and mouse-navigable suggestion menu.
//!
//! The caller supplies the items and decides how they are filtered, sorted,
//! rendered and whether they can be selected. The widget owns the
//! interaction state: whether the menu is open, which item is highlighted
//! and where the menu sits relative to the input.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cortex_autocomplete::prelude::*;
//! use ratatui::text::Line;
//!
//! let mut states = Autocomplete::new(
//!     vec!["Alabama", "Alaska", "Arizona"],
//!     |state: &&str| state.to_string(),
//!     |state: &&str, _highlighted, style| Line::styled(state.to_string(), style),
//! )
//! .with_should_item_render(|state, value| {
//!     state.to_lowercase().contains(&value.to_lowercase())
//! })
//! .on_select(|value, _| tracing::info!(value, "selected"));
//!
//! // Route terminal events
//! match states.handle_key(key_event) {
//!     ComponentResult::Done(value) => { /* an item was committed */ }
//!     ComponentResult::NotHandled => { /* Tab and friends: move focus */ }
//!     _ => {}
//! }
//!
//! // Render: the menu overlays whatever is below the input
//! frame.render_widget(&mut states, area);
//! ```
//!
//! ## Keyboard
//!
//! | Key | Menu closed | Menu open |
//! |-----|-------------|-----------|
//! | `↓` / `↑` | open, highlight next/previous | move highlight, wrapping |
//! | `Enter` | passed through | commit highlight, or close |
//! | `Esc` | close | close, clear highlight |
//! | `Tab` | passed through | passed through |
//! | other | open, edit text | edit text |
//!
//! ## Modules
//!
//! - [`autocomplete`] - the [`Autocomplete`] widget
//! - [`field`] - text, caret, selection and validity of the input
//! - [`filter`] / [`navigation`] - view derivation and highlight movement
//! - [`render`] - default input and menu renderers
//! - [`state`] - shared interaction state and the debug trace
//! - [`deferred`] - next-tick scroll restoration
//! - [`config`] / [`theme`] - behavior flags and colors

pub mod autocomplete;
pub mod component;
pub mod config;
pub mod deferred;
pub mod error;
pub mod field;
pub mod filter;
pub mod navigation;
pub mod render;
pub mod state;
pub mod theme;

pub use autocomplete::{
    Autocomplete, GetItemValue, InputOptions, IsItemSelectable, RenderInput, RenderItem,
    RenderMenu,
};
pub use component::{Component, ComponentResult, FocusState};
pub use config::{AutocompleteConfig, Margins};
pub use deferred::{ScrollOffset, ScrollSurface, TickTimer};
pub use error::{AutocompleteError, Result};
pub use field::{SelectionMode, TextField};
pub use filter::{ShouldItemRender, SortItems, filter_items};
pub use render::{
    InputProps, MenuItem, MenuLayout, MenuProps, MenuScroll, default_render_input,
    default_render_menu,
};
pub use state::{DebugSnapshot, DebugTrace, InteractionState, MenuGeometry};
pub use theme::ColorScheme;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::autocomplete::{Autocomplete, InputOptions};
    pub use crate::component::{Component, ComponentResult, FocusState};
    pub use crate::config::AutocompleteConfig;
    pub use crate::deferred::{ScrollOffset, ScrollSurface};
    pub use crate::field::SelectionMode;
    pub use crate::render::{InputProps, MenuLayout, MenuProps};
    pub use crate::theme::ColorScheme;
}
