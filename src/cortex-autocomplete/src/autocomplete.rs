//! The autocomplete combobox.
//!
//! A text input paired with a suggestion menu. The input controller and the
//! menu share one [`InteractionState`]; every handler mutates that state and
//! then runs [`Autocomplete::did_update`], which reacts to open transitions
//! (menu positioning, visibility callback) the same way for every path.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cortex_autocomplete::prelude::*;
//! use ratatui::text::Line;
//!
//! let mut fruit = Autocomplete::new(
//!     vec!["apple", "banana", "cherry"],
//!     |item: &&str| item.to_string(),
//!     |item: &&str, _highlighted, style| Line::styled(item.to_string(), style),
//! )
//! .with_should_item_render(|item, value| item.contains(value))
//! .on_select(|value, _item| tracing::info!(value, "picked"));
//!
//! fruit.set_focus(true);
//! fruit.handle_key(key_event);
//! frame.render_widget(&mut fruit, area);
//! ```

use crate::component::{Component, ComponentResult, FocusState};
use crate::config::AutocompleteConfig;
use crate::deferred::{ScrollOffset, ScrollSurface, TickTimer};
use crate::error::{AutocompleteError, Result};
use crate::field::{SelectionMode, TextField};
use crate::filter::{ShouldItemRender, SortItems, filter_items};
use crate::navigation::{self, NavKey};
use crate::render::{
    InputProps, MENU_CHROME_HEIGHT, MENU_CHROME_WIDTH, MenuItem, MenuLayout, MenuProps,
    MenuScroll, default_render_input, default_render_menu, line_width, render_debug_trace,
};
use crate::state::{DebugSnapshot, DebugTrace, InteractionState, MenuGeometry};
use crate::theme::ColorScheme;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Widget;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Extracts the display string of an item.
pub type GetItemValue<T> = dyn Fn(&T) -> String;

/// Renders one item: `(item, highlighted, suggested_style)`.
pub type RenderItem<T> = dyn Fn(&T, bool, Style) -> Line<'static>;

/// Decides whether an item can be highlighted and selected.
pub type IsItemSelectable<T> = dyn Fn(&T) -> bool;

/// Renders the menu container and reports where rows were drawn.
pub type RenderMenu = dyn Fn(MenuProps<'_>, &mut Buffer) -> MenuLayout;

/// Renders the input element.
pub type RenderInput = dyn Fn(&InputProps<'_>, Rect, &mut Buffer);

/// Caller options for the input element.
///
/// Handlers set here run after the autocomplete's own handling.
#[derive(Default)]
pub struct InputOptions {
    pub placeholder: Option<String>,
    pub disabled: bool,
    pub required: bool,
    pub style: Style,
    on_key_down: Option<Box<dyn FnMut(&KeyEvent)>>,
    on_click: Option<Box<dyn FnMut()>>,
    on_focus: Option<Box<dyn FnMut()>>,
    on_blur: Option<Box<dyn FnMut()>>,
}

impl InputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn on_key_down(mut self, handler: impl FnMut(&KeyEvent) + 'static) -> Self {
        self.on_key_down = Some(Box::new(handler));
        self
    }

    pub fn on_click(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn on_focus(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_focus = Some(Box::new(handler));
        self
    }

    pub fn on_blur(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_blur = Some(Box::new(handler));
        self
    }
}

struct Callbacks<T> {
    on_change: Option<Box<dyn FnMut(&str)>>,
    on_select: Option<Box<dyn FnMut(&str, &T)>>,
    on_menu_visibility_change: Option<Box<dyn FnMut(bool)>>,
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self {
            on_change: None,
            on_select: None,
            on_menu_visibility_change: None,
        }
    }
}

/// Target of a pending left-button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Press {
    Input,
    Menu(Option<usize>),
}

/// Text input with a filtered, keyboard-navigable suggestion menu.
pub struct Autocomplete<T> {
    items: Vec<T>,
    get_item_value: Box<GetItemValue<T>>,
    render_item: Box<RenderItem<T>>,
    should_item_render: Option<Box<ShouldItemRender<T>>>,
    is_item_selectable: Option<Box<IsItemSelectable<T>>>,
    sort_items: Option<Box<SortItems<T>>>,
    render_menu: Option<Box<RenderMenu>>,
    render_input: Option<Box<RenderInput>>,
    callbacks: Callbacks<T>,
    input: InputOptions,
    config: AutocompleteConfig,
    colors: ColorScheme,
    menu_style: Style,
    wrapper_style: Style,
    /// Caller-controlled visibility; wins over `state.is_open` when set.
    open: Option<bool>,

    field: TextField,
    mounted: bool,
    state: InteractionState,

    ignore_blur: bool,
    ignore_focus: bool,
    scroll_offset: Option<ScrollOffset>,
    scroll_restore: TickTimer<ScrollOffset>,
    scroll_surface: Option<Box<dyn ScrollSurface>>,

    menu_scroll: MenuScroll,
    reveal_highlight: bool,
    input_area: Option<Rect>,
    menu_layout: Option<MenuLayout>,
    pointer_in_menu: bool,
    pressed: Option<Press>,
    trace: DebugTrace,
}

impl<T> Autocomplete<T> {
    /// Create an autocomplete over `items`.
    ///
    /// `get_item_value` gives the text committed on selection and used for
    /// auto-highlighting; `render_item` draws one menu row.
    pub fn new(
        items: Vec<T>,
        get_item_value: impl Fn(&T) -> String + 'static,
        render_item: impl Fn(&T, bool, Style) -> Line<'static> + 'static,
    ) -> Self {
        Self {
            items,
            get_item_value: Box::new(get_item_value),
            render_item: Box::new(render_item),
            should_item_render: None,
            is_item_selectable: None,
            sort_items: None,
            render_menu: None,
            render_input: None,
            callbacks: Callbacks::default(),
            input: InputOptions::default(),
            config: AutocompleteConfig::default(),
            colors: ColorScheme::default(),
            menu_style: Style::default(),
            wrapper_style: Style::default(),
            open: None,
            field: TextField::new(),
            mounted: false,
            state: InteractionState::default(),
            ignore_blur: false,
            ignore_focus: false,
            scroll_offset: None,
            scroll_restore: TickTimer::new(),
            scroll_surface: None,
            menu_scroll: MenuScroll::default(),
            reveal_highlight: false,
            input_area: None,
            menu_layout: None,
            pointer_in_menu: false,
            pressed: None,
            trace: DebugTrace::default(),
        }
    }

    // ------------------------------------------------------------------
    // Builder
    // ------------------------------------------------------------------

    /// Set the initial value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.field.set_value(value);
        self.derive_initial_highlight();
        self
    }

    pub fn with_config(mut self, config: AutocompleteConfig) -> Self {
        self.config = config;
        self.derive_initial_highlight();
        self
    }

    pub fn with_auto_highlight(mut self, enabled: bool) -> Self {
        self.config.auto_highlight = enabled;
        self.derive_initial_highlight();
        self
    }

    pub fn with_select_on_blur(mut self, enabled: bool) -> Self {
        self.config.select_on_blur = enabled;
        self
    }

    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    pub fn with_colors(mut self, colors: ColorScheme) -> Self {
        self.colors = colors;
        self
    }

    /// Style patched over the default menu style.
    pub fn with_menu_style(mut self, style: Style) -> Self {
        self.menu_style = style;
        self
    }

    /// Style applied to the whole area the widget is rendered into.
    pub fn with_wrapper_style(mut self, style: Style) -> Self {
        self.wrapper_style = style;
        self
    }

    pub fn with_should_item_render(
        mut self,
        predicate: impl Fn(&T, &str) -> bool + 'static,
    ) -> Self {
        self.should_item_render = Some(Box::new(predicate));
        self.derive_initial_highlight();
        self
    }

    pub fn with_is_item_selectable(mut self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.is_item_selectable = Some(Box::new(predicate));
        self.derive_initial_highlight();
        self
    }

    pub fn with_sort_items(
        mut self,
        compare: impl Fn(&T, &T, &str) -> Ordering + 'static,
    ) -> Self {
        self.sort_items = Some(Box::new(compare));
        self.derive_initial_highlight();
        self
    }

    pub fn with_render_menu(
        mut self,
        render: impl Fn(MenuProps<'_>, &mut Buffer) -> MenuLayout + 'static,
    ) -> Self {
        self.render_menu = Some(Box::new(render));
        self
    }

    pub fn with_render_input(
        mut self,
        render: impl Fn(&InputProps<'_>, Rect, &mut Buffer) + 'static,
    ) -> Self {
        self.render_input = Some(Box::new(render));
        self
    }

    pub fn with_input_options(mut self, options: InputOptions) -> Self {
        self.field.set_disabled(options.disabled);
        self.field.set_required(options.required);
        self.input = options;
        self
    }

    /// Control visibility from outside. `None` leaves it to the widget.
    pub fn with_open(mut self, open: Option<bool>) -> Self {
        self.open = open;
        self
    }

    /// Viewport whose offset is restored when a menu click re-focuses the
    /// input.
    pub fn with_scroll_surface(mut self, surface: impl ScrollSurface + 'static) -> Self {
        self.scroll_surface = Some(Box::new(surface));
        self
    }

    pub fn on_change(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.callbacks.on_change = Some(Box::new(handler));
        self
    }

    pub fn on_select(mut self, handler: impl FnMut(&str, &T) + 'static) -> Self {
        self.callbacks.on_select = Some(Box::new(handler));
        self
    }

    pub fn on_menu_visibility_change(mut self, handler: impl FnMut(bool) + 'static) -> Self {
        self.callbacks.on_menu_visibility_change = Some(Box::new(handler));
        self
    }

    // ------------------------------------------------------------------
    // Props
    // ------------------------------------------------------------------

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replace the items.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.receive_props(false);
    }

    pub fn value(&self) -> &str {
        self.field.value()
    }

    /// Replace the value from outside. Does not call `on_change`.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        let changed = value != self.field.value();
        if changed {
            self.field.set_value(value);
        }
        self.receive_props(changed);
    }

    /// Control visibility from outside. `None` leaves it to the widget.
    pub fn set_open(&mut self, open: Option<bool>) {
        let forced_open = open == Some(true) && self.open != Some(true);
        self.open = open;
        self.receive_props(false);
        if forced_open {
            self.set_menu_positions();
            self.reveal_highlight = true;
        }
    }

    pub fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // State queries
    // ------------------------------------------------------------------

    /// Whether the menu is visible, honoring the external override.
    pub fn is_open(&self) -> bool {
        self.open.unwrap_or(self.state.is_open)
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Highlighted position in the filtered view.
    pub fn highlighted_index(&self) -> Option<usize> {
        self.state.highlighted_index
    }

    pub fn highlighted_item(&self) -> Option<&T> {
        self.highlighted_item_index().map(|idx| &self.items[idx])
    }

    pub fn menu_geometry(&self) -> Option<MenuGeometry> {
        self.state.menu
    }

    /// The current filtered and sorted view.
    pub fn filtered_items(&self) -> Vec<&T> {
        self.filtered_indices()
            .into_iter()
            .map(|idx| &self.items[idx])
            .collect()
    }

    pub fn field(&self) -> &TextField {
        &self.field
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether a blur would currently be ignored.
    pub fn is_ignoring_blur(&self) -> bool {
        self.ignore_blur
    }

    /// Whether the second scroll restore is still queued.
    pub fn has_pending_scroll_restore(&self) -> bool {
        self.scroll_restore.is_pending()
    }

    /// Last recorded interaction states, oldest first.
    pub fn debug_states(&self) -> impl Iterator<Item = &DebugSnapshot> {
        self.trace.snapshots()
    }

    // ------------------------------------------------------------------
    // Imperative input surface
    // ------------------------------------------------------------------

    fn ensure_mounted(&self) -> Result<()> {
        if self.mounted {
            Ok(())
        } else {
            Err(AutocompleteError::NotMounted)
        }
    }

    /// Focus the input, running the focus handling when it was not focused.
    pub fn focus(&mut self) -> Result<()> {
        self.ensure_mounted()?;
        if !self.field.is_focused() {
            self.handle_focus();
        }
        Ok(())
    }

    /// Blur the input, running the blur handling when it was focused.
    pub fn blur(&mut self) -> Result<()> {
        self.ensure_mounted()?;
        self.handle_blur();
        Ok(())
    }

    /// Click the input.
    pub fn click(&mut self) -> Result<()> {
        self.ensure_mounted()?;
        if !self.field.is_disabled() {
            self.handle_input_click();
        }
        Ok(())
    }

    pub fn check_validity(&self) -> Result<bool> {
        self.ensure_mounted()?;
        Ok(self.field.check_validity())
    }

    /// Select the whole input text.
    pub fn select(&mut self) -> Result<()> {
        self.ensure_mounted()?;
        self.field.select_all();
        Ok(())
    }

    pub fn set_custom_validity(&mut self, message: impl Into<String>) -> Result<()> {
        self.ensure_mounted()?;
        self.field.set_custom_validity(message);
        Ok(())
    }

    pub fn set_selection_range(&mut self, start: usize, end: usize) -> Result<()> {
        self.ensure_mounted()?;
        self.field.set_selection_range(start, end);
        Ok(())
    }

    /// Replace a range of the input text (the selection when `range` is
    /// `None`). Like a programmatic edit, this does not call `on_change`.
    pub fn set_range_text(
        &mut self,
        replacement: &str,
        range: Option<(usize, usize)>,
        mode: SelectionMode,
    ) -> Result<()> {
        self.ensure_mounted()?;
        let before = self.field.value().to_string();
        self.field.set_range_text(replacement, range, mode)?;
        let changed = before != self.field.value();
        self.receive_props(changed);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Tear down the input element and cancel the queued scroll restore.
    pub fn unmount(&mut self) {
        if self.scroll_restore.cancel() {
            debug!("cancelled pending scroll restore on unmount");
        }
        self.mounted = false;
        self.field.set_focused(false);
        self.ignore_blur = false;
        self.ignore_focus = false;
        self.scroll_offset = None;
        self.input_area = None;
        self.menu_layout = None;
        self.pointer_in_menu = false;
        self.pressed = None;
    }

    // ------------------------------------------------------------------
    // Focus / blur
    // ------------------------------------------------------------------

    /// The input gained focus.
    pub fn handle_focus(&mut self) {
        if self.field.is_disabled() {
            return;
        }
        self.field.set_focused(true);

        if self.ignore_focus {
            // Re-focus after an ignored blur: keep the menu as is and put
            // the viewport back where it was, now and on the next tick.
            self.ignore_focus = false;
            if let Some(offset) = self.scroll_offset.take() {
                if let Some(surface) = &self.scroll_surface {
                    surface.scroll_to(offset);
                }
                self.scroll_restore.schedule(offset);
            }
            return;
        }

        let prev = self.state;
        self.state.is_open = true;
        self.did_update(prev);
        if let Some(handler) = self.input.on_focus.as_mut() {
            handler();
        }
    }

    /// The input lost focus.
    ///
    /// While the pointer is over the menu the input re-focuses itself
    /// instead, so a click on an item can land.
    pub fn handle_blur(&mut self) {
        if !self.field.is_focused() {
            return;
        }

        if self.ignore_blur {
            debug!("blur while pointer is over the menu, refocusing input");
            self.ignore_focus = true;
            self.scroll_offset = self.scroll_surface.as_ref().map(|surface| surface.offset());
            self.handle_focus();
            return;
        }

        self.field.set_focused(false);
        let prev = self.state;
        let selection = if self.config.select_on_blur {
            self.highlighted_item_index()
        } else {
            None
        };
        self.state.close();
        self.did_update(prev);
        if let Some(item_idx) = selection {
            self.commit_selection(item_idx);
        }
        if let Some(handler) = self.input.on_blur.as_mut() {
            handler();
        }
    }

    // ------------------------------------------------------------------
    // Mouse
    // ------------------------------------------------------------------

    /// Highlight the item at view position `pos`, as on pointer hover.
    /// Non-selectable items are ignored.
    pub fn hover_item(&mut self, pos: usize) {
        let view = self.filtered_indices();
        let Some(&item_idx) = view.get(pos) else {
            return;
        };
        if !self.is_selectable(item_idx) || self.state.highlighted_index == Some(pos) {
            return;
        }
        let prev = self.state;
        self.state.highlighted_index = Some(pos);
        self.did_update(prev);
    }

    /// Select the item at view position `pos`, as on pointer click.
    ///
    /// Returns the committed value, or `None` for a missing or
    /// non-selectable item.
    pub fn click_item(&mut self, pos: usize) -> Option<String> {
        let view = self.filtered_indices();
        let item_idx = *view.get(pos)?;
        if !self.is_selectable(item_idx) {
            return None;
        }
        self.ignore_blur = false;
        let prev = self.state;
        self.state.close();
        self.did_update(prev);
        Some(self.commit_selection(item_idx))
    }

    fn handle_input_click(&mut self) {
        if self.field.is_focused() && !self.is_open() {
            let prev = self.state;
            self.state.is_open = true;
            self.did_update(prev);
        }
        if let Some(handler) = self.input.on_click.as_mut() {
            handler();
        }
    }

    /// Pointer entering or leaving the menu toggles the ignore-blur flag.
    fn track_pointer(&mut self, in_menu: bool) {
        if in_menu != self.pointer_in_menu {
            self.pointer_in_menu = in_menu;
            self.ignore_blur = in_menu;
        }
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    fn handle_nav_key(&mut self, nav: NavKey, key: &KeyEvent) -> ComponentResult<String> {
        match nav {
            NavKey::ArrowDown => {
                self.move_highlight(true);
                ComponentResult::Handled
            }
            NavKey::ArrowUp => {
                self.move_highlight(false);
                ComponentResult::Handled
            }
            NavKey::Enter => self.handle_enter(key),
            NavKey::Escape => {
                self.ignore_blur = false;
                let prev = self.state;
                self.state.close();
                self.did_update(prev);
                ComponentResult::Handled
            }
            NavKey::Tab => {
                self.ignore_blur = false;
                ComponentResult::NotHandled
            }
        }
    }

    /// Move the highlight to the next (or previous) selectable item and open
    /// the menu. Nothing happens when the highlight would not move.
    fn move_highlight(&mut self, forward: bool) {
        let view = self.filtered_indices();
        let prev = self.state;
        let selectable = |pos: usize| self.is_selectable(view[pos]);
        let next = if forward {
            navigation::next_selectable(view.len(), prev.highlighted_index, selectable)
        } else {
            navigation::prev_selectable(view.len(), prev.highlighted_index, selectable)
        };
        if let Some(next) = next {
            self.state.highlighted_index = Some(next);
            self.state.is_open = true;
            self.did_update(prev);
        }
    }

    fn handle_enter(&mut self, key: &KeyEvent) -> ComponentResult<String> {
        if !navigation::is_enter_keystroke(key) {
            return ComponentResult::NotHandled;
        }
        self.ignore_blur = false;
        if !self.is_open() {
            return ComponentResult::NotHandled;
        }

        let prev = self.state;
        match self.highlighted_item_index() {
            None => {
                // Nothing highlighted: accept the typed text as is.
                self.state.is_open = false;
                self.field.move_end();
                self.did_update(prev);
                ComponentResult::Handled
            }
            Some(item_idx) => {
                self.state.close();
                self.did_update(prev);
                ComponentResult::Done(self.commit_selection(item_idx))
            }
        }
    }

    /// Apply a non-navigation key to the text field.
    fn edit_field(&mut self, key: &KeyEvent) -> ComponentResult<String> {
        let before = self.field.value().to_string();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Backspace => self.field.backspace(),
            KeyCode::Delete => self.field.delete(),
            KeyCode::Left => self.field.move_left(),
            KeyCode::Right => self.field.move_right(),
            KeyCode::Home => self.field.move_home(),
            KeyCode::End => self.field.move_end(),
            KeyCode::Char('u') if ctrl => self.field.clear(),
            KeyCode::Char('a') if ctrl => self.field.select_all(),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.field.insert(c)
            }
            _ => return ComponentResult::NotHandled,
        }
        if self.field.value() != before {
            self.value_changed();
        }
        ComponentResult::Handled
    }

    fn value_changed(&mut self) {
        if let Some(handler) = self.callbacks.on_change.as_mut() {
            handler(self.field.value());
        }
        self.receive_props(true);
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    fn filtered_indices(&self) -> Vec<usize> {
        filter_items(
            &self.items,
            self.field.value(),
            self.should_item_render.as_deref(),
            self.sort_items.as_deref(),
        )
    }

    fn is_selectable(&self, item_idx: usize) -> bool {
        self.is_item_selectable
            .as_ref()
            .is_none_or(|selectable| selectable(&self.items[item_idx]))
    }

    /// Index into `items` of the highlighted entry, if it still exists.
    fn highlighted_item_index(&self) -> Option<usize> {
        let pos = self.state.highlighted_index?;
        self.filtered_indices().get(pos).copied()
    }

    /// Derive the highlight from scratch while the widget is being built.
    ///
    /// Builders can come in any order, so every one that feeds the derived
    /// view or the highlight rule drops what an earlier one derived.
    fn derive_initial_highlight(&mut self) {
        self.state.highlighted_index = None;
        self.receive_props(true);
    }

    /// Re-derive the highlight after items, value or open flag changed.
    fn receive_props(&mut self, value_changed: bool) {
        let view = self.filtered_indices();
        // A highlight may only rest on an existing, selectable item.
        if self
            .state
            .highlighted_index
            .is_some_and(|pos| pos >= view.len() || !self.is_selectable(view[pos]))
        {
            self.state.highlighted_index = None;
        }

        if self.config.auto_highlight && (value_changed || self.state.highlighted_index.is_none())
        {
            let highlighted = navigation::auto_highlight(
                view.len(),
                self.state.highlighted_index,
                self.field.value(),
                |pos| self.is_selectable(view[pos]),
                |pos| (self.get_item_value)(&self.items[view[pos]]),
            );
            if highlighted != self.state.highlighted_index {
                trace!(?highlighted, "auto-highlight");
                self.state.highlighted_index = highlighted;
                self.reveal_highlight = true;
            }
        }
    }

    /// React to a state change made by a handler.
    fn did_update(&mut self, prev: InteractionState) {
        if self.state.is_open && !prev.is_open {
            self.set_menu_positions();
        }
        if self.state.highlighted_index != prev.highlighted_index
            || self.state.is_open != prev.is_open
        {
            self.reveal_highlight = true;
        }
        if self.state.is_open != prev.is_open {
            debug!(open = self.state.is_open, "autocomplete menu visibility changed");
            if let Some(handler) = self.callbacks.on_menu_visibility_change.as_mut() {
                handler(self.state.is_open);
            }
        }
    }

    fn set_menu_positions(&mut self) {
        if let Some(input) = self.input_area {
            self.state.menu = Some(MenuGeometry::below(input, self.config.input_margin));
        }
    }

    /// Put the item's value into the input and notify `on_select`.
    fn commit_selection(&mut self, item_idx: usize) -> String {
        let value = (self.get_item_value)(&self.items[item_idx]);
        debug!(value = %value, "autocomplete item selected");
        self.field.set_value(value.as_str());
        if let Some(handler) = self.callbacks.on_select.as_mut() {
            handler(&value, &self.items[item_idx]);
        }
        value
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn draw(&mut self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, self.wrapper_style);

        let input_width = self
            .config
            .input_width
            .map_or(area.width, |width| width.min(area.width));
        let input_area = Rect::new(area.x, area.y, input_width, 1);
        self.input_area = Some(input_area);

        let open = self.is_open();
        if !self.mounted {
            self.mounted = true;
            self.receive_props(false);
            debug!(open, "autocomplete mounted");
            if open {
                self.set_menu_positions();
                self.reveal_highlight = true;
            }
        }

        let (sel_start, sel_end) = self.field.selection_range();
        let props = InputProps {
            value: self.field.value(),
            cursor: self.field.cursor(),
            selection: (sel_start, sel_end),
            placeholder: self.input.placeholder.as_deref(),
            focused: self.field.is_focused(),
            disabled: self.field.is_disabled(),
            invalid: !self.field.is_empty() && !self.field.check_validity(),
            style: self.input.style,
            colors: &self.colors,
            role: "combobox",
            aria_autocomplete: "list",
            aria_expanded: open,
            autocomplete: "off",
        };
        match &self.render_input {
            Some(render) => render(&props, input_area, buf),
            None => default_render_input(&props, input_area, buf),
        }

        if open {
            self.menu_layout = self.draw_menu(buf);
        } else {
            self.menu_layout = None;
            self.menu_scroll.reset();
        }

        if self.config.debug {
            self.trace.record(self.state);
            let x = input_area.right().saturating_add(2);
            if x < area.right() {
                let trace_area = Rect::new(x, area.y, area.right() - x, area.height);
                render_debug_trace(&self.trace, trace_area, buf, &self.colors);
            }
        }
    }

    fn draw_menu(&mut self, buf: &mut Buffer) -> Option<MenuLayout> {
        let geometry = self.state.menu?;
        let view = self.filtered_indices();
        let highlighted = self.state.highlighted_index;

        let items: Vec<MenuItem> = view
            .iter()
            .enumerate()
            .map(|(pos, &item_idx)| {
                let is_highlighted = highlighted == Some(pos);
                let selectable = self.is_selectable(item_idx);
                let style = self.colors.item_style(is_highlighted, selectable);
                MenuItem {
                    index: pos,
                    line: (self.render_item)(&self.items[item_idx], is_highlighted, style),
                    highlighted: is_highlighted,
                    selectable,
                }
            })
            .collect();

        let bounds = buf.area;
        let max_height = self
            .config
            .max_menu_height(bounds.height)
            .max(MENU_CHROME_HEIGHT + 1);
        let rows = items
            .len()
            .min((max_height - MENU_CHROME_HEIGHT) as usize) as u16;
        let content_width = items
            .iter()
            .map(|item| line_width(&item.line))
            .max()
            .unwrap_or(0)
            .saturating_add(MENU_CHROME_WIDTH);
        let area = geometry.area(content_width, rows + MENU_CHROME_HEIGHT, bounds);

        self.menu_scroll.resize(
            items.len(),
            area.height.saturating_sub(MENU_CHROME_HEIGHT) as usize,
        );
        if std::mem::take(&mut self.reveal_highlight)
            && let Some(pos) = highlighted
        {
            self.menu_scroll.ensure_visible(pos);
        }

        let props = MenuProps {
            items,
            value: self.field.value(),
            area,
            style: self.colors.menu_style().patch(self.menu_style),
            border_style: self.colors.menu_border_style(),
            scroll: &self.menu_scroll,
            scrollbar: self.config.scrollbar,
        };
        let layout = match &self.render_menu {
            Some(render) => render(props, buf),
            None => default_render_menu(props, buf),
        };
        Some(layout)
    }
}

impl<T> Component for Autocomplete<T> {
    type Output = String;

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.draw(area, buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<Self::Output> {
        if self.field.is_disabled() || key.kind == KeyEventKind::Release {
            return ComponentResult::NotHandled;
        }

        let result = match NavKey::from_event(&key) {
            Some(nav) => {
                trace!(?nav, "autocomplete navigation key");
                self.handle_nav_key(nav, &key)
            }
            None => {
                let prev = self.state;
                if !self.is_open() {
                    self.state.is_open = true;
                }
                let result = self.edit_field(&key);
                self.did_update(prev);
                result
            }
        };

        if let Some(handler) = self.input.on_key_down.as_mut() {
            handler(&key);
        }
        result
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> ComponentResult<Self::Output> {
        let position = Position::new(mouse.column, mouse.row);
        let menu = self.menu_layout.as_ref().filter(|_| self.is_open());
        let in_menu = menu.is_some_and(|layout| layout.contains(position));
        let row = menu.and_then(|layout| layout.item_at(position));
        let in_input = self.input_area.is_some_and(|area| area.contains(position));

        self.track_pointer(in_menu);

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if let Some(pos) = row {
                    self.hover_item(pos);
                }
                if in_menu {
                    ComponentResult::Handled
                } else {
                    ComponentResult::NotHandled
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if in_menu {
                    // Hold focus through the blur the press may cause.
                    self.ignore_blur = true;
                    self.pressed = Some(Press::Menu(row));
                    ComponentResult::Handled
                } else if in_input {
                    self.pressed = Some(Press::Input);
                    ComponentResult::Handled
                } else {
                    self.pressed = None;
                    ComponentResult::NotHandled
                }
            }
            MouseEventKind::Up(MouseButton::Left) => match self.pressed.take() {
                Some(Press::Menu(Some(pos))) if row == Some(pos) => match self.click_item(pos) {
                    Some(value) => ComponentResult::Done(value),
                    None => ComponentResult::Handled,
                },
                Some(Press::Input) if in_input => {
                    if !self.field.is_disabled() {
                        self.handle_input_click();
                    }
                    ComponentResult::Handled
                }
                _ if in_menu || in_input => ComponentResult::Handled,
                _ => ComponentResult::NotHandled,
            },
            MouseEventKind::ScrollDown if in_menu => {
                self.menu_scroll.scroll_down(1);
                ComponentResult::Handled
            }
            MouseEventKind::ScrollUp if in_menu => {
                self.menu_scroll.scroll_up(1);
                ComponentResult::Handled
            }
            _ => ComponentResult::NotHandled,
        }
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        if self.field.is_disabled() {
            return false;
        }
        let prev = self.state;
        if !self.is_open() {
            self.state.is_open = true;
        }
        let single_line: String = text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        if !single_line.is_empty() || self.field.has_selection() {
            self.field.insert_str(&single_line);
            self.value_changed();
        }
        self.did_update(prev);
        true
    }

    fn focus_state(&self) -> FocusState {
        if self.field.is_focused() {
            FocusState::Editing
        } else {
            FocusState::Unfocused
        }
    }

    fn set_focus(&mut self, focused: bool) {
        if focused {
            if !self.field.is_focused() {
                self.handle_focus();
            }
        } else {
            self.handle_blur();
        }
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.is_open() {
            vec![("↑↓", "Navigate"), ("Enter", "Select"), ("Esc", "Close")]
        } else {
            vec![("↑↓", "Suggestions")]
        }
    }

    fn tick(&mut self) {
        if let Some(offset) = self.scroll_restore.fire()
            && let Some(surface) = &self.scroll_surface
        {
            surface.scroll_to(offset);
        }
    }

    fn can_focus(&self) -> bool {
        !self.field.is_disabled()
    }
}

impl<T> Widget for &mut Autocomplete<T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.draw(area, buf);
    }
}
