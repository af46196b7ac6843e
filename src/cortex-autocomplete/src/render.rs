//! Rendering contract and default renderers.
//!
//! The autocomplete delegates drawing to three hooks: the input renderer,
//! the per-item renderer (always caller supplied) and the menu renderer.
//! This module defines what each hook receives and the defaults used when
//! the caller does not provide one.

use crate::state::DebugTrace;
use crate::theme::{ColorScheme, ROUNDED_BORDER};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{
    Block, Borders, Clear, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Rows the menu container spends on its border.
pub const MENU_CHROME_HEIGHT: u16 = 2;

/// Columns the menu container spends on border, gutter and scrollbar.
pub const MENU_CHROME_WIDTH: u16 = 4;

/// What the input renderer receives.
///
/// The accessibility attributes are always set by the autocomplete and
/// cannot be overridden through the caller's input options.
#[derive(Debug, Clone)]
pub struct InputProps<'a> {
    pub value: &'a str,
    /// Caret position in graphemes.
    pub cursor: usize,
    /// Selected grapheme range; equal bounds when collapsed.
    pub selection: (usize, usize),
    pub placeholder: Option<&'a str>,
    pub focused: bool,
    pub disabled: bool,
    /// The field fails its validity check.
    pub invalid: bool,
    /// Caller style patched over the default input style.
    pub style: Style,
    pub colors: &'a ColorScheme,
    /// Always `"combobox"`.
    pub role: &'static str,
    /// Always `"list"`.
    pub aria_autocomplete: &'static str,
    /// Whether the menu is visible.
    pub aria_expanded: bool,
    /// Always `"off"`: the widget replaces any host-level completion.
    pub autocomplete: &'static str,
}

/// One rendered row handed to the menu renderer.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Position in the filtered view.
    pub index: usize,
    pub line: Line<'static>,
    pub highlighted: bool,
    pub selectable: bool,
}

/// What the menu renderer receives.
#[derive(Debug)]
pub struct MenuProps<'a> {
    /// Every item of the filtered view, in order.
    pub items: Vec<MenuItem>,
    /// Current input value.
    pub value: &'a str,
    /// Position and size computed from the menu anchor.
    pub area: Rect,
    /// Default menu style patched with the caller's menu style.
    pub style: Style,
    pub border_style: Style,
    /// Window of items that fits inside `area`.
    pub scroll: &'a MenuScroll,
    pub scrollbar: bool,
}

/// Where the menu renderer drew things.
///
/// Pointer handling is attached through this layout: the autocomplete
/// hit-tests mouse positions against `area` and `rows`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuLayout {
    /// Whole menu container.
    pub area: Rect,
    /// Row area of each drawn item, keyed by filtered-view position.
    pub rows: Vec<(usize, Rect)>,
}

impl MenuLayout {
    pub fn contains(&self, position: Position) -> bool {
        self.area.contains(position)
    }

    /// Filtered-view position of the row under `position`.
    pub fn item_at(&self, position: Position) -> Option<usize> {
        self.rows
            .iter()
            .find(|(_, row)| row.contains(position))
            .map(|(idx, _)| *idx)
    }
}

/// Scroll window of the menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuScroll {
    total: usize,
    visible: usize,
    offset: usize,
}

impl MenuScroll {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Resize the window, keeping the offset in range.
    pub fn resize(&mut self, total: usize, visible: usize) {
        self.total = total;
        self.visible = visible;
        self.clamp_offset();
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_add(lines);
        self.clamp_offset();
    }

    /// Move the window so `index` is visible.
    pub fn ensure_visible(&mut self, index: usize) {
        if self.visible == 0 {
            return;
        }
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.visible {
            self.offset = index + 1 - self.visible;
        }
        self.clamp_offset();
    }

    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.visible
    }

    pub fn visible_range(&self) -> std::ops::Range<usize> {
        self.offset..(self.offset + self.visible).min(self.total)
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.total.saturating_sub(self.visible));
    }
}

/// Draw a single-line text input.
///
/// Scrolls horizontally to keep the caret visible; shows the placeholder
/// when empty and the caret only while focused.
pub fn default_render_input(props: &InputProps<'_>, area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let colors = props.colors;
    let base = colors
        .input_style(props.focused, props.disabled)
        .patch(props.style);
    let base = if props.invalid {
        base.fg(colors.error)
    } else {
        base
    };
    let row = Rect::new(area.x, area.y, area.width, 1);
    buf.set_style(row, base);

    if props.value.is_empty() {
        if let Some(placeholder) = props.placeholder {
            buf.set_stringn(
                row.x,
                row.y,
                placeholder,
                row.width as usize,
                base.fg(colors.text_muted),
            );
        }
        if props.focused && let Some(cell) = buf.cell_mut((row.x, row.y)) {
            cell.set_style(colors.cursor_style());
        }
        return;
    }

    let graphemes: Vec<&str> = props.value.graphemes(true).collect();
    // Keep one spare column for the caret at the end of the text.
    let skip = props.cursor.saturating_sub(row.width.saturating_sub(1) as usize);
    let (sel_start, sel_end) = props.selection;

    let mut x = row.x;
    for (idx, grapheme) in graphemes.iter().enumerate().skip(skip) {
        let width = grapheme.width().max(1) as u16;
        if x + width > row.right() {
            break;
        }
        let style = if props.focused && idx == props.cursor && sel_start == sel_end {
            colors.cursor_style()
        } else if idx >= sel_start && idx < sel_end {
            colors.selection_style()
        } else {
            base
        };
        buf.set_string(x, row.y, grapheme, style);
        x += width;
    }

    if props.focused
        && props.cursor >= graphemes.len()
        && x < row.right()
        && let Some(cell) = buf.cell_mut((x, row.y))
    {
        cell.set_style(colors.cursor_style());
    }
}

/// Draw the menu container: rounded border, one row per visible item, and a
/// scrollbar when the items overflow.
pub fn default_render_menu(props: MenuProps<'_>, buf: &mut Buffer) -> MenuLayout {
    let area = props.area;
    if props.items.is_empty() || area.height <= MENU_CHROME_HEIGHT || area.width < 3 {
        return MenuLayout::default();
    }

    Clear.render(area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDER)
        .border_style(props.border_style)
        .style(props.style);
    let inner = block.inner(area);
    block.render(area, buf);

    let show_scrollbar = props.scrollbar && props.scroll.needs_scrollbar();
    let row_width = if show_scrollbar {
        inner.width.saturating_sub(1)
    } else {
        inner.width
    };

    let mut rows = Vec::new();
    for (line_no, item_idx) in props.scroll.visible_range().enumerate() {
        let y = inner.y + line_no as u16;
        if y >= inner.bottom() {
            break;
        }
        let Some(item) = props.items.get(item_idx) else {
            break;
        };

        let row = Rect::new(inner.x, y, row_width, 1);
        buf.set_style(row, props.style.patch(item.line.style));
        if item.highlighted {
            buf.set_string(row.x, y, ">", props.border_style.patch(item.line.style));
        }
        buf.set_line(row.x + 1, y, &item.line, row.width.saturating_sub(1));
        rows.push((item.index, row));
    }

    if show_scrollbar {
        let scrollbar_area = Rect::new(inner.right().saturating_sub(1), inner.y, 1, inner.height);
        render_scrollbar(scrollbar_area, buf, props.scroll, props.style);
    }

    MenuLayout { area, rows }
}

/// Render a vertical scrollbar for the menu window.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, scroll: &MenuScroll, style: Style) {
    if !scroll.needs_scrollbar() || area.width == 0 || area.height == 0 {
        return;
    }

    let scrollable_range = scroll.total.saturating_sub(scroll.visible);
    let mut scrollbar_state = ScrollbarState::new(scrollable_range).position(scroll.offset);

    Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .track_symbol(Some("│"))
        .track_style(style)
        .thumb_symbol("█")
        .thumb_style(style)
        .render(area, buf, &mut scrollbar_state);
}

/// Draw the debug trace as pretty JSON, one line per row.
pub fn render_debug_trace(trace: &DebugTrace, area: Rect, buf: &mut Buffer, colors: &ColorScheme) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let style = Style::default().fg(colors.text_dim);
    for (row, line) in trace.to_json().lines().take(area.height as usize).enumerate() {
        buf.set_stringn(area.x, area.y + row as u16, line, area.width as usize, style);
    }
}

/// Display width of a rendered line.
pub(crate) fn line_width(line: &Line<'_>) -> u16 {
    line.width().min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.x..area.right())
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    fn input_props<'a>(value: &'a str, colors: &'a ColorScheme) -> InputProps<'a> {
        InputProps {
            value,
            cursor: value.graphemes(true).count(),
            selection: (0, 0),
            placeholder: Some("Search fruit"),
            focused: false,
            disabled: false,
            invalid: false,
            style: Style::default(),
            colors,
            role: "combobox",
            aria_autocomplete: "list",
            aria_expanded: false,
            autocomplete: "off",
        }
    }

    #[test]
    fn test_menu_scroll_window() {
        let mut scroll = MenuScroll::default();
        scroll.resize(20, 5);
        assert_eq!(scroll.visible_range(), 0..5);
        assert!(scroll.needs_scrollbar());

        scroll.ensure_visible(7);
        assert_eq!(scroll.visible_range(), 3..8);

        scroll.ensure_visible(1);
        assert_eq!(scroll.visible_range(), 1..6);

        scroll.scroll_down(100);
        assert_eq!(scroll.offset(), 15);

        scroll.resize(4, 5);
        assert_eq!(scroll.offset(), 0);
        assert!(!scroll.needs_scrollbar());
    }

    #[test]
    fn test_input_shows_value() {
        let colors = ColorScheme::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        default_render_input(&input_props("apple", &colors), buf.area, &mut buf);
        assert_eq!(row_text(&buf, 0), "apple     ");
    }

    #[test]
    fn test_input_shows_placeholder() {
        let colors = ColorScheme::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 14, 1));
        default_render_input(&input_props("", &colors), buf.area, &mut buf);
        assert_eq!(row_text(&buf, 0), "Search fruit  ");
    }

    #[test]
    fn test_input_scrolls_to_caret() {
        let colors = ColorScheme::default();
        let mut props = input_props("strawberry", &colors);
        props.focused = true;
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        default_render_input(&props, buf.area, &mut buf);
        assert_eq!(row_text(&buf, 0), "erry ");
        assert_eq!(buf[(4, 0)].bg, colors.accent);
    }

    #[test]
    fn test_menu_draws_visible_rows() {
        let colors = ColorScheme::default();
        let items: Vec<MenuItem> = ["apple", "banana", "cherry"]
            .iter()
            .enumerate()
            .map(|(index, name)| MenuItem {
                index,
                line: Line::styled(*name, colors.item_style(index == 1, true)),
                highlighted: index == 1,
                selectable: true,
            })
            .collect();
        let mut scroll = MenuScroll::default();
        scroll.resize(3, 2);

        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 6));
        let layout = default_render_menu(
            MenuProps {
                items,
                value: "",
                area: Rect::new(0, 1, 12, 4),
                style: colors.menu_style(),
                border_style: colors.menu_border_style(),
                scroll: &scroll,
                scrollbar: true,
            },
            &mut buf,
        );

        assert_eq!(layout.area, Rect::new(0, 1, 12, 4));
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.item_at(Position::new(3, 3)), Some(1));
        assert_eq!(layout.item_at(Position::new(3, 5)), None);
        assert!(row_text(&buf, 2).starts_with("│ apple"));
        assert!(row_text(&buf, 3).starts_with("│>banana"));
    }

    #[test]
    fn test_menu_empty_draws_nothing() {
        let mut scroll = MenuScroll::default();
        scroll.resize(0, 3);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 5));
        let layout = default_render_menu(
            MenuProps {
                items: Vec::new(),
                value: "zzz",
                area: Rect::new(0, 0, 10, 5),
                style: Style::default(),
                border_style: Style::default(),
                scroll: &scroll,
                scrollbar: false,
            },
            &mut buf,
        );
        assert_eq!(layout, MenuLayout::default());
        assert_eq!(row_text(&buf, 0), "          ");
    }

    #[test]
    fn test_debug_trace_latest_state_on_top() {
        let mut trace = DebugTrace::default();
        trace.record(crate::state::InteractionState::default());
        trace.record(crate::state::InteractionState {
            is_open: true,
            ..Default::default()
        });

        let area = Rect::new(0, 0, 30, 20);
        let mut buf = Buffer::empty(area);
        render_debug_trace(&trace, area, &mut buf, &ColorScheme::default());
        assert_eq!(row_text(&buf, 0).trim_end(), "[");
        assert_eq!(row_text(&buf, 2).trim_end(), r#"    "id": 1,"#);
    }
}
