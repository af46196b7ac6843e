//! End-to-end interaction scenarios driven through the public event surface.

use cortex_autocomplete::prelude::*;
use cortex_autocomplete::{AutocompleteError, InteractionState};
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use pretty_assertions::assert_eq;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use std::cell::RefCell;
use std::rc::Rc;

const SCREEN: Rect = Rect {
    x: 0,
    y: 0,
    width: 30,
    height: 12,
};
const INPUT: Rect = Rect {
    x: 0,
    y: 0,
    width: 20,
    height: 1,
};

type Selections = Rc<RefCell<Vec<String>>>;

fn fruit(value: &str) -> (Autocomplete<&'static str>, Selections) {
    let selections: Selections = Rc::default();
    let log = selections.clone();
    let widget = Autocomplete::new(
        vec!["apple", "banana", "cherry"],
        |item: &&str| item.to_string(),
        |item: &&str, _, style| Line::styled(item.to_string(), style),
    )
    .with_value(value)
    .on_select(move |value, _| log.borrow_mut().push(value.to_string()));
    (widget, selections)
}

fn render(widget: &mut Autocomplete<&'static str>) -> Buffer {
    let mut buf = Buffer::empty(SCREEN);
    Component::render(widget, INPUT, &mut buf);
    buf
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn row_text(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf[(x, y)].symbol())
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Mount, focus and render so the menu layout is known.
fn open(widget: &mut Autocomplete<&'static str>) {
    render(widget);
    widget.set_focus(true);
    render(widget);
}

#[test]
fn empty_value_has_no_highlight() {
    let (mut widget, _) = fruit("");
    open(&mut widget);
    assert!(widget.is_open());
    assert_eq!(widget.highlighted_index(), None);
}

#[test]
fn prefix_value_highlights_first_item() {
    let (mut widget, _) = fruit("ap");
    assert_eq!(widget.highlighted_index(), Some(0));

    widget.set_value("");
    assert_eq!(widget.highlighted_index(), None);
    widget.set_value("ap");
    assert_eq!(widget.highlighted_index(), Some(0));
    assert_eq!(widget.highlighted_item(), Some(&"apple"));
}

#[test]
fn auto_highlight_can_be_disabled() {
    let (widget, _) = fruit("");
    let mut widget = widget.with_auto_highlight(false);
    widget.set_value("ap");
    assert_eq!(widget.highlighted_index(), None);
}

#[test]
fn arrow_down_cycles_and_wraps() {
    let (mut widget, _) = fruit("");
    open(&mut widget);

    let mut seen = Vec::new();
    for _ in 0..4 {
        widget.handle_key(key(KeyCode::Down));
        seen.push(widget.highlighted_index());
    }
    assert_eq!(seen, vec![Some(0), Some(1), Some(2), Some(0)]);

    widget.handle_key(key(KeyCode::Up));
    assert_eq!(widget.highlighted_index(), Some(2));
}

#[test]
fn arrow_down_opens_closed_menu() {
    let (mut widget, _) = fruit("");
    open(&mut widget);
    widget.handle_key(key(KeyCode::Esc));
    assert!(!widget.is_open());

    widget.handle_key(key(KeyCode::Down));
    assert!(widget.is_open());
    assert_eq!(widget.highlighted_index(), Some(0));
}

#[test]
fn unselectable_items_are_skipped() {
    let (widget, _) = fruit("");
    let mut widget = widget.with_is_item_selectable(|item| *item != "banana");
    open(&mut widget);

    widget.handle_key(key(KeyCode::Down));
    widget.handle_key(key(KeyCode::Down));
    assert_eq!(widget.highlighted_item(), Some(&"cherry"));
}

#[test]
fn enter_commits_highlighted_item() {
    let (mut widget, selections) = fruit("");
    open(&mut widget);
    widget.handle_key(key(KeyCode::Down));
    widget.handle_key(key(KeyCode::Down));

    let result = widget.handle_key(key(KeyCode::Enter));
    assert_eq!(result, ComponentResult::Done("banana".to_string()));
    assert_eq!(*selections.borrow(), vec!["banana".to_string()]);
    assert_eq!(widget.value(), "banana");
    assert!(!widget.is_open());
    assert_eq!(widget.highlighted_index(), None);
}

#[test]
fn enter_without_highlight_closes_and_keeps_text() {
    let (mut widget, selections) = fruit("");
    open(&mut widget);
    widget.handle_key(key(KeyCode::Char('z')));

    let result = widget.handle_key(key(KeyCode::Enter));
    assert_eq!(result, ComponentResult::Handled);
    assert!(!widget.is_open());
    assert_eq!(widget.value(), "z");
    assert_eq!(widget.field().cursor(), 1);
    assert!(selections.borrow().is_empty());
}

#[test]
fn enter_while_closed_passes_through() {
    let (mut widget, selections) = fruit("");
    open(&mut widget);
    widget.handle_key(key(KeyCode::Esc));

    assert_eq!(
        widget.handle_key(key(KeyCode::Enter)),
        ComponentResult::NotHandled
    );
    assert!(selections.borrow().is_empty());
}

#[test]
fn escape_closes_and_clears_highlight() {
    let (mut widget, _) = fruit("");
    open(&mut widget);
    widget.handle_key(key(KeyCode::Down));

    widget.handle_key(key(KeyCode::Esc));
    assert_eq!(
        widget.state(),
        InteractionState {
            is_open: false,
            highlighted_index: None,
            menu: widget.menu_geometry(),
        }
    );
}

#[test]
fn tab_is_not_handled() {
    let (mut widget, _) = fruit("");
    open(&mut widget);
    assert_eq!(
        widget.handle_key(key(KeyCode::Tab)),
        ComponentResult::NotHandled
    );
}

#[test]
fn mouse_click_selects_item() {
    let (mut widget, selections) = fruit("");
    open(&mut widget);

    // Menu border is on row 1; banana is on row 3.
    widget.handle_mouse(mouse(MouseEventKind::Moved, 3, 3));
    assert_eq!(widget.highlighted_item(), Some(&"banana"));

    widget.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 3, 3));
    let result = widget.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 3, 3));

    assert_eq!(result, ComponentResult::Done("banana".to_string()));
    assert_eq!(*selections.borrow(), vec!["banana".to_string()]);
    assert!(!widget.is_open());
    assert_eq!(widget.highlighted_index(), None);
    assert!(!widget.is_ignoring_blur());
}

#[test]
fn blur_over_menu_keeps_menu_open() {
    let (mut widget, selections) = fruit("");
    open(&mut widget);

    widget.handle_mouse(mouse(MouseEventKind::Moved, 3, 2));
    widget.set_focus(false);

    assert!(widget.field().is_focused());
    assert!(widget.is_open());
    assert!(selections.borrow().is_empty());

    // Leaving the menu lets the next blur through.
    widget.handle_mouse(mouse(MouseEventKind::Moved, 28, 11));
    widget.set_focus(false);
    assert!(!widget.field().is_focused());
    assert!(!widget.is_open());
}

#[test]
fn select_on_blur_commits_highlight() {
    let (widget, selections) = fruit("");
    let mut widget = widget.with_select_on_blur(true);
    open(&mut widget);
    widget.handle_key(key(KeyCode::Down));

    widget.set_focus(false);
    assert_eq!(*selections.borrow(), vec!["apple".to_string()]);
    assert_eq!(widget.value(), "apple");
}

#[test]
fn click_on_focused_input_reopens_menu() {
    let (mut widget, _) = fruit("");
    open(&mut widget);
    widget.handle_key(key(KeyCode::Esc));

    widget.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 0));
    widget.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 1, 0));
    assert!(widget.is_open());
}

#[test]
fn menu_renders_below_input() {
    let (mut widget, _) = fruit("");
    open(&mut widget);
    widget.handle_key(key(KeyCode::Down));
    let buf = render(&mut widget);

    assert!(row_text(&buf, 1).starts_with('╭'));
    assert!(row_text(&buf, 2).contains(">apple"));
    assert!(row_text(&buf, 3).contains("banana"));
    assert!(row_text(&buf, 4).contains("cherry"));
    assert!(row_text(&buf, 5).starts_with('╰'));
}

#[test]
fn filtering_narrows_the_menu() {
    let (widget, _) = fruit("");
    let mut widget = widget.with_should_item_render(|item, value| item.contains(value));
    open(&mut widget);
    widget.handle_key(key(KeyCode::Char('e')));
    widget.handle_key(key(KeyCode::Char('r')));

    assert_eq!(widget.filtered_items(), vec![&"cherry"]);
    let buf = render(&mut widget);
    assert!(row_text(&buf, 2).contains("cherry"));
    assert!(row_text(&buf, 3).starts_with('╰'));
}

#[test]
fn sorting_reorders_the_view() {
    let (widget, _) = fruit("");
    let mut widget = widget.with_sort_items(|a, b, _| b.cmp(a));
    widget.set_value("c");
    assert_eq!(widget.filtered_items(), vec![&"cherry", &"banana", &"apple"]);
    assert_eq!(widget.highlighted_item(), Some(&"cherry"));
}

#[test]
fn items_shrinking_drops_stale_highlight() {
    let (mut widget, _) = fruit("");
    open(&mut widget);
    widget.handle_key(key(KeyCode::Up));
    assert_eq!(widget.highlighted_index(), Some(2));

    widget.set_items(vec!["apple"]);
    assert_eq!(widget.highlighted_index(), None);
}

#[test]
fn range_text_replaces_selection() {
    let (mut widget, _) = fruit("grape");
    assert!(matches!(
        widget.set_selection_range(0, 1),
        Err(AutocompleteError::NotMounted)
    ));

    render(&mut widget);
    widget.set_selection_range(0, 2).unwrap();
    widget
        .set_range_text("sh", None, SelectionMode::End)
        .unwrap();
    assert_eq!(widget.value(), "shape");
    assert!(matches!(
        widget.set_range_text("x", Some((4, 2)), SelectionMode::Preserve),
        Err(AutocompleteError::IndexSize { start: 4, end: 2 })
    ));
}

#[test]
fn required_input_validity() {
    let (widget, _) = fruit("");
    let mut widget = widget.with_input_options(InputOptions::new().required(true));
    render(&mut widget);
    assert!(!widget.check_validity().unwrap());

    widget.set_value("apple");
    assert!(widget.check_validity().unwrap());

    widget.set_custom_validity("Not in season").unwrap();
    assert!(!widget.check_validity().unwrap());
}

type Events = Rc<RefCell<Vec<&'static str>>>;

fn apricots() -> Autocomplete<&'static str> {
    Autocomplete::new(
        vec!["apple", "apricot"],
        |item: &&str| item.to_string(),
        |item: &&str, _, style| Line::styled(item.to_string(), style),
    )
}

#[test]
fn initial_highlight_skips_items_made_unselectable_later() {
    let selections: Selections = Rc::default();
    let log = selections.clone();
    let mut widget = apricots()
        .with_value("ap")
        .with_is_item_selectable(|item| *item != "apple")
        .on_select(move |value, _| log.borrow_mut().push(value.to_string()));
    assert_eq!(widget.highlighted_item(), Some(&"apricot"));

    open(&mut widget);
    assert_eq!(widget.highlighted_item(), Some(&"apricot"));
    assert_eq!(
        widget.handle_key(key(KeyCode::Enter)),
        ComponentResult::Done("apricot".to_string())
    );
    assert_eq!(*selections.borrow(), vec!["apricot".to_string()]);
}

#[test]
fn disabling_auto_highlight_after_value_clears_highlight() {
    let mut widget = apricots().with_value("ap").with_auto_highlight(false);
    assert_eq!(widget.highlighted_index(), None);

    open(&mut widget);
    assert_eq!(widget.highlighted_index(), None);
}

#[test]
fn later_filter_and_sort_rederive_highlight() {
    let widget = apricots()
        .with_value("ap")
        .with_sort_items(|a, b, _| b.cmp(a));
    assert_eq!(widget.highlighted_item(), Some(&"apricot"));

    let widget = widget.with_should_item_render(|item, _| *item == "apple");
    assert_eq!(widget.highlighted_item(), Some(&"apple"));
}

#[test]
fn caller_key_down_runs_after_internal_handling() {
    let events: Events = Rc::default();
    let (on_change, on_key) = (events.clone(), events.clone());
    let (widget, _) = fruit("");
    let mut widget = widget
        .on_change(move |_| on_change.borrow_mut().push("change"))
        .with_input_options(
            InputOptions::new().on_key_down(move |_| on_key.borrow_mut().push("key_down")),
        );
    open(&mut widget);

    assert!(widget.handle_key(key(KeyCode::Char('a'))).is_handled());
    assert_eq!(widget.value(), "a");
    assert_eq!(*events.borrow(), vec!["change", "key_down"]);

    // Navigation keys reach the caller too.
    widget.handle_key(key(KeyCode::Down));
    assert_eq!(*events.borrow(), vec!["change", "key_down", "key_down"]);
}

#[test]
fn caller_click_runs_after_menu_opens() {
    let events: Events = Rc::default();
    let (on_visibility, on_click) = (events.clone(), events.clone());
    let (widget, _) = fruit("");
    let mut widget = widget
        .on_menu_visibility_change(move |open| {
            on_visibility
                .borrow_mut()
                .push(if open { "open" } else { "close" })
        })
        .with_input_options(InputOptions::new().on_click(move || on_click.borrow_mut().push("click")));
    open(&mut widget);
    widget.handle_key(key(KeyCode::Esc));
    events.borrow_mut().clear();

    widget.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 0));
    widget.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 1, 0));
    assert!(widget.is_open());
    assert_eq!(*events.borrow(), vec!["open", "click"]);
}

#[test]
fn caller_focus_and_blur_run_after_internal_handling() {
    let events: Events = Rc::default();
    let (on_visibility, on_focus, on_blur) = (events.clone(), events.clone(), events.clone());
    let (widget, _) = fruit("");
    let mut widget = widget
        .on_menu_visibility_change(move |open| {
            on_visibility
                .borrow_mut()
                .push(if open { "open" } else { "close" })
        })
        .with_input_options(
            InputOptions::new()
                .on_focus(move || on_focus.borrow_mut().push("focus"))
                .on_blur(move || on_blur.borrow_mut().push("blur")),
        );
    render(&mut widget);

    widget.set_focus(true);
    assert!(widget.focus_state().is_editing());
    widget.set_focus(false);
    assert!(!widget.focus_state().is_editing());
    assert_eq!(*events.borrow(), vec!["open", "focus", "close", "blur"]);
}

#[test]
fn refocus_over_menu_skips_caller_handlers() {
    let events: Events = Rc::default();
    let (on_focus, on_blur) = (events.clone(), events.clone());
    let (widget, _) = fruit("");
    let mut widget = widget.with_input_options(
        InputOptions::new()
            .on_focus(move || on_focus.borrow_mut().push("focus"))
            .on_blur(move || on_blur.borrow_mut().push("blur")),
    );
    open(&mut widget);
    events.borrow_mut().clear();

    widget.handle_mouse(mouse(MouseEventKind::Moved, 3, 2));
    widget.set_focus(false);
    assert!(events.borrow().is_empty());
}

#[test]
fn tab_releases_ignore_blur() {
    let (mut widget, _) = fruit("");
    open(&mut widget);
    widget.handle_mouse(mouse(MouseEventKind::Moved, 3, 2));
    assert!(widget.is_ignoring_blur());

    assert_eq!(
        widget.handle_key(key(KeyCode::Tab)),
        ComponentResult::NotHandled
    );
    assert!(!widget.is_ignoring_blur());

    // The host moves focus; the blur now closes the menu.
    widget.set_focus(false);
    assert!(!widget.field().is_focused());
    assert!(!widget.is_open());
}

#[test]
fn typing_while_closed_opens_menu() {
    let (mut widget, _) = fruit("");
    open(&mut widget);
    widget.handle_key(key(KeyCode::Esc));
    assert!(!widget.is_open());

    widget.handle_key(key(KeyCode::Char('c')));
    assert!(widget.is_open());
    assert_eq!(widget.value(), "c");
    assert!(widget.menu_geometry().is_some());
}
