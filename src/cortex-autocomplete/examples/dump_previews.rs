//! Autocomplete ASCII Preview Dumper
//!
//! Drives an autocomplete through a few interactions and saves an ASCII
//! rendering of each state to a markdown file.
//!
//! Run with: `cargo run -p cortex-autocomplete --example dump_previews`
//! Set `RUST_LOG=cortex_autocomplete=debug` to see the interaction log.

use cortex_autocomplete::prelude::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const WIDTH: u16 = 40;
const HEIGHT: u16 = 10;

const STATES: &[&str] = &[
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
];

/// Convert a buffer to ASCII art string
fn buffer_to_ascii(buf: &Buffer, area: Rect) -> String {
    let mut result = String::new();

    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            match buf.cell((x, y)).map(|cell| cell.symbol()) {
                Some(symbol) if !symbol.is_empty() => result.push_str(symbol),
                _ => result.push(' '),
            }
        }
        result.push('\n');
    }

    result
}

fn render_to_ascii(widget: &mut Autocomplete<&'static str>) -> String {
    let area = Rect::new(0, 0, WIDTH, HEIGHT);
    let mut buf = Buffer::empty(area);
    Component::render(widget, Rect::new(0, 0, 24, 1), &mut buf);
    buffer_to_ascii(&buf, area)
}

fn us_states() -> Autocomplete<&'static str> {
    Autocomplete::new(
        STATES.to_vec(),
        |state: &&str| state.to_string(),
        |state: &&str, _highlighted, style| Line::styled(state.to_string(), style),
    )
    .with_should_item_render(|state, value| {
        state.to_lowercase().contains(&value.to_lowercase())
    })
    .with_input_options(InputOptions::new().placeholder("Pick a state"))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn section(title: &str, description: &str, body: &str) -> String {
    format!("### {title}\n\n{description}\n\n```\n{body}```\n\n")
}

fn preview_states() -> String {
    let mut content = String::new();
    let mut widget = us_states();

    content.push_str(&section(
        "Closed",
        "Unfocused input showing its placeholder.",
        &render_to_ascii(&mut widget),
    ));

    widget.set_focus(true);
    content.push_str(&section(
        "Focused",
        "Focusing the input opens the menu with every item.",
        &render_to_ascii(&mut widget),
    ));

    for c in "ar".chars() {
        widget.handle_key(key(KeyCode::Char(c)));
    }
    content.push_str(&section(
        "Filtered",
        "Typing filters the items; the first prefix match is highlighted.",
        &render_to_ascii(&mut widget),
    ));

    widget.handle_key(key(KeyCode::Down));
    content.push_str(&section(
        "Navigated",
        "Arrow keys move the highlight, wrapping at either end.",
        &render_to_ascii(&mut widget),
    ));

    let result = widget.handle_key(key(KeyCode::Enter));
    tracing::info!(?result, "enter");
    content.push_str(&section(
        "Selected",
        "Enter commits the highlighted item and closes the menu.",
        &render_to_ascii(&mut widget),
    ));

    content
}

fn preview_unselectable() -> String {
    let mut widget = Autocomplete::new(
        vec!["Fruits", "Apple", "Banana", "Vegetables", "Carrot"],
        |item: &&str| item.to_string(),
        |item: &&str, _highlighted, style| {
            if matches!(*item, "Fruits" | "Vegetables") {
                Line::styled(item.to_uppercase(), style)
            } else {
                Line::styled(format!("  {item}"), style)
            }
        },
    )
    .with_is_item_selectable(|item| !matches!(*item, "Fruits" | "Vegetables"));

    // Mount, focus, then step past the first header.
    render_to_ascii(&mut widget);
    widget.set_focus(true);
    widget.handle_key(key(KeyCode::Down));
    widget.handle_key(key(KeyCode::Down));

    section(
        "Group headers",
        "Items that are not selectable are skipped by navigation.",
        &render_to_ascii(&mut widget),
    )
}

fn preview_custom_menu() -> String {
    let mut widget = us_states()
        .with_value("co")
        .with_render_menu(|props, buf| {
            // Plain list without borders, value echoed in the first row.
            let area = props.area;
            let header = format!("matches for {:?}", props.value);
            buf.set_stringn(area.x, area.y, &header, area.width as usize, props.style);
            let mut rows = Vec::new();
            for (offset, item) in props.items.iter().enumerate() {
                let y = area.y + 1 + offset as u16;
                if y >= area.bottom() {
                    break;
                }
                let row = Rect::new(area.x, y, area.width, 1);
                let marker = if item.highlighted { "* " } else { "  " };
                buf.set_string(row.x, y, marker, props.style);
                buf.set_line(row.x + 2, y, &item.line, row.width.saturating_sub(2));
                rows.push((item.index, row));
            }
            MenuLayout { area, rows }
        });

    render_to_ascii(&mut widget);
    widget.set_focus(true);

    section(
        "Custom menu",
        "A caller-supplied menu renderer reporting the rows it drew.",
        &render_to_ascii(&mut widget),
    )
}

fn preview_debug() -> String {
    let mut widget = us_states()
        .with_config(AutocompleteConfig {
            debug: true,
            input_width: Some(14),
            ..AutocompleteConfig::default()
        })
        .with_should_item_render(|state, value| state.starts_with(value));

    let area = Rect::new(0, 0, 60, 24);
    let mut buf = Buffer::empty(area);
    Component::render(&mut widget, area, &mut buf);
    widget.set_focus(true);
    widget.handle_key(key(KeyCode::Char('C')));
    Component::render(&mut widget, area, &mut buf);

    section(
        "Debug trace",
        "With `debug` on, the latest interaction states are shown as JSON.",
        &buffer_to_ascii(&buf, area),
    )
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let output_dir = Path::new("ui-previews");
    fs::create_dir_all(output_dir)?;

    let mut content = String::new();
    content.push_str("# Cortex Autocomplete - ASCII Previews\n\n");
    content.push_str(
        "> Generated automatically by `cargo run -p cortex-autocomplete --example dump_previews`\n\n",
    );
    content.push_str("---\n\n");
    content.push_str(&preview_states());
    content.push_str("---\n\n");
    content.push_str(&preview_unselectable());
    content.push_str("---\n\n");
    content.push_str(&preview_custom_menu());
    content.push_str("---\n\n");
    content.push_str(&preview_debug());

    let path = output_dir.join("AUTOCOMPLETE.md");
    let mut file = fs::File::create(&path)?;
    file.write_all(content.as_bytes())?;

    println!("Wrote {}", path.display());
    Ok(())
}
