//! Autocomplete configuration.
//!
//! Behavior switches and layout knobs that are plain data. Everything that is
//! code (accessors, renderers, callbacks) is passed to the builder instead.
//!
//! ```toml
//! auto_highlight = true
//! select_on_blur = false
//! max_height_percent = 40
//!
//! [input_margin]
//! left = 1
//! right = 1
//! ```

use crate::error::{AutocompleteError, Result};
use serde::{Deserialize, Serialize};

/// Margins around the input box, in cells.
///
/// The menu anchor is derived from the input rectangle plus these margins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Margins {
    /// Same margin on every side.
    pub fn uniform(value: u16) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Configuration for an [`Autocomplete`](crate::Autocomplete).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    /// Highlight the first selectable item whose value starts with the input.
    pub auto_highlight: bool,
    /// Commit the highlighted item when the input loses focus.
    pub select_on_blur: bool,
    /// Render a trace of recent interaction states next to the input.
    pub debug: bool,
    /// Menu height cap as a percentage of the frame height.
    pub max_height_percent: u16,
    /// Margins of the input box used when positioning the menu.
    pub input_margin: Margins,
    /// Fixed input width. `None` uses the full wrapper width.
    pub input_width: Option<u16>,
    /// Draw a scrollbar when the menu overflows.
    pub scrollbar: bool,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            auto_highlight: true,
            select_on_blur: false,
            debug: false,
            max_height_percent: 50,
            input_margin: Margins::default(),
            input_width: None,
            scrollbar: true,
        }
    }
}

impl AutocompleteConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.max_height_percent) {
            return Err(AutocompleteError::InvalidValue {
                key: "max_height_percent".to_string(),
                message: format!("must be within 1..=100, got {}", self.max_height_percent),
            });
        }
        if self.input_width == Some(0) {
            return Err(AutocompleteError::InvalidValue {
                key: "input_width".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Maximum menu rows (including borders) for a frame of `frame_height`.
    pub fn max_menu_height(&self, frame_height: u16) -> u16 {
        let percent = self.max_height_percent.clamp(1, 100) as u32;
        ((frame_height as u32 * percent) / 100) as u16
    }
}
