//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

// General colors
pub const TITLE_COLOR: Color = Color::Cyan;
pub const ACCENT: Color = Color::Cyan;
pub const MUTED: Color = Color::Gray;
pub const DIM: Color = Color::DarkGray;

// Question screen
pub const DOT_ACTIVE: Color = Color::Cyan;
pub const DOT_INACTIVE: Color = Color::Indexed(238);
pub const OPTION_SELECTED: Color = Color::Green;
pub const HIGHLIGHT_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

// Bars in the breakdown overlay
pub const BAR_FILLED: Color = Color::Cyan;
pub const BAR_EMPTY: Color = Color::DarkGray;

// Status bar
pub const STATUS_BAR_BG: Color = Color::Indexed(236);
pub const STATUS_KEY_COLOR: Color = Color::Cyan;
pub const FLASH_SUCCESS: Color = Color::Green;
pub const FLASH_ERROR: Color = Color::Red;

// Contact form
pub const FIELD_FOCUSED: Color = Color::Cyan;
pub const FIELD_VALID: Color = Color::Green;
pub const FIELD_INVALID: Color = Color::Red;

// Popup overlay
pub const POPUP_BORDER: Color = Color::Cyan;
pub const POPUP_TITLE: Style = Style::new()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

pub const TITLE_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
