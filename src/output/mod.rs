pub mod formatter;

pub use formatter::{format_breakdown, format_result, format_summary, should_use_colors, wrap_text};
