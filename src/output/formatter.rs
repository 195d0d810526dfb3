use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::quiz::{ProfileCatalog, QuizDefinition};
use crate::scoring::ProfileResult;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to 80 for pipes
fn get_terminal_width() -> usize {
    terminal_size().map(|(Width(w), _)| w as usize).unwrap_or(80)
}

/// Wrap text to `width` columns on word boundaries. Words longer than the
/// width get a line of their own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Format the final profile for plain (non-TUI) output.
pub fn format_result(result: &ProfileResult, user_name: Option<&str>, use_colors: bool) -> String {
    let width = get_terminal_width().min(72);
    let greeting = match user_name {
        Some(name) => format!("Congratulations, {}!", name),
        None => "Congratulations!".to_string(),
    };
    let headline = format!("You are {}", result.name);
    let body = wrap_text(&result.description, width).join("\n");

    if use_colors {
        format!("{}\n{}\n\n{}", greeting.bold(), headline.cyan().bold(), body)
    } else {
        format!("{}\n{}\n\n{}", greeting, headline, body)
    }
}

/// Per-category totals as aligned rows with a proportional bar, in catalog
/// order. E.g. "chocolatey  ███░░  3".
pub fn format_breakdown(result: &ProfileResult, use_colors: bool) -> String {
    const BAR_WIDTH: usize = 12;

    let max = result.totals.iter().map(|t| t.total).max().unwrap_or(0);
    let name_width = result
        .totals
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(0);

    result
        .totals
        .iter()
        .map(|t| {
            let filled = if max > 0 {
                (t.total as usize * BAR_WIDTH + max as usize / 2) / max as usize
            } else {
                0
            };
            let bar: String = "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled);
            if use_colors {
                format!(
                    "{:<width$}  {}  {}",
                    t.name,
                    bar.cyan(),
                    t.total.bold(),
                    width = name_width
                )
            } else {
                format!("{:<width$}  {}  {}", t.name, bar, t.total, width = name_width)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-screen summary of a loaded questionnaire, for `palate validate`.
pub fn format_summary(
    quiz: &QuizDefinition,
    catalog: &ProfileCatalog,
    webhook_configured: bool,
) -> String {
    let option_count: usize = quiz.questions().iter().map(|q| q.options.len()).sum();
    let profiles = catalog
        .iter()
        .map(|p| p.key.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Questionnaire OK: {} questions, {} options, {} profiles ({})\nWebhook: {}",
        quiz.len(),
        option_count,
        catalog.len(),
        profiles,
        if webhook_configured {
            "configured"
        } else {
            "not configured (contacts are collected but not delivered)"
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::builtin_questionnaire;
    use crate::scoring::{CategoryTotal, ResultKind};

    fn result() -> ProfileResult {
        ProfileResult {
            name: "Fruity".to_string(),
            description: "You find pleasure in lively lightness.".to_string(),
            kind: ResultKind::Dominant {
                key: "fruity".to_string(),
            },
            totals: vec![
                CategoryTotal {
                    key: "chocolatey".to_string(),
                    name: "Chocolatey".to_string(),
                    total: 2,
                },
                CategoryTotal {
                    key: "fruity".to_string(),
                    name: "Fruity".to_string(),
                    total: 3,
                },
            ],
        }
    }

    #[test]
    fn wrap_text_respects_width() {
        let lines = wrap_text("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn wrap_text_handles_long_words() {
        let lines = wrap_text("a extraordinarily b", 5);
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn wrap_text_empty() {
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn format_result_greets_by_name() {
        let text = format_result(&result(), Some("Juliana"), false);
        assert!(text.contains("Congratulations, Juliana!"));
        assert!(text.contains("You are Fruity"));
        assert!(text.contains("lively lightness"));
    }

    #[test]
    fn format_result_without_name() {
        let text = format_result(&result(), None, false);
        assert!(text.starts_with("Congratulations!"));
    }

    #[test]
    fn breakdown_lists_catalog_order_with_totals() {
        let text = format_breakdown(&result(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Chocolatey"));
        assert!(lines[0].ends_with('2'));
        assert!(lines[1].starts_with("Fruity"));
        assert!(lines[1].ends_with('3'));
        // The leader's bar is fully filled.
        assert!(lines[1].contains(&"█".repeat(12)));
    }

    #[test]
    fn breakdown_all_zero_has_empty_bars() {
        let mut r = result();
        for t in &mut r.totals {
            t.total = 0;
        }
        let text = format_breakdown(&r, false);
        assert!(text.lines().all(|l| l.contains(&"░".repeat(12))));
    }

    #[test]
    fn summary_counts_questionnaire() {
        let (quiz, catalog) = builtin_questionnaire();
        let text = format_summary(&quiz, &catalog, false);
        assert!(text.contains("5 questions"));
        assert!(text.contains("25 options"));
        assert!(text.contains("5 profiles"));
        assert!(text.contains("not configured"));
    }
}
