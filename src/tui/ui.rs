use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::output::wrap_text;
use crate::tui::app::{App, ContactField, Screen, SubmitState};
use crate::tui::theme;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    match app.screen {
        Screen::Landing => render_landing(frame, chunks[1]),
        Screen::Question => render_question(frame, chunks[1], app),
        Screen::Contact => render_contact(frame, chunks[1], app),
        Screen::ThankYou => render_thank_you(frame, chunks[1], app),
    }
    render_status_bar(frame, chunks[2], app);

    if app.show_breakdown {
        render_breakdown_popup(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        "Palate",
        Style::default().fg(theme::TITLE_COLOR).bold(),
    )];

    if let Screen::Question = app.screen {
        let progress = app.session.progress();
        let right = format!("Question {} of {}", progress.index + 1, progress.total);
        let padding = (area.width as usize).saturating_sub("Palate".len() + right.len());
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(right, Style::default().fg(theme::MUTED)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_landing(frame: &mut Frame, area: Rect) {
    let inner = padded(area, 4, 2);
    let width = (inner.width as usize).min(64);

    let mut lines = vec![
        Line::from(Span::styled(
            "Meet the coffee that understands you.",
            theme::TITLE_STYLE,
        )),
        Line::from(""),
    ];
    for text in [
        "Every choice you make -- a dessert, a sip, a quiet moment -- reveals something about your palate.",
        "Answer five quick questions and discover the coffee profile that matches the way you feel.",
    ] {
        for wrapped in wrap_text(text, width) {
            lines.push(Line::from(Span::styled(
                wrapped,
                Style::default().fg(theme::MUTED),
            )));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Simple as that.",
        Style::default().fg(theme::MUTED).italic(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", Style::default().fg(theme::ACCENT).bold()),
        Span::raw(" to begin."),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_question(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.session.current_question() else {
        return;
    };
    let inner = padded(area, 4, 1);
    let width = (inner.width as usize).min(72);
    let progress = app.session.progress();
    let selected = app.session.selected_option();

    let mut lines = vec![progress_dots(progress.index, progress.total), Line::from("")];

    for wrapped in wrap_text(&question.title, width) {
        lines.push(Line::from(Span::styled(wrapped, theme::TITLE_STYLE)));
    }
    if !question.subtitle.is_empty() {
        for wrapped in wrap_text(&question.subtitle, width) {
            lines.push(Line::from(Span::styled(
                wrapped,
                Style::default().fg(theme::MUTED),
            )));
        }
    }
    lines.push(Line::from(""));

    for (i, option) in question.options.iter().enumerate() {
        let is_selected = selected == Some(i);
        let marker = if is_selected { "●" } else { "○" };
        let marker_style = if is_selected {
            Style::default().fg(theme::OPTION_SELECTED)
        } else {
            Style::default().fg(theme::DIM)
        };
        let text_style = if i == app.highlighted {
            theme::HIGHLIGHT_STYLE
        } else if is_selected {
            Style::default().fg(theme::OPTION_SELECTED)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}. ", i + 1), Style::default().fg(theme::DIM)),
            Span::styled(marker, marker_style),
            Span::raw(" "),
            Span::styled(format!(" {} ", option.text), text_style),
        ]));
    }

    if !question.note.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Why we ask:",
            Style::default().fg(theme::DIM).bold(),
        )));
        for wrapped in wrap_text(&question.note, width) {
            lines.push(Line::from(Span::styled(
                wrapped,
                Style::default().fg(theme::DIM),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_contact(frame: &mut Frame, area: Rect, app: &App) {
    let inner = padded(area, 4, 2);
    let width = (inner.width as usize).min(64);

    let mut lines = vec![
        Line::from(Span::styled("Almost there!", theme::TITLE_STYLE)),
        Line::from(""),
    ];
    for wrapped in wrap_text(
        "Your sensory profile already says a lot about you. Leave your contact to receive coffees and experiences picked for your taste.",
        width,
    ) {
        lines.push(Line::from(Span::styled(
            wrapped,
            Style::default().fg(theme::MUTED),
        )));
    }
    lines.push(Line::from(""));

    lines.push(field_line(
        "Name",
        &app.contact.name,
        app.focused_field == ContactField::Name,
        app.contact.name_is_valid(),
        app.contact.name.is_empty(),
    ));
    lines.push(field_line(
        "E-mail",
        &app.contact.email,
        app.focused_field == ContactField::Email,
        app.contact.email_is_valid(),
        app.contact.email.is_empty(),
    ));
    lines.push(field_line(
        "WhatsApp (optional)",
        &app.contact.whatsapp,
        app.focused_field == ContactField::Whatsapp,
        app.contact.whatsapp_is_valid(),
        app.contact.whatsapp.is_empty(),
    ));

    lines.push(Line::from(""));
    let submit_style = if app.contact.is_submittable() {
        Style::default().fg(theme::ACCENT).bold()
    } else {
        Style::default().fg(theme::DIM)
    };
    lines.push(Line::from(vec![
        Span::styled("Enter", submit_style),
        Span::raw(": send    "),
        Span::styled("Esc", Style::default().fg(theme::ACCENT)),
        Span::raw(": skip for now"),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_line<'a>(
    label: &'a str,
    value: &'a str,
    focused: bool,
    valid: bool,
    empty: bool,
) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(theme::FIELD_FOCUSED).bold()
    } else {
        Style::default().fg(theme::MUTED)
    };
    let check = if empty {
        Span::raw("  ")
    } else if valid {
        Span::styled(" ✓", Style::default().fg(theme::FIELD_VALID))
    } else {
        Span::styled(" ✗", Style::default().fg(theme::FIELD_INVALID))
    };
    let cursor = if focused { "|" } else { "" };
    Line::from(vec![
        Span::styled(format!("{:<21}", label), label_style),
        Span::raw(format!(" {}{}", value, cursor)),
        check,
    ])
}

fn render_thank_you(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.session.final_result() else {
        return;
    };
    let inner = padded(area, 4, 2);
    let width = (inner.width as usize).min(72);

    let greeting = match app.greeting_name() {
        Some(name) => format!("Congratulations, {}!", name),
        None => "Congratulations, coffee lover!".to_string(),
    };

    let mut lines = vec![
        Line::from(Span::styled(greeting, theme::TITLE_STYLE)),
        Line::from(""),
        Line::from(Span::styled(
            format!("You are {}", result.name),
            Style::default().fg(theme::ACCENT).bold(),
        )),
        Line::from(""),
    ];
    for wrapped in wrap_text(&result.description, width) {
        lines.push(Line::from(wrapped));
    }
    lines.push(Line::from(""));

    match &app.submit_state {
        SubmitState::Sending => {
            let spinner_chars = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
            let spinner = spinner_chars[app.spinner_frame % 10];
            lines.push(Line::from(Span::styled(
                format!("{} Sending your contact...", spinner),
                Style::default().fg(theme::MUTED),
            )));
        }
        SubmitState::Delivered => {
            lines.push(Line::from(Span::styled(
                "Your access and tailored picks are on the way to your inbox. Keep an eye out!",
                Style::default().fg(theme::FLASH_SUCCESS),
            )));
        }
        SubmitState::Failed(_) => {
            lines.push(Line::from(Span::styled(
                "We couldn't save your contact, but your profile is yours to keep.",
                Style::default().fg(theme::FLASH_ERROR),
            )));
        }
        SubmitState::Skipped | SubmitState::Idle => {
            for wrapped in wrap_text(
                "We hope you enjoyed discovering a little more about your sensory preferences.",
                width,
            ) {
                lines.push(Line::from(Span::styled(
                    wrapped,
                    Style::default().fg(theme::MUTED),
                )));
            }
        }
    }

    if let Some(cta) = &app.cta {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("o", Style::default().fg(theme::ACCENT).bold()),
            Span::raw(": "),
            Span::raw(
                cta.label
                    .as_deref()
                    .unwrap_or("Open the coffees made for you"),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Delivery failed") {
            theme::FLASH_ERROR
        } else if msg.starts_with("Opened") || msg.starts_with("Contact delivered") {
            theme::FLASH_SUCCESS
        } else {
            Color::White
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: Vec<(&str, &str)> = match app.screen {
            Screen::Landing => vec![("Enter", ":start "), ("q", ":quit")],
            Screen::Question => vec![
                ("j/k", ":move "),
                ("Enter", ":pick "),
                ("l", ":continue "),
                ("h", ":back "),
                ("1-9", ":quick pick "),
                ("q", ":quit"),
            ],
            Screen::Contact => vec![
                ("Tab", ":next field "),
                ("Enter", ":send "),
                ("Esc", ":skip"),
            ],
            Screen::ThankYou => vec![
                ("b", ":breakdown "),
                ("o", ":open link "),
                ("r", ":retake "),
                ("q", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(theme::STATUS_KEY_COLOR),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme::STATUS_BAR_BG)),
        area,
    );
}

/// Progress dots, one per question, the current one highlighted.
fn progress_dots(current: usize, total: usize) -> Line<'static> {
    let mut spans = Vec::new();
    for i in 0..total {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if i == current {
            Style::default().fg(theme::DOT_ACTIVE)
        } else {
            Style::default().fg(theme::DOT_INACTIVE)
        };
        spans.push(Span::styled("●", style));
    }
    Line::from(spans)
}

/// Render the per-category score breakdown popup
fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let Some(result) = app.session.final_result() else {
        return;
    };

    const BAR_WIDTH: usize = 10;
    let height = (result.totals.len() + 2) as u16;
    let popup_area = centered_rect_fixed(44, height, frame.area());

    frame.render_widget(Clear, popup_area);
    let block = Block::bordered()
        .title(Span::styled(" Your palate, in numbers ", theme::POPUP_TITLE))
        .border_style(Style::default().fg(theme::POPUP_BORDER));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let max = result.totals.iter().map(|t| t.total).max().unwrap_or(0);
    let name_width = result
        .totals
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(0);

    let lines: Vec<Line> = result
        .totals
        .iter()
        .map(|t| {
            let filled = if max > 0 {
                (t.total as usize * BAR_WIDTH + max as usize / 2) / max as usize
            } else {
                0
            };
            let mut spans = vec![Span::styled(
                format!("{:<width$}  ", t.name, width = name_width),
                Style::default().fg(theme::MUTED),
            )];
            if filled > 0 {
                spans.push(Span::styled(
                    "█".repeat(filled),
                    Style::default().fg(theme::BAR_FILLED),
                ));
            }
            if filled < BAR_WIDTH {
                spans.push(Span::styled(
                    "░".repeat(BAR_WIDTH - filled),
                    Style::default().fg(theme::BAR_EMPTY),
                ));
            }
            spans.push(Span::raw(format!("  {}", t.total)));
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Inset an area by horizontal and vertical margins.
fn padded(area: Rect, horizontal: u16, vertical: u16) -> Rect {
    Rect {
        x: area.x + horizontal.min(area.width / 2),
        y: area.y + vertical.min(area.height / 2),
        width: area.width.saturating_sub(horizontal * 2),
        height: area.height.saturating_sub(vertical * 2),
    }
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}
