//! Line-oriented fallback for non-TTY environments and scripting.
//! Same session underneath as the TUI; only the adapter differs.

use anyhow::{Context, Result};
use chrono::Utc;
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};

use crate::contact::{is_valid_email, sanitize_whatsapp, ContactDetails};
use crate::output::{format_breakdown, format_result, should_use_colors};
use crate::session::{Advance, QuizSession, Retreat};
use crate::submit::{build_payload, deliver, WebhookTarget};

/// Exit code for the caller: 0 on success, 2 when webhook delivery failed.
pub async fn run_plain(
    mut session: QuizSession,
    webhook: Option<WebhookTarget>,
    verbose: bool,
) -> Result<i32> {
    let use_colors = should_use_colors();

    println!("Meet the coffee that understands you.");
    println!("Answer each question with an option number. 'b' goes back, 'q' quits.");

    loop {
        let progress = session.progress();
        let Some(question) = session.current_question() else {
            break;
        };

        println!();
        let header = format!("[{}/{}] {}", progress.index + 1, progress.total, question.title);
        if use_colors {
            println!("{}", header.bold());
        } else {
            println!("{}", header);
        }
        if !question.subtitle.is_empty() {
            println!("{}", question.subtitle);
        }
        let selected = session.selected_option();
        for (i, option) in question.options.iter().enumerate() {
            let marker = if selected == Some(i) { "*" } else { " " };
            println!("  {}{}. {}", marker, i + 1, option.text);
        }

        let option_count = question.options.len();
        let input = prompt(&format!("Answer [1-{}]: ", option_count))?;
        match input.as_str() {
            "q" => return Ok(0),
            "b" => match session.retreat() {
                Retreat::Previous => {}
                Retreat::AtStart => println!("Already at the first question."),
                Retreat::AlreadyCompleted => {}
            },
            _ => {
                let Ok(number) = input.parse::<usize>() else {
                    println!("Please type a number between 1 and {}.", option_count);
                    continue;
                };
                if number < 1 || number > option_count {
                    println!("Please type a number between 1 and {}.", option_count);
                    continue;
                }
                let index = session.progress().index;
                if session.select_answer(index, number - 1).is_err() {
                    continue;
                }
                match session.advance() {
                    Advance::Completed => break,
                    Advance::Next | Advance::NeedsAnswer | Advance::AlreadyCompleted => {}
                }
            }
        }
    }

    let result = session
        .final_result()
        .cloned()
        .context("Quiz ended without a result")?;

    // Contact collection, as on the TUI contact screen. Empty name skips.
    println!();
    println!("Almost there! Leave your contact to receive picks for your taste.");
    let contact = collect_contact()?;

    let mut exit_code = 0;
    if let Some(contact) = &contact {
        match &webhook {
            Some(target) => {
                if verbose {
                    eprintln!("Delivering contact to {}", target.url);
                }
                let payload = build_payload(contact, &result, &target.source, Utc::now());
                match deliver(target, &payload).await {
                    Ok(()) => println!("Contact delivered. Keep an eye on your inbox!"),
                    Err(e) => {
                        eprintln!("Delivery failed: {}", e);
                        exit_code = 2;
                    }
                }
            }
            None => println!("No webhook configured; your contact was not sent anywhere."),
        }
    }

    println!();
    let first_name = contact.as_ref().and_then(|c| c.first_name().map(str::to_string));
    println!("{}", format_result(&result, first_name.as_deref(), use_colors));
    println!();
    println!("{}", format_breakdown(&result, use_colors));

    Ok(exit_code)
}

/// Name, e-mail and optional WhatsApp, re-prompting until valid.
/// An empty name skips collection entirely.
fn collect_contact() -> Result<Option<ContactDetails>> {
    let mut name = prompt("Name (empty to skip): ")?;
    if name.is_empty() {
        return Ok(None);
    }
    while name.chars().count() < 2 {
        name = prompt("Name must have at least 2 characters: ")?;
    }

    let email = loop {
        let input = prompt("E-mail: ")?;
        if is_valid_email(&input) {
            break input;
        }
        println!("That doesn't look like an e-mail address.");
    };

    let whatsapp = loop {
        let input = prompt("WhatsApp, digits only (optional): ")?;
        let digits = sanitize_whatsapp(&input);
        if digits.is_empty() || (10..=11).contains(&digits.len()) {
            break digits;
        }
        println!("Use 10 or 11 digits (area code + number), or leave it empty.");
    };

    Ok(Some(ContactDetails {
        name,
        email,
        whatsapp,
    }))
}

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}
