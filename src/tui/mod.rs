pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use app::{Screen, SubmitState};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    // 250ms tick drives the flash timeout and the delivery spinner
    let mut events = EventHandler::new(250);

    let mut pending_submit: Option<tokio::task::JoinHandle<anyhow::Result<()>>> = None;

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => {
                app.update_flash();
                app.advance_spinner();
            }
        }

        // Spawn delivery when the contact form was submitted. The result
        // screen is already showing; delivery only updates its status.
        if app.submit_requested && pending_submit.is_none() {
            app.submit_requested = false;
            match (app.webhook.clone(), app.session.final_result().cloned()) {
                (Some(target), Some(result)) => {
                    let contact = app.contact.clone();
                    app.submit_state = SubmitState::Sending;
                    pending_submit = Some(tokio::spawn(async move {
                        let payload = crate::submit::build_payload(
                            &contact,
                            &result,
                            &target.source,
                            Utc::now(),
                        );
                        crate::submit::deliver(&target, &payload).await
                    }));
                }
                _ => {
                    app.submit_state = SubmitState::Skipped;
                    app.show_flash("No webhook configured; contact not delivered".to_string());
                }
            }
        }

        // Check if background delivery has completed
        if let Some(handle) = &mut pending_submit {
            if handle.is_finished() {
                let handle = pending_submit.take().unwrap();
                match handle.await {
                    Ok(Ok(())) => {
                        app.submit_state = SubmitState::Delivered;
                        app.show_flash("Contact delivered".to_string());
                    }
                    Ok(Err(e)) => {
                        app.submit_state = SubmitState::Failed(e.to_string());
                        app.show_flash(format!("Delivery failed: {}", e));
                    }
                    Err(e) => {
                        app.submit_state = SubmitState::Failed(e.to_string());
                        app.show_flash(format!("Delivery task panicked: {}", e));
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    ratatui::restore();

    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ctrl-c quits from anywhere, including text fields
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.screen {
        Screen::Landing => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => app.start_quiz(),
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        },

        Screen::Question => match key.code {
            KeyCode::Char('q') => app.should_quit = true,

            // Move the cursor
            KeyCode::Char('j') | KeyCode::Down => app.highlight_next(),
            KeyCode::Char('k') | KeyCode::Up => app.highlight_previous(),

            // Record the highlighted option (stays on the question)
            KeyCode::Enter | KeyCode::Char(' ') => app.choose_highlighted(),

            // Quick pick by number
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                app.choose_numbered(c as usize - '0' as usize);
            }

            // Navigation; the session re-validates both directions
            KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => app.continue_quiz(),
            KeyCode::Char('h') | KeyCode::Char('b') | KeyCode::Left | KeyCode::Esc => app.back(),

            _ => {}
        },

        Screen::Contact => match key.code {
            KeyCode::Enter => app.request_submit(),
            KeyCode::Esc => app.skip_contact(),
            KeyCode::Tab | KeyCode::Down => app.focus_next_field(),
            KeyCode::BackTab | KeyCode::Up => app.focus_previous_field(),
            KeyCode::Backspace => app.contact_backspace(),
            KeyCode::Char(c) => app.contact_input(c),
            _ => {}
        },

        Screen::ThankYou => match key.code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('b') => app.toggle_breakdown(),
            KeyCode::Esc if app.show_breakdown => app.toggle_breakdown(),
            KeyCode::Char('o') | KeyCode::Enter => app.open_cta(),
            KeyCode::Char('r') => app.restart(),
            _ => {}
        },
    }
}
