use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

use palate::session::QuizSession;
use palate::submit::WebhookTarget;

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take the quiz (default if no subcommand)
    Run,
    /// Check the config and questionnaire without starting the quiz
    Validate,
    /// Create a starter config file interactively
    Init {
        /// Write the config to this path instead of prompting for one
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "palate")]
#[command(about = "Coffee sensory-profile quiz in your terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/palate/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Line-oriented prompts instead of the TUI (implied when stdout is not a terminal)
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run);

    // Init runs before config loading: a broken config is exactly what it fixes
    if let Commands::Init { path } = &command {
        match palate::config::run_init_wizard(path.clone()) {
            Ok(()) => std::process::exit(EXIT_SUCCESS),
            Err(e) => {
                eprintln!("Init error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match palate::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let (quiz, catalog) = config.questionnaire();

    if cli.verbose {
        eprintln!(
            "Loaded {} questions over {} profiles",
            quiz.len(),
            catalog.len()
        );
        for profile in catalog.iter() {
            eprintln!("  {}: {}", profile.key, profile.name);
        }
    }

    // Validate the questionnaire at startup; an invalid one never runs
    if let Err(errors) = palate::scoring::validate_quiz(&quiz, &catalog) {
        eprintln!("Questionnaire errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Resolve the webhook target, if one is configured
    let webhook = match config.webhook.as_ref().map(WebhookTarget::from_config) {
        None => None,
        Some(Ok(target)) => Some(target),
        Some(Err(e)) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Commands::Validate = command {
        println!(
            "{}",
            palate::output::format_summary(&quiz, &catalog, webhook.is_some())
        );
        std::process::exit(EXIT_SUCCESS);
    }

    let session = QuizSession::new(quiz, catalog, config.result_strings());

    let exit_code = if cli.plain || !std::io::stdout().is_terminal() {
        match palate::plain::run_plain(session, webhook, cli.verbose).await {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_NETWORK
            }
        }
    } else {
        let app = palate::tui::App::new(session, webhook, config.cta.clone(), cli.verbose);
        match palate::tui::run_tui(app).await {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_NETWORK
            }
        }
    };

    std::process::exit(exit_code);
}
