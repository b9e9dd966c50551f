use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use medchat_application::{
    ChatController, ChatSettings, TranslationOptions, TranslationService, UiEvent,
};
use medchat_core::api::ChatApi;
use medchat_core::auth::{AuthManager, TokenStore};
use medchat_infrastructure::{ConfigService, FileTokenStore, HttpChatApi};

mod commands;
mod helper;
mod redirect;
mod view;

use commands::{HELP, ReplCommand, SessionRef};
use helper::ReplHelper;
use redirect::TerminalRedirect;
use view::TerminalView;

#[derive(Parser, Debug)]
#[command(name = "medchat")]
#[command(about = "Terminal client for the MedChat patient assistant", long_about = None)]
struct Cli {
    /// Chat service origin, e.g. http://localhost:8000
    #[arg(long)]
    base_url: Option<String>,

    /// Access token to store before starting
    #[arg(long, env = "MEDCHAT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Configuration file (default: <config dir>/medchat/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Token file (default: <config dir>/medchat/token)
    #[arg(long)]
    token_file: Option<PathBuf>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Turns a parsed line into a controller event, or `None` when it was
/// handled locally.
fn resolve(command: ReplCommand, view: &TerminalView) -> Option<UiEvent> {
    let session_id = |session: SessionRef| match session {
        SessionRef::Id(id) => Some(id),
        SessionRef::Index(index) => {
            let id = view.session_id(index);
            if id.is_none() {
                println!("{}", format!("No session #{index}, try /sessions").yellow());
            }
            id
        }
    };

    match command {
        ReplCommand::Send(text) => Some(UiEvent::Submit(text)),
        ReplCommand::NewChat => Some(UiEvent::NewChat),
        ReplCommand::Open(session) => session_id(session).map(UiEvent::SelectSession),
        ReplCommand::Delete(session) => session_id(session).map(UiEvent::DeleteSession),
        ReplCommand::Suggestion(index) => {
            let text = view.suggestion(index);
            if text.is_none() {
                println!("{}", format!("No suggestion #{index}").yellow());
            }
            text.map(UiEvent::SuggestionClicked)
        }
        ReplCommand::Token(token) => Some(UiEvent::TokenRefreshed(token)),
        ReplCommand::Sessions | ReplCommand::Help | ReplCommand::Quit => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // ===== Configuration =====
    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let mut config = config_service.load_with_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    tracing::debug!(path = ?config_service.path(), base_url = %config.base_url, "Configuration loaded");

    // ===== Authentication =====
    let store: Arc<dyn TokenStore> = match cli.token_file {
        Some(path) => Arc::new(FileTokenStore::with_path(path)),
        None => Arc::new(FileTokenStore::new()?),
    };
    let redirect = Arc::new(TerminalRedirect::new(&config.base_url));
    let auth = Arc::new(AuthManager::new(
        store,
        redirect.clone(),
        config.login_path.clone(),
        config.return_path.clone(),
    ));
    if let Some(token) = cli.token.as_deref() {
        auth.update_token(token)?;
    }
    if !auth.validate_token_exists() {
        return Ok(());
    }

    // ===== Controller =====
    let api: Arc<dyn ChatApi> = Arc::new(HttpChatApi::new(
        &config.base_url,
        auth.clone(),
        config.request_timeout(),
    )?);
    let view = Arc::new(TerminalView::new());
    let translator = TranslationService::new(api.clone(), TranslationOptions::from(&config));
    let controller = ChatController::new(
        api,
        view.clone(),
        auth,
        translator,
        ChatSettings::from(&config),
    );

    println!("{}", "=== MedChat ===".bright_magenta().bold());
    println!("{}", "Type a question, or /help for commands.".bright_black());
    println!();

    controller.initialize().await;

    // ===== REPL =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new(view.clone())));

    while !redirect.fired() {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match commands::parse(trimmed) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message.yellow());
                        continue;
                    }
                };

                match command {
                    ReplCommand::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    ReplCommand::Help => println!("{}", HELP.bright_black()),
                    ReplCommand::Sessions => {
                        if let Err(err) = controller.list_sessions(true).await {
                            eprintln!("{}", format!("Failed to load sessions: {err}").red());
                        }
                    }
                    command => {
                        if let Some(event) = resolve(command, &view) {
                            controller.dispatch(event).await;
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
