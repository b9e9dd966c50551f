//! REPL line parsing.

/// A session named on the command line, by list position or by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRef {
    /// 1-based position in the last printed session list
    Index(usize),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Send(String),
    NewChat,
    Sessions,
    Open(SessionRef),
    Delete(SessionRef),
    /// 1-based position of a suggestion chip
    Suggestion(usize),
    Token(String),
    Help,
    Quit,
}

pub const COMMANDS: &[&str] = &[
    "/new",
    "/sessions",
    "/open",
    "/delete",
    "/s",
    "/token",
    "/help",
    "/quit",
];

pub const HELP: &str = "\
/new              start a new conversation
/sessions         refresh the session list
/open <n|id>      open a session
/delete <n|id>    delete a session
/s <n>            send suggestion n
/token <token>    store a refreshed access token
/quit             exit";

/// Parses one input line. Anything not starting with `/` is a message.
pub fn parse(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    if !line.starts_with('/') {
        return Ok(ReplCommand::Send(line.to_string()));
    }

    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match command {
        "/new" => Ok(ReplCommand::NewChat),
        "/sessions" => Ok(ReplCommand::Sessions),
        "/open" => session_ref(argument).map(ReplCommand::Open),
        "/delete" => session_ref(argument).map(ReplCommand::Delete),
        "/s" => argument
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(ReplCommand::Suggestion)
            .ok_or_else(|| "Usage: /s <n>".to_string()),
        "/token" if !argument.is_empty() => Ok(ReplCommand::Token(argument.to_string())),
        "/token" => Err("Usage: /token <token>".to_string()),
        "/help" => Ok(ReplCommand::Help),
        "/quit" | "/exit" => Ok(ReplCommand::Quit),
        other => Err(format!("Unknown command: {other}")),
    }
}

fn session_ref(argument: &str) -> Result<SessionRef, String> {
    if argument.is_empty() {
        return Err("Usage: /open <n|id> or /delete <n|id>".to_string());
    }
    Ok(match argument.parse::<usize>() {
        Ok(index) if index > 0 => SessionRef::Index(index),
        _ => SessionRef::Id(argument.to_string()),
    })
}
