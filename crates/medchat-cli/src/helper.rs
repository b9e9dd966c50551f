//! Line editing for the REPL: command names, then the numbers the view
//! has printed for sessions and suggestion chips.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::commands::COMMANDS;
use crate::view::TerminalView;

/// What the argument of a numbered command refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numbered {
    Session,
    Suggestion,
}

/// Splits `line` into a numbered command and its partial argument.
fn numbered_argument(line: &str) -> Option<(Numbered, &str, usize)> {
    let (command, argument) = line.split_once(' ')?;
    let kind = match command {
        "/open" | "/delete" => Numbered::Session,
        "/s" => Numbered::Suggestion,
        _ => return None,
    };
    if argument.contains(' ') {
        return None;
    }
    Some((kind, argument, command.len() + 1))
}

pub struct ReplHelper {
    view: Arc<TerminalView>,
}

impl ReplHelper {
    pub fn new(view: Arc<TerminalView>) -> Self {
        Self { view }
    }

    fn count(&self, kind: Numbered) -> usize {
        match kind {
            Numbered::Session => self.view.session_count(),
            Numbered::Suggestion => self.view.suggestion_count(),
        }
    }

    fn label(&self, kind: Numbered, index: usize) -> Option<String> {
        match kind {
            Numbered::Session => self.view.session_title(index),
            Numbered::Suggestion => self.view.suggestion(index),
        }
    }

    /// Completion start and candidates for the text left of the cursor.
    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        if line.starts_with('/') && !line.contains(' ') {
            let names = COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| cmd.to_string())
                .collect();
            return (0, names);
        }

        match numbered_argument(line) {
            Some((kind, partial, start)) => {
                let numbers = (1..=self.count(kind))
                    .map(|n| n.to_string())
                    .filter(|n| n.starts_with(partial))
                    .collect();
                (start, numbers)
            }
            None => (0, Vec::new()),
        }
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.candidates(&line[..pos]);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    /// Completes a unique command name, or names the session or chip a
    /// typed number points at.
    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }

        if let Some((kind, argument, _)) = numbered_argument(line) {
            let index = argument.parse().ok()?;
            return self.label(kind, index).map(|label| format!("  {label}"));
        }

        if line.starts_with('/') && !line.contains(' ') {
            let (_, names) = self.candidates(line);
            if let [name] = names.as_slice() {
                return Some(name[line.len()..].to_string()).filter(|rest| !rest.is_empty());
            }
        }
        None
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Validator for ReplHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use medchat_core::session::SessionSummary;
    use medchat_core::view::{ChatView, MessageHandle};

    fn helper() -> ReplHelper {
        let view = Arc::new(TerminalView::new());
        let sessions: Vec<SessionSummary> = (1..=12)
            .map(|n| SessionSummary::new(format!("S{n}"), format!("Chat {n}")))
            .collect();
        view.render_sessions(&sessions, None);
        view.render_suggestions(
            MessageHandle(0),
            &["What next?".to_string(), "Side effects?".to_string()],
        );
        ReplHelper::new(view)
    }

    #[test]
    fn test_completes_command_names() {
        let (start, names) = helper().candidates("/s");
        assert_eq!(start, 0);
        assert_eq!(names, vec!["/sessions", "/s"]);
    }

    #[test]
    fn test_completes_session_numbers_after_open() {
        let helper = helper();

        let (start, numbers) = helper.candidates("/open 1");
        assert_eq!(start, 6);
        assert_eq!(numbers, vec!["1", "10", "11", "12"]);

        let (start, numbers) = helper.candidates("/delete ");
        assert_eq!(start, 8);
        assert_eq!(numbers.len(), 12);
    }

    #[test]
    fn test_completes_suggestion_numbers() {
        let (start, numbers) = helper().candidates("/s ");
        assert_eq!(start, 3);
        assert_eq!(numbers, vec!["1", "2"]);
    }

    #[test]
    fn test_free_text_has_no_candidates() {
        let helper = helper();
        assert!(helper.candidates("what is /open").1.is_empty());
        assert!(helper.candidates("/token abc").1.is_empty());
    }

    #[test]
    fn test_numbered_argument_parsing() {
        assert_eq!(numbered_argument("/open 3"), Some((Numbered::Session, "3", 6)));
        assert_eq!(numbered_argument("/s 2"), Some((Numbered::Suggestion, "2", 3)));
        assert_eq!(numbered_argument("/open 3 4"), None);
        assert_eq!(numbered_argument("/open"), None);
    }
}
