//! Terminal implementations of the interactive view ports.

use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::domain::Route;
use crate::domain::ports::{ConfirmationPrompt, Navigator};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Navigator that remembers where the session currently is.
///
/// A one-shot command has no router to hand control to, so navigation just
/// records the route for the runner to report.
#[derive(Debug)]
pub struct SessionNavigator {
    current: Mutex<Route>,
}

impl SessionNavigator {
    /// Start a session on `route`.
    pub fn starting_at(route: Route) -> Self {
        Self {
            current: Mutex::new(route),
        }
    }

    /// Route the session is on now.
    pub fn current(&self) -> Route {
        lock(&self.current).clone()
    }
}

impl Navigator for SessionNavigator {
    fn go_to(&self, route: Route) {
        debug!(%route, "navigating");
        *lock(&self.current) = route;
    }
}

/// Yes/no prompt answered on a line-oriented stream.
///
/// Only `y` or `yes` (any case) confirm; anything else, including end of
/// input and read failures, declines.
#[derive(Debug)]
pub struct LinePrompt<R, W> {
    io: Mutex<(R, W)>,
}

impl<R, W> LinePrompt<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    /// Prompt on `output` and read answers from `input`.
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: Mutex::new((input, output)),
        }
    }

    fn ask(&self, message: &str) -> io::Result<String> {
        let mut guard = lock(&self.io);
        let (input, output) = &mut *guard;
        write!(output, "{message} [y/N] ")?;
        output.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        Ok(answer)
    }
}

impl LinePrompt<BufReader<Stdin>, Stderr> {
    /// Prompt on stderr and read from stdin, leaving stdout to the views.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R, W> ConfirmationPrompt for LinePrompt<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn confirm(&self, message: &str) -> bool {
        match self.ask(message) {
            Ok(answer) => is_affirmative(&answer),
            Err(error) => {
                warn!(error = %error, "confirmation prompt failed");
                false
            }
        }
    }
}

/// Prompt that answers every question the same way (`--yes`).
#[derive(Debug, Clone, Copy)]
pub struct PresetAnswer(pub bool);

impl ConfirmationPrompt for PresetAnswer {
    fn confirm(&self, message: &str) -> bool {
        debug!(message, answer = self.0, "confirmation answered by flag");
        self.0
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CustomerId;
    use rstest::rstest;

    #[rstest]
    #[case("y\n", true)]
    #[case("YES\n", true)]
    #[case("  yes  \n", true)]
    #[case("n\n", false)]
    #[case("\n", false)]
    #[case("", false)]
    #[case("yep\n", false)]
    fn only_explicit_yes_confirms(#[case] input: &str, #[case] expected: bool) {
        let prompt = LinePrompt::new(input.as_bytes(), Vec::new());
        assert_eq!(prompt.confirm("Are you sure you want to delete Ann?"), expected);
    }

    #[test]
    fn the_question_is_written_before_reading() {
        let prompt = LinePrompt::new("y\n".as_bytes(), Vec::new());
        prompt.confirm("Are you sure you want to delete Ann?");
        let (_, output) = prompt.io.into_inner().expect("prompt mutex");
        assert_eq!(
            String::from_utf8(output).expect("utf8"),
            "Are you sure you want to delete Ann? [y/N] "
        );
    }

    #[test]
    fn navigator_tracks_the_latest_route() {
        let navigator = SessionNavigator::starting_at(Route::Create);
        assert_eq!(navigator.current(), Route::Create);

        let id = CustomerId::new("3").expect("valid id");
        navigator.go_to(Route::Edit(id.clone()));
        navigator.go_to(Route::List);
        assert_eq!(navigator.current(), Route::List);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn preset_answers_skip_the_terminal(#[case] answer: bool) {
        assert_eq!(PresetAnswer(answer).confirm("anything"), answer);
    }
}
