//! Capture host backed by the configured source list and a terminal prompt.

use std::io::{self, BufRead, Write};
use std::thread;

use capture::{CaptureHost, CaptureSource, Choice, ChoiceMenu, HostError, MenuEntry, SourceKind, WindowId};
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Blocking picker: shows the prompt and returns the user's answer.
type PromptFn = fn(&str, &[Choice]) -> Option<Choice>;

/// Offers the sources from `[capture].sources` and asks on stdin.
pub struct TerminalHost {
    sources: Vec<CaptureSource>,
    prompt: PromptFn,
}

impl TerminalHost {
    pub fn new(sources: Vec<CaptureSource>) -> Self {
        Self {
            sources,
            prompt: prompt_choice,
        }
    }

    #[cfg(test)]
    fn with_prompt(sources: Vec<CaptureSource>, prompt: PromptFn) -> Self {
        Self { sources, prompt }
    }
}

impl CaptureHost for TerminalHost {
    async fn enumerate_sources(&self, kinds: &[SourceKind]) -> Result<Vec<CaptureSource>, HostError> {
        Ok(self
            .sources
            .iter()
            .filter(|source| kinds.contains(&source.kind))
            .cloned()
            .collect())
    }

    async fn present_choice(&self, anchor: WindowId, menu: &ChoiceMenu) -> Option<Choice> {
        debug!(%anchor, "presenting source picker");
        let text = render_menu(menu);
        let items: Vec<Choice> = menu.items().map(|(_, choice)| choice).collect();

        let answer = match spawn_prompt(self.prompt, text, items) {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "failed to start source picker");
                return None;
            }
        };

        match answer.await {
            Ok(choice) => choice,
            Err(_) => {
                warn!("source picker exited without an answer");
                None
            }
        }
    }
}

/// Run the prompt on a detached thread.
///
/// A blocked `read_line` outlives a timed-out or cancelled request; the
/// runtime must not wait for it on shutdown, so `spawn_blocking` is not used.
fn spawn_prompt(
    prompt: PromptFn,
    text: String,
    items: Vec<Choice>,
) -> io::Result<oneshot::Receiver<Option<Choice>>> {
    let (tx, rx) = oneshot::channel();
    thread::Builder::new()
        .name("source-picker".to_string())
        .spawn(move || {
            // Request already settled: nobody is listening.
            let _ = tx.send(prompt(&text, &items));
        })?;
    Ok(rx)
}

/// Parsed answer to the picker prompt.
#[derive(Debug, PartialEq, Eq)]
enum Selection {
    Picked(Choice),
    Invalid,
}

fn render_menu(menu: &ChoiceMenu) -> String {
    let mut out = String::from("\nSelect what to share:\n");
    let mut number = 0;
    for entry in menu.entries() {
        match entry {
            MenuEntry::Item {
                label,
                choice: Choice::Source(_),
            } => {
                number += 1;
                out.push_str(&format!("  {number}) {label}\n"));
            }
            MenuEntry::Item {
                label,
                choice: Choice::Cancel,
            } => out.push_str(&format!("  c) {label}\n")),
            MenuEntry::Separator => out.push_str("  --\n"),
        }
    }
    out
}

/// Map typed input onto the picker's items.
///
/// Sources are numbered from 1 in menu order; `c` cancels.
fn parse_selection(input: &str, items: &[Choice]) -> Selection {
    let input = input.trim();
    if input.eq_ignore_ascii_case("c") || input.eq_ignore_ascii_case("cancel") {
        return if items.contains(&Choice::Cancel) {
            Selection::Picked(Choice::Cancel)
        } else {
            Selection::Invalid
        };
    }

    let Ok(number) = input.parse::<usize>() else {
        return Selection::Invalid;
    };
    items
        .iter()
        .filter(|choice| matches!(choice, Choice::Source(_)))
        .nth(number.wrapping_sub(1))
        .map_or(Selection::Invalid, |choice| Selection::Picked(*choice))
}

/// Blocking prompt loop. `None` on end of input.
fn prompt_choice(prompt: &str, items: &[Choice]) -> Option<Choice> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("{prompt}");

    loop {
        print!("> ");
        if stdout.flush().is_err() {
            return None;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }

        match parse_selection(&line, items) {
            Selection::Picked(choice) => return Some(choice),
            Selection::Invalid => println!("Enter a number from the list, or 'c' to cancel."),
        }
    }
}
