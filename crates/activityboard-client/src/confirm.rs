//! Confirmation prompts before destructive actions.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

/// Asks the user to confirm an action.
pub trait Confirm: Send + Sync {
    /// Returns true if the user accepts `prompt`.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Builds the prompt shown before removing a participant.
pub fn removal_prompt(activity: &str, email: &str) -> String {
    format!("Remove {} from {}?", email, activity)
}

/// Accepts every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Declines every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Asks on the terminal; only `y`/`yes` (any case) accepts.
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let stdin = io::stdin();
        let mut stderr = io::stderr();
        ask(prompt, &mut stdin.lock(), &mut stderr)
    }
}

/// Writes `prompt` to `output` and reads one answer line from `input`.
///
/// Read errors and end of input decline.
pub fn ask(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> bool {
    if write!(output, "{} [y/N] ", prompt).and_then(|_| output.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) | Err(_) => false,
        Ok(_) => is_yes(&answer),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Records every prompt and answers with a fixed choice.
#[derive(Debug, Default)]
pub struct RecordingConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl RecordingConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Returns the prompts seen so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

impl Confirm for RecordingConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.answer
    }
}
