//! Host dialogs: messages, confirmations, input boxes, and pick lists.

use std::path::PathBuf;

use anyhow::{Context, Result};
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

/// Entry of a multi-select pick list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub label: String,
    pub picked: bool,
}

impl PickItem {
    pub fn new(label: impl Into<String>, picked: bool) -> Self {
        Self {
            label: label.into(),
            picked,
        }
    }
}

/// Prompts the host shows to the user.
///
/// Every prompt may be dismissed, which is reported as `None`.
pub trait Dialogs {
    /// Informational message. Returns the index of the chosen button.
    fn info(&mut self, message: &str, buttons: &[String]) -> Result<Option<usize>>;

    /// Modal warning that requires an explicit choice.
    fn warning(&mut self, message: &str, buttons: &[String]) -> Result<Option<usize>>;

    fn error(&mut self, message: &str) -> Result<()>;

    /// Single-line text input.
    fn input(&mut self, prompt: &str, initial: &str) -> Result<Option<String>>;

    /// Multi-select list. Returns the indices that end up picked.
    fn pick_many(&mut self, title: &str, items: &[PickItem]) -> Result<Option<Vec<usize>>>;

    /// Ask for the location of an executable file.
    fn locate_executable(&mut self, title: &str) -> Result<Option<PathBuf>>;
}

/// Interactive dialogs on the terminal, read with `reedline`.
pub struct TerminalDialogs {
    editor: Reedline,
}

impl TerminalDialogs {
    pub fn new() -> Self {
        Self {
            editor: Reedline::create(),
        }
    }

    fn read_line(&mut self, label: &str) -> Result<Option<String>> {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(label.to_owned()),
            DefaultPromptSegment::Empty,
        );
        let signal = self
            .editor
            .read_line(&prompt)
            .context("failed to read from terminal")?;
        Ok(match signal {
            Signal::Success(line) => Some(line),
            _ => None,
        })
    }

    fn choose(&mut self, message: &str, buttons: &[String]) -> Result<Option<usize>> {
        eprintln!("{message}");
        if buttons.is_empty() {
            return Ok(None);
        }
        for (index, label) in buttons.iter().enumerate() {
            eprintln!("  {}) {label}", index + 1);
        }

        loop {
            let Some(line) = self.read_line("choice")? else {
                return Ok(None);
            };
            let answer = line.trim();
            if answer.is_empty() {
                return Ok(None);
            }
            if let Some(index) = parse_choice(answer, buttons) {
                return Ok(Some(index));
            }
            eprintln!("Enter a number between 1 and {}, or leave blank to dismiss.", buttons.len());
        }
    }
}

impl Default for TerminalDialogs {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialogs for TerminalDialogs {
    fn info(&mut self, message: &str, buttons: &[String]) -> Result<Option<usize>> {
        self.choose(message, buttons)
    }

    fn warning(&mut self, message: &str, buttons: &[String]) -> Result<Option<usize>> {
        self.choose(&format!("warning: {message}"), buttons)
    }

    fn error(&mut self, message: &str) -> Result<()> {
        eprintln!("error: {message}");
        Ok(())
    }

    fn input(&mut self, prompt: &str, initial: &str) -> Result<Option<String>> {
        if initial.is_empty() {
            eprintln!("{prompt}");
        } else {
            eprintln!("{prompt} (blank keeps \"{initial}\")");
        }
        let Some(line) = self.read_line("")? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(Some(initial.to_owned()));
        }
        Ok(Some(line))
    }

    fn pick_many(&mut self, title: &str, items: &[PickItem]) -> Result<Option<Vec<usize>>> {
        eprintln!("{title}");
        for (index, item) in items.iter().enumerate() {
            let mark = if item.picked { 'x' } else { ' ' };
            eprintln!("  [{mark}] {}) {}", index + 1, item.label);
        }
        eprintln!("Numbers separated by spaces or commas; blank keeps the marks, '-' picks none.");

        loop {
            let Some(line) = self.read_line("pick")? else {
                return Ok(None);
            };
            match parse_picks(&line, items) {
                Some(picks) => return Ok(Some(picks)),
                None => eprintln!("Use numbers between 1 and {}.", items.len()),
            }
        }
    }

    fn locate_executable(&mut self, title: &str) -> Result<Option<PathBuf>> {
        eprintln!("{title}");
        let Some(line) = self.read_line("path")? else {
            return Ok(None);
        };
        let trimmed = line.trim().trim_matches('"');
        if trimmed.is_empty() {
            return Ok(None);
        }
        Ok(Some(PathBuf::from(trimmed)))
    }
}

/// Dialogs for non-interactive runs: messages are printed, prompts are dismissed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentDialogs;

impl Dialogs for SilentDialogs {
    fn info(&mut self, message: &str, _buttons: &[String]) -> Result<Option<usize>> {
        eprintln!("{message}");
        Ok(None)
    }

    fn warning(&mut self, message: &str, _buttons: &[String]) -> Result<Option<usize>> {
        eprintln!("warning: {message}");
        Ok(None)
    }

    fn error(&mut self, message: &str) -> Result<()> {
        eprintln!("error: {message}");
        Ok(())
    }

    fn input(&mut self, _prompt: &str, _initial: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn pick_many(&mut self, _title: &str, _items: &[PickItem]) -> Result<Option<Vec<usize>>> {
        Ok(None)
    }

    fn locate_executable(&mut self, _title: &str) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

/// Accept a 1-based number or a button label (case-insensitive).
fn parse_choice(answer: &str, buttons: &[String]) -> Option<usize> {
    if let Ok(number) = answer.parse::<usize>() {
        return (1..=buttons.len()).contains(&number).then(|| number - 1);
    }
    buttons
        .iter()
        .position(|label| label.eq_ignore_ascii_case(answer))
}

fn parse_picks(line: &str, items: &[PickItem]) -> Option<Vec<usize>> {
    let line = line.trim();
    if line.is_empty() {
        return Some(
            items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.picked)
                .map(|(index, _)| index)
                .collect(),
        );
    }
    if line == "-" {
        return Some(Vec::new());
    }

    let mut picks = Vec::new();
    for token in line.split([',', ' ']).filter(|token| !token.is_empty()) {
        let number: usize = token.parse().ok()?;
        if !(1..=items.len()).contains(&number) {
            return None;
        }
        if !picks.contains(&(number - 1)) {
            picks.push(number - 1);
        }
    }
    picks.sort_unstable();
    Some(picks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buttons() -> Vec<String> {
        vec!["Setup".into(), "Never show again".into(), "Not now".into()]
    }

    #[test]
    fn choice_accepts_numbers_and_labels() {
        assert_eq!(parse_choice("2", &buttons()), Some(1));
        assert_eq!(parse_choice("not now", &buttons()), Some(2));
        assert_eq!(parse_choice("0", &buttons()), None);
        assert_eq!(parse_choice("4", &buttons()), None);
        assert_eq!(parse_choice("later", &buttons()), None);
    }

    #[test]
    fn picks_default_to_current_marks() {
        let items = [PickItem::new("Enable RegexBuddy", true), PickItem::new("Enable RegexMagic", false)];
        assert_eq!(parse_picks("", &items), Some(vec![0]));
        assert_eq!(parse_picks("-", &items), Some(vec![]));
        assert_eq!(parse_picks("2, 1 2", &items), Some(vec![0, 1]));
        assert_eq!(parse_picks("3", &items), None);
        assert_eq!(parse_picks("x", &items), None);
    }

    #[test]
    fn silent_dialogs_dismiss_everything() -> Result<()> {
        let mut dialogs = SilentDialogs;
        assert_eq!(dialogs.info("hello", &buttons())?, None);
        assert_eq!(dialogs.input("regex", "")?, None);
        assert_eq!(dialogs.locate_executable("Locate RegexBuddy executable")?, None);
        Ok(())
    }
}
