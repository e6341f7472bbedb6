//! Pre-recorded dialog answers for tests and automation.

use std::collections::VecDeque;
use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::ui::dialogs::{Dialogs, PickItem};

/// Scripted response to the next prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Click the button with this label.
    Choose(String),
    /// Close the prompt without answering.
    Dismiss,
    /// Submit text in an input box.
    Text(String),
    /// Pick these indices in a pick list.
    Pick(Vec<usize>),
    /// Choose this file in a file dialog.
    File(PathBuf),
}

impl Answer {
    pub fn choose(label: impl Into<String>) -> Self {
        Answer::Choose(label.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Warning,
    Error,
    Input,
    PickMany,
    LocateExecutable,
}

/// A prompt that was shown, with its buttons or items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shown {
    pub kind: DialogKind,
    pub message: String,
    pub options: Vec<String>,
}

/// Answers prompts from a queue and records everything shown.
///
/// Once the queue runs dry every further prompt is dismissed.
#[derive(Debug, Default)]
pub struct ScriptedDialogs {
    answers: VecDeque<Answer>,
    shown: Vec<Shown>,
}

impl ScriptedDialogs {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            shown: Vec::new(),
        }
    }

    pub fn shown(&self) -> &[Shown] {
        &self.shown
    }

    /// Messages of the given kind, in order.
    pub fn messages(&self, kind: DialogKind) -> Vec<&str> {
        self.shown
            .iter()
            .filter(|shown| shown.kind == kind)
            .map(|shown| shown.message.as_str())
            .collect()
    }

    /// Answers that were never consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn record(&mut self, kind: DialogKind, message: &str, options: Vec<String>) -> Answer {
        self.shown.push(Shown {
            kind,
            message: message.to_owned(),
            options,
        });
        self.answers.pop_front().unwrap_or(Answer::Dismiss)
    }

    fn button(&mut self, kind: DialogKind, message: &str, buttons: &[String]) -> Result<Option<usize>> {
        match self.record(kind, message, buttons.to_vec()) {
            Answer::Dismiss => Ok(None),
            Answer::Choose(label) => match buttons.iter().position(|button| *button == label) {
                Some(index) => Ok(Some(index)),
                None => bail!("scripted button '{label}' not offered for: {message}"),
            },
            other => bail!("scripted answer {other:?} does not fit a {kind:?} prompt"),
        }
    }
}

impl Dialogs for ScriptedDialogs {
    fn info(&mut self, message: &str, buttons: &[String]) -> Result<Option<usize>> {
        if buttons.is_empty() {
            self.shown.push(Shown {
                kind: DialogKind::Info,
                message: message.to_owned(),
                options: Vec::new(),
            });
            return Ok(None);
        }
        self.button(DialogKind::Info, message, buttons)
    }

    fn warning(&mut self, message: &str, buttons: &[String]) -> Result<Option<usize>> {
        self.button(DialogKind::Warning, message, buttons)
    }

    fn error(&mut self, message: &str) -> Result<()> {
        self.shown.push(Shown {
            kind: DialogKind::Error,
            message: message.to_owned(),
            options: Vec::new(),
        });
        Ok(())
    }

    fn input(&mut self, prompt: &str, _initial: &str) -> Result<Option<String>> {
        match self.record(DialogKind::Input, prompt, Vec::new()) {
            Answer::Dismiss => Ok(None),
            Answer::Text(text) => Ok(Some(text)),
            other => bail!("scripted answer {other:?} does not fit an input prompt"),
        }
    }

    fn pick_many(&mut self, title: &str, items: &[PickItem]) -> Result<Option<Vec<usize>>> {
        let labels = items.iter().map(|item| item.label.clone()).collect();
        match self.record(DialogKind::PickMany, title, labels) {
            Answer::Dismiss => Ok(None),
            Answer::Pick(picks) => Ok(Some(picks)),
            other => bail!("scripted answer {other:?} does not fit a pick list"),
        }
    }

    fn locate_executable(&mut self, title: &str) -> Result<Option<PathBuf>> {
        match self.record(DialogKind::LocateExecutable, title, Vec::new()) {
            Answer::Dismiss => Ok(None),
            Answer::File(path) => Ok(Some(path)),
            other => bail!("scripted answer {other:?} does not fit a file dialog"),
        }
    }
}
