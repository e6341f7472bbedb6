//! The set of host capabilities every command runs against.

use crate::infra::clipboard::ClipboardSink;
use crate::infra::config::{ConfigLocation, SettingsStore};
use crate::infra::l10n::{Messages, Msg};
use crate::infra::probe::PathProbe;
use crate::infra::process::ProcessLauncher;
use crate::ui::dialogs::Dialogs;

/// Injected host services. Commands never reach for globals.
pub struct Host<'a> {
    pub settings: &'a dyn SettingsStore,
    pub dialogs: &'a mut dyn Dialogs,
    pub clipboard: &'a mut dyn ClipboardSink,
    pub launcher: &'a dyn ProcessLauncher,
    pub probe: &'a dyn PathProbe,
    pub messages: &'a Messages,
    /// Profile directory, used to list profiles from the reset guide.
    pub location: Option<&'a ConfigLocation>,
    /// Caller name given on the command line; wins over settings.
    pub app_name: Option<String>,
}

impl Host<'_> {
    pub fn t(&self, msg: Msg, args: &[&str]) -> String {
        self.messages.t(msg, args)
    }

    pub fn buttons(&self, labels: &[Msg]) -> Vec<String> {
        labels.iter().map(|msg| self.t(*msg, &[])).collect()
    }

    /// Show an informational message without buttons.
    pub fn notify(&mut self, message: &str) -> anyhow::Result<()> {
        self.dialogs.info(message, &[])?;
        Ok(())
    }
}
