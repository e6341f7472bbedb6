#![allow(dead_code)]

use std::path::PathBuf;

use regex_launcher::app::host::Host;
use regex_launcher::infra::clipboard::RecordingClipboard;
use regex_launcher::infra::config::{ConfigLocation, MemorySettingsStore, Settings};
use regex_launcher::infra::l10n::Messages;
use regex_launcher::infra::probe::FixedProbe;
use regex_launcher::infra::process::RecordingLauncher;
use regex_launcher::ui::scripted::{Answer, ScriptedDialogs};

pub const BUDDY_EXE: &str = r"C:\Tools\RegexBuddy5.exe";
pub const MAGIC_EXE: &str = r"C:\Tools\RegexMagic2.exe";

/// Every host service replaced by a recording stub.
pub struct Fixture {
    pub store: MemorySettingsStore,
    pub dialogs: ScriptedDialogs,
    pub clipboard: RecordingClipboard,
    pub launcher: RecordingLauncher,
    pub probe: FixedProbe,
    pub messages: Messages,
    pub location: Option<ConfigLocation>,
    pub app_name: Option<String>,
}

impl Fixture {
    pub fn new(stored: Settings) -> Self {
        Self {
            store: MemorySettingsStore::new(stored),
            dialogs: ScriptedDialogs::default(),
            clipboard: RecordingClipboard::default(),
            launcher: RecordingLauncher::new(),
            probe: FixedProbe::default(),
            messages: Messages::english(),
            location: None,
            app_name: None,
        }
    }

    /// Both tools enabled with executables that exist.
    pub fn configured() -> Self {
        let mut stored = Settings::default();
        stored.regex_buddy.enabled = Some(true);
        stored.regex_buddy.path = Some(PathBuf::from(BUDDY_EXE));
        stored.regex_magic.enabled = Some(true);
        stored.regex_magic.path = Some(PathBuf::from(MAGIC_EXE));

        let mut fixture = Self::new(stored);
        fixture.probe = FixedProbe::new([BUDDY_EXE, MAGIC_EXE]);
        fixture
    }

    pub fn answers(mut self, answers: impl IntoIterator<Item = Answer>) -> Self {
        self.dialogs = ScriptedDialogs::new(answers);
        self
    }

    pub fn host(&mut self) -> Host<'_> {
        Host {
            settings: &self.store,
            dialogs: &mut self.dialogs,
            clipboard: &mut self.clipboard,
            launcher: &self.launcher,
            probe: &self.probe,
            messages: &self.messages,
            location: self.location.as_ref(),
            app_name: self.app_name.clone(),
        }
    }
}
