//! User-facing messages with optional translated bundles.
//!
//! Bundles are flat JSON objects named `bundle.l10n.<locale>.json` mapping a
//! message key to its translation. Positional arguments are written `{0}`,
//! `{1}`, ... Any missing key or unreadable bundle falls back to English.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Every message the launcher can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Msg {
    Onboarding,
    ButtonSetup,
    ButtonNeverShowAgain,
    ButtonNotNow,
    ResetGuide,
    ButtonListProfiles,
    ButtonClose,
    ProfileList,
    ResetConfirmation,
    ButtonYesReset,
    ButtonCancel,
    ResetComplete,
    ButtonShowResetGuide,
    EnableRegexBuddy,
    EnableRegexMagic,
    DetectedSuffix,
    EnableIntegrations,
    SettingsUpdated,
    ToolDisabled,
    LocateExecutable,
    EnterRegexForBuddy,
    EnterRegexForMagic,
    LaunchFailed,
    ClipboardFailed,
    AutodetectSearching,
    AutodetectNoneFound,
    AutodetectFound,
    ButtonUpdatePath,
    ButtonSkip,
    AutodetectSummary,
    AutodetectNoUpdates,
}

impl Msg {
    pub fn key(&self) -> &'static str {
        match self {
            Msg::Onboarding => "message.onboarding",
            Msg::ButtonSetup => "button.setup",
            Msg::ButtonNeverShowAgain => "button.neverShowAgain",
            Msg::ButtonNotNow => "button.notNow",
            Msg::ResetGuide => "message.resetGuide",
            Msg::ButtonListProfiles => "button.listProfiles",
            Msg::ButtonClose => "button.close",
            Msg::ProfileList => "message.profileList",
            Msg::ResetConfirmation => "message.resetConfirmation",
            Msg::ButtonYesReset => "button.yesReset",
            Msg::ButtonCancel => "button.cancel",
            Msg::ResetComplete => "message.resetComplete",
            Msg::ButtonShowResetGuide => "button.showResetGuide",
            Msg::EnableRegexBuddy => "quickPick.enableRegexBuddy",
            Msg::EnableRegexMagic => "quickPick.enableRegexMagic",
            Msg::DetectedSuffix => "quickPick.detected",
            Msg::EnableIntegrations => "quickPick.enableIntegrations",
            Msg::SettingsUpdated => "message.settingsUpdated",
            Msg::ToolDisabled => "message.toolDisabled",
            Msg::LocateExecutable => "dialog.locateExecutable",
            Msg::EnterRegexForBuddy => "input.enterRegexForBuddy",
            Msg::EnterRegexForMagic => "input.enterRegexForMagic",
            Msg::LaunchFailed => "error.launchFailed",
            Msg::ClipboardFailed => "error.clipboardFailed",
            Msg::AutodetectSearching => "message.autodetectSearching",
            Msg::AutodetectNoneFound => "message.autodetectNoneFound",
            Msg::AutodetectFound => "message.autodetectFound",
            Msg::ButtonUpdatePath => "button.updatePath",
            Msg::ButtonSkip => "button.skipThis",
            Msg::AutodetectSummary => "message.autodetectSummary",
            Msg::AutodetectNoUpdates => "message.autodetectNoUpdates",
        }
    }

    /// English text used when no bundle provides the key.
    pub fn fallback(&self) -> &'static str {
        match self {
            Msg::Onboarding => "regex-launcher is not configured. Open setup?",
            Msg::ButtonSetup => "Setup",
            Msg::ButtonNeverShowAgain => "Never show again",
            Msg::ButtonNotNow => "Not now",
            Msg::ResetGuide => {
                "Resetting regex-launcher affects only the current profile. To reset another \
                 profile, run \"regex-launcher --profile <name> reset\", or delete that \
                 profile's file under the configuration directory. Each profile keeps its own \
                 settings file; a reset never touches other profiles."
            }
            Msg::ButtonListProfiles => "List profiles",
            Msg::ButtonClose => "Close",
            Msg::ProfileList => "Available profiles:\n{0}",
            Msg::ResetConfirmation => {
                "Are you sure you want to reset regex-launcher settings to defaults for this \
                 profile?\n\nThis will (in the current profile):\n\u{2022} Disable all \
                 integrations\n\u{2022} Clear executable paths\n\u{2022} Reset argument \
                 templates\n\u{2022} Re-enable the onboarding prompt\n\nOther profiles are not \
                 affected. This action cannot be undone."
            }
            Msg::ButtonYesReset => "Yes, Reset Everything",
            Msg::ButtonCancel => "Cancel",
            Msg::ResetComplete => {
                "All regex-launcher settings have been reset to defaults for this profile. Need \
                 help resetting other profiles?"
            }
            Msg::ButtonShowResetGuide => "Show Reset Guide",
            Msg::EnableRegexBuddy => "Enable RegexBuddy",
            Msg::EnableRegexMagic => "Enable RegexMagic",
            Msg::DetectedSuffix => "{0} (v{1} detected)",
            Msg::EnableIntegrations => "Enable integrations",
            Msg::SettingsUpdated => {
                "Settings updated. Executable paths will be prompted for as needed."
            }
            Msg::ToolDisabled => "{0} integration is disabled in settings.",
            Msg::LocateExecutable => "Locate {0} executable",
            Msg::EnterRegexForBuddy => "Enter a regex for RegexBuddy",
            Msg::EnterRegexForMagic => "Enter a regex for RegexMagic",
            Msg::LaunchFailed => "Failed to launch {0}: {1}",
            Msg::ClipboardFailed => "Could not copy text to the clipboard: {0}",
            Msg::AutodetectSearching => "Searching for RegexBuddy and RegexMagic installations...",
            Msg::AutodetectNoneFound => {
                "No RegexBuddy or RegexMagic installations found in standard \
                 locations.\n\nSearched for:\n{0}"
            }
            Msg::AutodetectFound => "Found {0} at {1}. Update the configured path?",
            Msg::ButtonUpdatePath => "Update path",
            Msg::ButtonSkip => "Skip",
            Msg::AutodetectSummary => "Updated {1} path setting(s):\n{0}",
            Msg::AutodetectNoUpdates => "Auto-detection complete. No path settings were updated.",
        }
    }
}

/// Message catalog for one locale.
#[derive(Debug, Clone, Default)]
pub struct Messages {
    translations: HashMap<String, String>,
}

impl Messages {
    /// English only.
    pub fn english() -> Self {
        Self::default()
    }

    /// Build from an in-memory key/translation table.
    pub fn from_translations(translations: HashMap<String, String>) -> Self {
        Self { translations }
    }

    /// Load the bundle for `locale` from `dir`, falling back to English on any problem.
    pub fn load(dir: &Path, locale: Option<&str>) -> Self {
        let Some(locale) = locale.filter(|locale| *locale != "en") else {
            return Self::english();
        };

        let path = dir.join(format!("bundle.l10n.{locale}.json"));
        if !path.exists() {
            debug!(locale, path = %path.display(), "no message bundle for locale");
            return Self::english();
        }

        match read_bundle(&path) {
            Ok(translations) => Self { translations },
            Err(err) => {
                warn!(error = %format!("{err:#}"), "message bundle unusable, using English");
                Self::english()
            }
        }
    }

    /// Render `msg` with positional `args`.
    pub fn t(&self, msg: Msg, args: &[&str]) -> String {
        let template = match self.translations.get(msg.key()) {
            Some(translated) => translated.as_str(),
            None => {
                if !self.translations.is_empty() {
                    warn!(key = msg.key(), "missing translation, using English");
                }
                msg.fallback()
            }
        };
        format_positional(template, args)
    }
}

fn read_bundle(path: &Path) -> Result<HashMap<String, String>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read message bundle {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("invalid message bundle {}", path.display()))
}

/// Locale from `REGEX_LAUNCHER_LOCALE`, else the language part of `LANG`.
pub fn detect_locale() -> Option<String> {
    env::var("REGEX_LAUNCHER_LOCALE")
        .ok()
        .or_else(|| env::var("LANG").ok())
        .as_deref()
        .and_then(normalize_locale)
}

fn normalize_locale(raw: &str) -> Option<String> {
    let language = raw
        .split(['.', '_', '@'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match language.as_str() {
        "" | "c" | "posix" => None,
        _ => Some(language),
    }
}

/// Replace `{N}` with `args[N]`; unknown indices are left untouched.
fn format_positional(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let digits = tail.len() - tail.trim_start_matches(|ch: char| ch.is_ascii_digit()).len();
        let argument = tail[..digits]
            .parse::<usize>()
            .ok()
            .filter(|_| tail[digits..].starts_with('}'))
            .and_then(|index| args.get(index));
        match argument {
            Some(value) => {
                out.push_str(value);
                rest = &tail[digits + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}
