//! Configuration management utilities.
//!
//! Settings are resolved from three layers: the embedded defaults, the
//! profile file, and environment overrides. Only the profile file is ever
//! written; removing a key from it reverts that key to its default.

use std::cell::RefCell;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::domain::model::{LaunchMode, Tool};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));

const APP_DIR: &str = "regex-launcher";
const CONFIG_FILE: &str = "config.toml";
const PROFILES_DIR: &str = "profiles";
pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_APP_NAME: &str = "Visual Studio Code";

const BUDDY_PRE_ARGS: [&str; 2] = ["-getfromclipboard", "-putonclipboard"];
const SAMPLE_PRE_ARGS: [&str; 2] = ["-sampleclipboard", "-putonclipboard"];

/// One layer of launcher settings. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Onboarding::is_empty")]
    pub onboarding: Onboarding,
    #[serde(default, skip_serializing_if = "HostSettings::is_empty")]
    pub host: HostSettings,
    #[serde(default, skip_serializing_if = "ToolSettings::is_empty")]
    pub regex_buddy: ToolSettings,
    #[serde(default, skip_serializing_if = "ToolSettings::is_empty")]
    pub regex_magic: ToolSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Onboarding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_on_startup: Option<bool>,
}

impl Onboarding {
    fn is_empty(&self) -> bool {
        self.show_on_startup.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HostSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

impl HostSettings {
    fn is_empty(&self) -> bool {
        self.app_name.is_none()
    }
}

/// Pre-arguments and argument template for an alternate launch mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TemplateSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}

impl TemplateSettings {
    fn is_empty(&self) -> bool {
        self.pre_args.is_none() && self.args.is_none()
    }

    fn merge(mut self, overlay: Self) -> Self {
        if overlay.pre_args.is_some() {
            self.pre_args = overlay.pre_args;
        }
        if overlay.args.is_some() {
            self.args = overlay.args;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ToolSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    /// Sample-text mode. Only RegexBuddy reads it.
    #[serde(default, skip_serializing_if = "TemplateSettings::is_empty")]
    pub sample: TemplateSettings,
}

impl ToolSettings {
    fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.path.is_none()
            && self.pre_args.is_none()
            && self.args.is_none()
            && self.sample.is_empty()
    }

    fn merge(self, overlay: Self) -> Self {
        Self {
            enabled: overlay.enabled.or(self.enabled),
            path: overlay.path.or(self.path),
            pre_args: overlay.pre_args.or(self.pre_args),
            args: overlay.args.or(self.args),
            sample: self.sample.merge(overlay.sample),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    /// Configured executable, ignoring blank entries.
    pub fn path(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// Pre-arguments and template resolved for a concrete launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTemplate {
    pub pre_args: Vec<String>,
    pub args: Vec<String>,
}

impl Settings {
    pub fn tool(&self, tool: Tool) -> &ToolSettings {
        match tool {
            Tool::RegexBuddy => &self.regex_buddy,
            Tool::RegexMagic => &self.regex_magic,
        }
    }

    pub fn tool_mut(&mut self, tool: Tool) -> &mut ToolSettings {
        match tool {
            Tool::RegexBuddy => &mut self.regex_buddy,
            Tool::RegexMagic => &mut self.regex_magic,
        }
    }

    pub fn show_onboarding(&self) -> bool {
        self.onboarding.show_on_startup.unwrap_or(true)
    }

    pub fn app_name(&self) -> String {
        self.host
            .app_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_owned())
    }

    /// Templates for `tool` in `mode`, falling back to built-in defaults per list.
    pub fn launch_template(&self, tool: Tool, mode: LaunchMode) -> LaunchTemplate {
        let settings = self.tool(tool);
        let (pre_args, args, default_pre_args) = match (tool, mode) {
            (Tool::RegexBuddy, LaunchMode::Regex) => {
                (&settings.pre_args, &settings.args, &BUDDY_PRE_ARGS)
            }
            (Tool::RegexBuddy, LaunchMode::Sample) => {
                (&settings.sample.pre_args, &settings.sample.args, &SAMPLE_PRE_ARGS)
            }
            (Tool::RegexMagic, _) => (&settings.pre_args, &settings.args, &SAMPLE_PRE_ARGS),
        };

        LaunchTemplate {
            pre_args: pre_args
                .clone()
                .unwrap_or_else(|| default_pre_args.iter().map(|arg| arg.to_string()).collect()),
            args: args.clone().unwrap_or_default(),
        }
    }

    /// Clear every stored tool key and re-enable onboarding.
    pub fn reset(&mut self) {
        self.regex_buddy = ToolSettings::default();
        self.regex_magic = ToolSettings::default();
        self.onboarding.show_on_startup = Some(true);
    }

    /// Layer `overlay` on top of `self`; keys present in `overlay` win.
    pub fn merge(self, overlay: Self) -> Self {
        Self {
            onboarding: Onboarding {
                show_on_startup: overlay
                    .onboarding
                    .show_on_startup
                    .or(self.onboarding.show_on_startup),
            },
            host: HostSettings {
                app_name: overlay.host.app_name.or(self.host.app_name),
            },
            regex_buddy: self.regex_buddy.merge(overlay.regex_buddy),
            regex_magic: self.regex_magic.merge(overlay.regex_magic),
        }
    }

    /// Embedded defaults layer.
    pub fn defaults() -> Result<Self> {
        Self::from_str(&DEFAULT_CONFIG).context("invalid built-in default configuration")
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(settings)
    }
}

/// Environment overrides that apply on read and are never persisted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvOverrides {
    buddy_path: Option<PathBuf>,
    magic_path: Option<PathBuf>,
    app_name: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            buddy_path: env::var_os("REGEX_LAUNCHER_BUDDY_PATH").map(PathBuf::from),
            magic_path: env::var_os("REGEX_LAUNCHER_MAGIC_PATH").map(PathBuf::from),
            app_name: env::var("REGEX_LAUNCHER_APP_NAME").ok(),
        }
    }

    /// No overrides at all.
    pub fn none() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn for_tests(buddy_path: &str, app_name: &str) -> Self {
        Self {
            buddy_path: Some(PathBuf::from(buddy_path)),
            magic_path: None,
            app_name: Some(app_name.to_owned()),
        }
    }

    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(path) = &self.buddy_path {
            settings.regex_buddy.path = Some(path.clone());
        }
        if let Some(path) = &self.magic_path {
            settings.regex_magic.path = Some(path.clone());
        }
        if let Some(name) = &self.app_name {
            settings.host.app_name = Some(name.clone());
        }
        settings
    }
}

/// Persistent key-value store behind the launcher settings.
pub trait SettingsStore {
    /// Effective settings: defaults, then the stored layer, then overrides.
    fn load(&self) -> Result<Settings>;

    /// The writable layer only.
    fn stored(&self) -> Result<Settings>;

    /// Replace the writable layer.
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// Read-modify-write of the writable layer.
pub fn update_settings(
    store: &dyn SettingsStore,
    change: impl FnOnce(&mut Settings),
) -> Result<()> {
    let mut stored = store.stored()?;
    change(&mut stored);
    store.save(&stored)
}

/// Settings persisted as a TOML file for one profile.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
    env: EnvOverrides,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>, env: EnvOverrides) -> Self {
        Self {
            path: path.into(),
            env,
        }
    }

    /// Location of the profile file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Settings> {
        let merged = Settings::defaults()?.merge(self.stored()?);
        Ok(self.env.apply(merged))
    }

    fn stored(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        Settings::from_file(&self.path)
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;

        let data = toml::to_string_pretty(settings).context("failed to serialize settings")?;
        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        temp.write_all(data.as_bytes())
            .context("failed to write settings")?;
        temp.persist(&self.path)
            .with_context(|| format!("failed to write config file to {}", self.path.display()))?;

        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// Settings held in memory, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    stored: RefCell<Settings>,
    env: EnvOverrides,
}

impl MemorySettingsStore {
    pub fn new(stored: Settings) -> Self {
        Self {
            stored: RefCell::new(stored),
            env: EnvOverrides::none(),
        }
    }

    pub fn with_overrides(mut self, env: EnvOverrides) -> Self {
        self.env = env;
        self
    }

    /// Copy of the writable layer.
    pub fn snapshot(&self) -> Settings {
        self.stored.borrow().clone()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Settings> {
        let merged = Settings::defaults()?.merge(self.snapshot());
        Ok(self.env.apply(merged))
    }

    fn stored(&self) -> Result<Settings> {
        Ok(self.snapshot())
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        *self.stored.borrow_mut() = settings.clone();
        Ok(())
    }
}

/// Where profile files live.
#[derive(Debug, Clone)]
pub struct ConfigLocation {
    root: PathBuf,
}

impl ConfigLocation {
    /// Per-user configuration directory for the launcher.
    pub fn user() -> Result<Self> {
        let base = config_dir().context("unable to determine the user configuration directory")?;
        Ok(Self::at(base.join(APP_DIR)))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding localization bundles.
    pub fn l10n_dir(&self) -> PathBuf {
        self.root.join("l10n")
    }

    /// File backing `profile`; `None` selects the default profile.
    pub fn profile_path(&self, profile: Option<&str>) -> Result<PathBuf> {
        match profile {
            None | Some(DEFAULT_PROFILE) => Ok(self.root.join(CONFIG_FILE)),
            Some(name) => {
                validate_profile_name(name)?;
                Ok(self.root.join(PROFILES_DIR).join(format!("{name}.toml")))
            }
        }
    }

    /// Names of all profiles with a settings file, default first.
    pub fn profiles(&self) -> Result<Vec<String>> {
        let mut names = vec![DEFAULT_PROFILE.to_owned()];
        let dir = self.root.join(PROFILES_DIR);
        if !dir.exists() {
            return Ok(names);
        }

        let mut found: Vec<String> = fs::read_dir(&dir)
            .with_context(|| format!("failed to list profiles in {}", dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
            .filter(|name| name != DEFAULT_PROFILE)
            .collect();
        found.sort();
        debug!(count = found.len(), "profiles discovered");
        names.extend(found);
        Ok(names)
    }
}

fn validate_profile_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if !valid {
        bail!("invalid profile name '{name}': use letters, digits, '-' or '_'");
    }
    Ok(())
}
