//! Command-line surface: argument parsing and command dispatch.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::debug;

use crate::app::context::{ActiveEditor, DocumentEditor};
use crate::app::host::Host;
use crate::app::launch::{LaunchCommand, LaunchOutcome, launch};
use crate::app::reset::{reset_all_settings, show_reset_guide};
use crate::app::setup::{autodetect_paths, show_onboarding_if_needed, show_setup};
use crate::domain::errors::LaunchError;
use crate::domain::model::Position;
use crate::infra::clipboard::SystemClipboard;
use crate::infra::config::{ConfigLocation, EnvOverrides, FileSettingsStore};
use crate::infra::l10n::{Messages, detect_locale};
use crate::infra::probe::FsProbe;
use crate::infra::process::DetachedSpawner;
use crate::ui::dialogs::{Dialogs, SilentDialogs, TerminalDialogs};

#[derive(Debug, Parser)]
#[command(
    name = "regex-launcher",
    author,
    version,
    about = "Launch RegexBuddy and RegexMagic with your editor's selection"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings profile to read and write
    #[arg(long, global = true, env = "REGEX_LAUNCHER_PROFILE")]
    pub profile: Option<String>,

    /// Directory holding profiles and message bundles
    #[arg(long, global = true, env = "REGEX_LAUNCHER_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Settings file to use instead of the profile file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Name passed to the tool with -appname
    #[arg(long, global = true)]
    pub app_name: Option<String>,

    /// Never prompt; print messages and dismiss every question
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Edit a regex in RegexBuddy
    Buddy(EditorArgs),
    /// Send the selection to RegexBuddy as sample text
    BuddySample(EditorArgs),
    /// Build a regex in RegexMagic
    Magic(EditorArgs),
    /// Choose which integrations are enabled
    Setup,
    /// Look for RegexBuddy and RegexMagic in their default install locations
    Autodetect,
    /// Reset all settings of the current profile
    Reset,
    /// Explain how resetting works across profiles
    ResetGuide,
    /// Show the first-run prompt
    Onboarding,
    /// List settings profiles
    Profiles,
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// The active editor, as described by the calling editor.
#[derive(Debug, Clone, Args)]
pub struct EditorArgs {
    /// Document open in the editor
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Cursor position as LINE[:COLUMN], 1-based
    #[arg(long, value_parser = parse_position, requires = "file")]
    pub cursor: Option<Position>,

    /// Other end of the selection as LINE[:COLUMN]; defaults to the cursor
    #[arg(long, value_parser = parse_position, requires = "file")]
    pub anchor: Option<Position>,
}

impl EditorArgs {
    fn open(&self) -> Result<Option<DocumentEditor>> {
        let Some(file) = &self.file else {
            return Ok(None);
        };
        let cursor = self.cursor.unwrap_or_default();
        let anchor = self.anchor.unwrap_or(cursor);
        Ok(Some(DocumentEditor::open(file)?.with_selection(anchor, cursor)))
    }
}

/// Parse `LINE` or `LINE:COLUMN` (1-based) into a zero-based [`Position`].
pub fn parse_position(raw: &str) -> Result<Position, LaunchError> {
    let invalid = || LaunchError::InvalidPosition(raw.to_owned());
    let (line, column) = match raw.split_once(':') {
        Some((line, column)) => (line, column),
        None => (raw, "1"),
    };
    let line: u32 = line.trim().parse().map_err(|_| invalid())?;
    let column: u32 = column.trim().parse().map_err(|_| invalid())?;
    if line == 0 || column == 0 {
        return Err(invalid());
    }
    Ok(Position::new(line - 1, column - 1))
}

/// Execute the parsed command line.
pub fn run(cli: Cli) -> Result<ExitCode> {
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "regex-launcher", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let location = match &cli.config_dir {
        Some(dir) => ConfigLocation::at(dir),
        None => ConfigLocation::user()?,
    };
    let settings_path = match &cli.config {
        Some(path) => path.clone(),
        None => location.profile_path(cli.profile.as_deref())?,
    };
    debug!(path = %settings_path.display(), "using settings file");

    if let Commands::Profiles = cli.command {
        let current = cli.profile.as_deref().unwrap_or(crate::infra::config::DEFAULT_PROFILE);
        for name in location.profiles()? {
            let marker = if name == current { '*' } else { ' ' };
            println!("{marker} {name}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let store = FileSettingsStore::new(settings_path, EnvOverrides::from_env());
    let messages = Messages::load(&location.l10n_dir(), detect_locale().as_deref());
    let interactive = !cli.non_interactive && io::stdin().is_terminal();
    let mut dialogs: Box<dyn Dialogs> = if interactive {
        Box::new(TerminalDialogs::new())
    } else {
        Box::new(SilentDialogs)
    };
    let mut clipboard = SystemClipboard::new();

    let mut host = Host {
        settings: &store,
        dialogs: &mut *dialogs,
        clipboard: &mut clipboard,
        launcher: &DetachedSpawner,
        probe: &FsProbe,
        messages: &messages,
        location: Some(&location),
        app_name: cli.app_name.clone(),
    };

    let (command, editor_args) = match &cli.command {
        Commands::Buddy(args) => (LaunchCommand::RegexBuddy, args),
        Commands::BuddySample(args) => (LaunchCommand::RegexBuddySample, args),
        Commands::Magic(args) => (LaunchCommand::RegexMagic, args),
        Commands::Setup => {
            show_setup(&mut host)?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Autodetect => {
            autodetect_paths(&mut host)?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Reset => {
            reset_all_settings(&mut host)?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::ResetGuide => {
            show_reset_guide(&mut host)?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Onboarding => {
            show_onboarding_if_needed(&mut host)?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Profiles | Commands::Completions { .. } => return Ok(ExitCode::SUCCESS),
    };

    let editor = editor_args.open()?;
    if interactive {
        show_onboarding_if_needed(&mut host)?;
    }

    let outcome = launch(
        &mut host,
        command,
        editor.as_ref().map(|editor| editor as &dyn ActiveEditor),
    )?;
    Ok(match outcome {
        LaunchOutcome::Failed { .. } => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_based_on_the_command_line() {
        assert_eq!(parse_position("4:19").unwrap(), Position::new(3, 18));
        assert_eq!(parse_position("12").unwrap(), Position::new(11, 0));
        assert!(parse_position("0:1").is_err());
        assert!(parse_position("3:0").is_err());
        assert!(parse_position("x:1").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn editor_flags_parse() {
        let cli = Cli::try_parse_from([
            "regex-launcher",
            "buddy",
            "--file",
            "notes.txt",
            "--cursor",
            "2:5",
            "--anchor",
            "1",
        ])
        .unwrap();
        let Commands::Buddy(args) = cli.command else {
            panic!("expected buddy command");
        };
        assert_eq!(args.cursor, Some(Position::new(1, 4)));
        assert_eq!(args.anchor, Some(Position::new(0, 0)));
    }

    #[test]
    fn cursor_requires_a_file() {
        assert!(Cli::try_parse_from(["regex-launcher", "magic", "--cursor", "1:1"]).is_err());
    }
}
