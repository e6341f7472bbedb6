//! Launching the external tools.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::app::context::{ActiveEditor, extract_context};
use crate::app::host::Host;
use crate::domain::errors::LaunchError;
use crate::domain::model::{ContextSnapshot, LaunchMode, Tool};
use crate::domain::template::substitute_args;
use crate::infra::config::update_settings;
use crate::infra::l10n::Msg;

/// Flag pair that tells the tool who launched it.
pub const APP_NAME_FLAG: &str = "-appname";

/// The three launch commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchCommand {
    RegexBuddy,
    RegexBuddySample,
    RegexMagic,
}

impl LaunchCommand {
    pub fn tool(&self) -> Tool {
        match self {
            LaunchCommand::RegexBuddy | LaunchCommand::RegexBuddySample => Tool::RegexBuddy,
            LaunchCommand::RegexMagic => Tool::RegexMagic,
        }
    }

    pub fn mode(&self) -> LaunchMode {
        match self {
            LaunchCommand::RegexBuddySample => LaunchMode::Sample,
            _ => LaunchMode::Regex,
        }
    }

    /// Name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            LaunchCommand::RegexBuddy => "RegexBuddy",
            LaunchCommand::RegexBuddySample => "RegexBuddy (Sample)",
            LaunchCommand::RegexMagic => "RegexMagic",
        }
    }

    fn regex_prompt(&self) -> Msg {
        match self.tool() {
            Tool::RegexBuddy => Msg::EnterRegexForBuddy,
            Tool::RegexMagic => Msg::EnterRegexForMagic,
        }
    }
}

/// How a launch command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The integration is switched off in settings.
    Disabled,
    /// No executable was configured and the user dismissed the file dialog.
    Cancelled,
    Launched { program: PathBuf, args: Vec<String> },
    /// Spawning failed; the reason was shown to the user.
    Failed { reason: String },
}

/// `[...pre_args, "-appname", app_name, ...substituted template]`
pub fn build_argv(
    pre_args: &[String],
    app_name: &str,
    template: &[String],
    ctx: &ContextSnapshot,
) -> Vec<String> {
    let mut argv = Vec::with_capacity(pre_args.len() + 2 + template.len());
    argv.extend_from_slice(pre_args);
    argv.push(APP_NAME_FLAG.to_owned());
    argv.push(app_name.to_owned());
    argv.extend(substitute_args(template, ctx));
    argv
}

/// Run one launch command against the active editor.
pub fn launch(
    host: &mut Host<'_>,
    command: LaunchCommand,
    editor: Option<&dyn ActiveEditor>,
) -> Result<LaunchOutcome> {
    let tool = command.tool();
    let settings = host.settings.load()?;
    if !settings.tool(tool).enabled() {
        let message = host.t(Msg::ToolDisabled, &[tool.display_name()]);
        host.notify(&message)?;
        return Ok(LaunchOutcome::Disabled);
    }

    let Some(program) = ensure_executable_path(host, tool)? else {
        debug!(%tool, "no executable chosen");
        return Ok(LaunchOutcome::Cancelled);
    };

    let template = settings.launch_template(tool, command.mode());
    let editor_ctx = extract_context(editor);

    let (ctx, clipboard_text) = match command.mode() {
        LaunchMode::Regex => {
            let regex = match editor_ctx.non_empty_selection() {
                Some(selection) => Some(selection.to_owned()),
                None => {
                    let prompt = host.t(command.regex_prompt(), &[]);
                    host.dialogs.input(&prompt, "")?
                }
            };
            let clipboard_text = regex.clone();
            (editor_ctx.with_regex(regex), clipboard_text)
        }
        LaunchMode::Sample => {
            let sample = editor_ctx
                .non_empty_selection()
                .unwrap_or_default()
                .to_owned();
            (editor_ctx.with_regex(None), Some(sample))
        }
    };

    if let Some(text) = clipboard_text {
        if let Err(err) = host.clipboard.write_text(&text) {
            warn!(error = %format!("{err:#}"), "clipboard write failed");
            let detail = format!("{err:#}");
            let message = host.t(Msg::ClipboardFailed, &[detail.as_str()]);
            host.dialogs.error(&message)?;
        }
    }

    let app_name = host.app_name.clone().unwrap_or_else(|| settings.app_name());
    let args = build_argv(&template.pre_args, &app_name, &template.args, &ctx);
    debug!(program = %program.display(), ?args, "launch request");

    match host.launcher.launch(&program, &args) {
        Ok(()) => {
            info!(command = command.display_name(), "tool launched");
            Ok(LaunchOutcome::Launched { program, args })
        }
        Err(err) => {
            let reason = match &err {
                LaunchError::Spawn { source, .. } => source.to_string(),
                other => other.to_string(),
            };
            error!(command = command.display_name(), %reason, "launch failed");
            let message = host.t(Msg::LaunchFailed, &[command.display_name(), reason.as_str()]);
            host.dialogs.error(&message)?;
            Ok(LaunchOutcome::Failed { reason })
        }
    }
}

/// Configured executable if it exists, otherwise ask for one and remember it.
pub fn ensure_executable_path(host: &mut Host<'_>, tool: Tool) -> Result<Option<PathBuf>> {
    let settings = host.settings.load()?;
    if let Some(path) = settings.tool(tool).path()
        && host.probe.exists(path)
    {
        return Ok(Some(path.to_path_buf()));
    }

    let title = host.t(Msg::LocateExecutable, &[tool.display_name()]);
    let Some(chosen) = host.dialogs.locate_executable(&title)? else {
        return Ok(None);
    };

    update_settings(host.settings, |stored| {
        stored.tool_mut(tool).path = Some(chosen.clone());
    })?;
    info!(%tool, path = %chosen.display(), "executable path stored");
    Ok(Some(chosen))
}
