//! Onboarding, integration setup, and executable auto-detection.

use anyhow::Result;
use tracing::info;

use crate::app::host::Host;
use crate::domain::model::Tool;
use crate::infra::config::update_settings;
use crate::infra::l10n::Msg;
use crate::infra::probe::{DetectedInstall, KNOWN_INSTALLS, detect_installs};
use crate::ui::dialogs::PickItem;

/// Offer setup when onboarding has not been dismissed yet.
pub fn show_onboarding_if_needed(host: &mut Host<'_>) -> Result<()> {
    if !host.settings.load()?.show_onboarding() {
        return Ok(());
    }

    let message = host.t(Msg::Onboarding, &[]);
    let buttons = host.buttons(&[Msg::ButtonSetup, Msg::ButtonNeverShowAgain, Msg::ButtonNotNow]);
    match host.dialogs.info(&message, &buttons)? {
        Some(0) => {
            show_setup(host)?;
            hide_onboarding(host)?;
        }
        Some(1) => hide_onboarding(host)?,
        _ => {}
    }
    Ok(())
}

fn hide_onboarding(host: &Host<'_>) -> Result<()> {
    update_settings(host.settings, |stored| {
        stored.onboarding.show_on_startup = Some(false);
    })
}

/// Let the user pick which integrations are enabled. Returns whether settings changed.
pub fn show_setup(host: &mut Host<'_>) -> Result<bool> {
    let detected = detect_installs(host.probe);
    let settings = host.settings.load()?;

    let items: Vec<PickItem> = Tool::ALL
        .iter()
        .map(|tool| {
            let base = host.t(enable_label(*tool), &[]);
            let label = match find(&detected, *tool) {
                Some(found) => host.t(Msg::DetectedSuffix, &[base.as_str(), found.version]),
                None => base,
            };
            PickItem::new(label, settings.tool(*tool).enabled())
        })
        .collect();

    let title = host.t(Msg::EnableIntegrations, &[]);
    let Some(picked) = host.dialogs.pick_many(&title, &items)? else {
        return Ok(false);
    };

    update_settings(host.settings, |stored| {
        for (index, tool) in Tool::ALL.iter().enumerate() {
            let enable = picked.contains(&index);
            let entry = stored.tool_mut(*tool);
            entry.enabled = Some(enable);
            if enable && let Some(found) = find(&detected, *tool) {
                entry.path = Some(found.path.clone());
            }
        }
        stored.onboarding.show_on_startup = Some(false);
    })?;
    info!(?picked, "integrations updated");

    let message = host.t(Msg::SettingsUpdated, &[]);
    host.notify(&message)?;
    Ok(true)
}

/// Look for installs at the well-known locations and offer to store their paths.
/// Returns how many paths were updated.
pub fn autodetect_paths(host: &mut Host<'_>) -> Result<usize> {
    let searching = host.t(Msg::AutodetectSearching, &[]);
    host.notify(&searching)?;

    let detected = detect_installs(host.probe);
    if detected.is_empty() {
        let searched = KNOWN_INSTALLS
            .iter()
            .map(|known| format!("\u{2022} {} {}: {}", known.tool, known.version, known.path))
            .collect::<Vec<_>>()
            .join("\n");
        let message = host.t(Msg::AutodetectNoneFound, &[searched.as_str()]);
        host.notify(&message)?;
        return Ok(0);
    }

    let settings = host.settings.load()?;
    let buttons = host.buttons(&[Msg::ButtonUpdatePath, Msg::ButtonSkip]);
    let mut summary = Vec::new();

    for found in &detected {
        if settings.tool(found.tool).path() == Some(found.path.as_path()) {
            continue;
        }

        let label = found.label();
        let path = found.path.display().to_string();
        let message = host.t(Msg::AutodetectFound, &[label.as_str(), path.as_str()]);
        if host.dialogs.info(&message, &buttons)? == Some(0) {
            update_settings(host.settings, |stored| {
                stored.tool_mut(found.tool).path = Some(found.path.clone());
            })?;
            info!(tool = %found.tool, %path, "detected path stored");
            summary.push(format!("{label}: {path}"));
        }
    }

    let message = if summary.is_empty() {
        host.t(Msg::AutodetectNoUpdates, &[])
    } else {
        let count = summary.len().to_string();
        let lines = summary.join("\n");
        host.t(Msg::AutodetectSummary, &[lines.as_str(), count.as_str()])
    };
    host.notify(&message)?;
    Ok(summary.len())
}

fn enable_label(tool: Tool) -> Msg {
    match tool {
        Tool::RegexBuddy => Msg::EnableRegexBuddy,
        Tool::RegexMagic => Msg::EnableRegexMagic,
    }
}

fn find(detected: &[DetectedInstall], tool: Tool) -> Option<&DetectedInstall> {
    detected.iter().find(|found| found.tool == tool)
}
