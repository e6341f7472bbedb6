//! Resetting the current profile.

use anyhow::Result;
use tracing::info;

use crate::app::host::Host;
use crate::infra::config::{Settings, update_settings};
use crate::infra::l10n::Msg;

/// Ask for confirmation, then clear every tool setting of the current profile.
/// Returns whether the reset happened.
pub fn reset_all_settings(host: &mut Host<'_>) -> Result<bool> {
    let message = host.t(Msg::ResetConfirmation, &[]);
    let buttons = host.buttons(&[Msg::ButtonYesReset, Msg::ButtonCancel]);
    if host.dialogs.warning(&message, &buttons)? != Some(0) {
        return Ok(false);
    }

    update_settings(host.settings, Settings::reset)?;
    info!("settings reset to defaults");

    let message = host.t(Msg::ResetComplete, &[]);
    let buttons = host.buttons(&[Msg::ButtonShowResetGuide, Msg::ButtonClose]);
    if host.dialogs.info(&message, &buttons)? == Some(0) {
        show_reset_guide(host)?;
    }
    Ok(true)
}

/// Explain that a reset only touches one profile, optionally listing profiles.
pub fn show_reset_guide(host: &mut Host<'_>) -> Result<()> {
    let message = host.t(Msg::ResetGuide, &[]);
    let buttons = host.buttons(&[Msg::ButtonListProfiles, Msg::ButtonClose]);
    if host.dialogs.info(&message, &buttons)? != Some(0) {
        return Ok(());
    }

    let Some(location) = host.location else {
        return Ok(());
    };
    let names = location.profiles()?.join("\n");
    let message = host.t(Msg::ProfileList, &[names.as_str()]);
    host.notify(&message)
}
