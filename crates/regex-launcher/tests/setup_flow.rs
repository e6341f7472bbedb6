mod common;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use common::{BUDDY_EXE, Fixture};
use regex_launcher::app::reset::{reset_all_settings, show_reset_guide};
use regex_launcher::app::setup::{autodetect_paths, show_onboarding_if_needed, show_setup};
use regex_launcher::infra::config::{ConfigLocation, Settings, SettingsStore};
use regex_launcher::infra::probe::{FixedProbe, KNOWN_INSTALLS};
use regex_launcher::ui::scripted::{Answer, DialogKind};

const BUDDY5: &str = KNOWN_INSTALLS[0].path;
const MAGIC2: &str = KNOWN_INSTALLS[2].path;

#[test]
fn onboarding_setup_enables_detected_tools_and_stops_prompting() -> Result<()> {
    let mut fixture = Fixture::new(Settings::default())
        .answers([Answer::choose("Setup"), Answer::Pick(vec![0])]);
    fixture.probe = FixedProbe::new([BUDDY5]);

    show_onboarding_if_needed(&mut fixture.host())?;

    let shown = fixture.dialogs.shown();
    assert_eq!(shown[0].message, "regex-launcher is not configured. Open setup?");
    assert_eq!(shown[0].options, ["Setup", "Never show again", "Not now"]);
    assert_eq!(shown[1].kind, DialogKind::PickMany);
    assert_eq!(
        shown[1].options,
        ["Enable RegexBuddy (v5 detected)", "Enable RegexMagic"]
    );

    let stored = fixture.store.snapshot();
    assert_eq!(stored.regex_buddy.enabled, Some(true));
    assert_eq!(stored.regex_buddy.path, Some(PathBuf::from(BUDDY5)));
    assert_eq!(stored.regex_magic.enabled, Some(false));
    assert_eq!(stored.regex_magic.path, None);
    assert_eq!(stored.onboarding.show_on_startup, Some(false));
    Ok(())
}

#[test]
fn never_show_again_only_clears_the_flag() -> Result<()> {
    let mut fixture =
        Fixture::new(Settings::default()).answers([Answer::choose("Never show again")]);

    show_onboarding_if_needed(&mut fixture.host())?;

    assert_eq!(fixture.dialogs.shown().len(), 1);
    let stored = fixture.store.snapshot();
    assert_eq!(stored.onboarding.show_on_startup, Some(false));
    assert_eq!(stored.regex_buddy.enabled, None);
    Ok(())
}

#[test]
fn not_now_changes_nothing() -> Result<()> {
    let mut fixture = Fixture::new(Settings::default()).answers([Answer::choose("Not now")]);

    show_onboarding_if_needed(&mut fixture.host())?;

    assert_eq!(fixture.store.snapshot(), Settings::default());
    Ok(())
}

#[test]
fn onboarding_stays_quiet_once_dismissed() -> Result<()> {
    let mut stored = Settings::default();
    stored.onboarding.show_on_startup = Some(false);
    let mut fixture = Fixture::new(stored);

    show_onboarding_if_needed(&mut fixture.host())?;

    assert!(fixture.dialogs.shown().is_empty());
    Ok(())
}

#[test]
fn setup_dismissed_keeps_settings() -> Result<()> {
    let mut fixture = Fixture::configured();
    let before = fixture.store.snapshot();

    assert!(!show_setup(&mut fixture.host())?);
    assert_eq!(fixture.store.snapshot(), before);
    Ok(())
}

#[test]
fn setup_can_disable_everything_without_touching_paths() -> Result<()> {
    let mut fixture = Fixture::configured().answers([Answer::Pick(vec![])]);

    assert!(show_setup(&mut fixture.host())?);

    let stored = fixture.store.snapshot();
    assert_eq!(stored.regex_buddy.enabled, Some(false));
    assert_eq!(stored.regex_magic.enabled, Some(false));
    assert_eq!(stored.regex_buddy.path, Some(PathBuf::from(BUDDY_EXE)));
    assert_eq!(
        fixture.dialogs.messages(DialogKind::Info),
        ["Settings updated. Executable paths will be prompted for as needed."]
    );
    Ok(())
}

#[test]
fn autodetect_lists_searched_locations_when_nothing_is_found() -> Result<()> {
    let mut fixture = Fixture::new(Settings::default());

    assert_eq!(autodetect_paths(&mut fixture.host())?, 0);

    let info = fixture.dialogs.messages(DialogKind::Info);
    assert_eq!(info.len(), 2);
    assert!(info[0].starts_with("Searching for RegexBuddy and RegexMagic"));
    for known in KNOWN_INSTALLS {
        assert!(info[1].contains(known.path), "missing {}", known.path);
    }
    Ok(())
}

#[test]
fn autodetect_updates_only_accepted_paths() -> Result<()> {
    let mut fixture = Fixture::new(Settings::default())
        .answers([Answer::choose("Update path"), Answer::choose("Skip")]);
    fixture.probe = FixedProbe::new([BUDDY5, MAGIC2]);

    assert_eq!(autodetect_paths(&mut fixture.host())?, 1);

    let stored = fixture.store.snapshot();
    assert_eq!(stored.regex_buddy.path.as_deref(), Some(Path::new(BUDDY5)));
    assert_eq!(stored.regex_magic.path, None);

    let info = fixture.dialogs.messages(DialogKind::Info);
    assert_eq!(
        info[1],
        format!("Found RegexBuddy v5 at {BUDDY5}. Update the configured path?")
    );
    assert_eq!(
        info.last().copied(),
        Some(format!("Updated 1 path setting(s):\nRegexBuddy v5: {BUDDY5}").as_str())
    );
    Ok(())
}

#[test]
fn autodetect_skips_paths_already_configured() -> Result<()> {
    let mut stored = Settings::default();
    stored.regex_magic.path = Some(PathBuf::from(MAGIC2));
    let mut fixture = Fixture::new(stored);
    fixture.probe = FixedProbe::new([MAGIC2]);

    assert_eq!(autodetect_paths(&mut fixture.host())?, 0);

    assert_eq!(
        fixture.dialogs.messages(DialogKind::Info).last().copied(),
        Some("Auto-detection complete. No path settings were updated.")
    );
    assert_eq!(fixture.dialogs.shown().len(), 2);
    Ok(())
}

#[test]
fn confirmed_reset_clears_tools_and_reenables_onboarding() -> Result<()> {
    let mut fixture = Fixture::configured()
        .answers([Answer::choose("Yes, Reset Everything"), Answer::choose("Close")]);
    fixture.store.save(&{
        let mut stored = fixture.store.snapshot();
        stored.onboarding.show_on_startup = Some(false);
        stored.host.app_name = Some("Helix".into());
        stored
    })?;

    assert!(reset_all_settings(&mut fixture.host())?);

    let stored = fixture.store.snapshot();
    assert_eq!(stored.onboarding.show_on_startup, Some(true));
    assert_eq!(stored.regex_buddy, Default::default());
    assert_eq!(stored.regex_magic, Default::default());
    assert_eq!(stored.host.app_name.as_deref(), Some("Helix"));
    assert_eq!(fixture.dialogs.messages(DialogKind::Warning).len(), 1);
    Ok(())
}

#[test]
fn cancelled_reset_changes_nothing() -> Result<()> {
    let mut fixture = Fixture::configured().answers([Answer::choose("Cancel")]);
    let before = fixture.store.snapshot();

    assert!(!reset_all_settings(&mut fixture.host())?);
    assert_eq!(fixture.store.snapshot(), before);
    Ok(())
}

#[test]
fn reset_guide_lists_profiles() -> Result<()> {
    let temp = tempfile::tempdir()?;
    fs::create_dir_all(temp.path().join("profiles"))?;
    fs::write(temp.path().join("profiles/work.toml"), "")?;

    let mut fixture = Fixture::configured().answers([
        Answer::choose("Yes, Reset Everything"),
        Answer::choose("Show Reset Guide"),
        Answer::choose("List profiles"),
    ]);
    fixture.location = Some(ConfigLocation::at(temp.path()));

    reset_all_settings(&mut fixture.host())?;

    assert_eq!(
        fixture.dialogs.messages(DialogKind::Info).last().copied(),
        Some("Available profiles:\ndefault\nwork")
    );
    assert_eq!(fixture.dialogs.remaining(), 0);
    Ok(())
}

#[test]
fn reset_guide_can_be_closed() -> Result<()> {
    let mut fixture = Fixture::configured().answers([Answer::choose("Close")]);

    show_reset_guide(&mut fixture.host())?;

    let info = fixture.dialogs.messages(DialogKind::Info);
    assert_eq!(info.len(), 1);
    assert!(info[0].contains("--profile <name> reset"));
    Ok(())
}
