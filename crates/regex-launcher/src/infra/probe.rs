//! Filesystem checks and discovery of installed tools.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::model::Tool;

/// Answers whether a path exists.
pub trait PathProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Probe over a fixed set of paths.
#[derive(Debug, Default, Clone)]
pub struct FixedProbe {
    present: HashSet<PathBuf>,
}

impl FixedProbe {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            present: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl PathProbe for FixedProbe {
    fn exists(&self, path: &Path) -> bool {
        self.present.contains(path)
    }
}

/// Well-known install location for one product version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownInstall {
    pub tool: Tool,
    pub version: &'static str,
    pub path: &'static str,
}

/// Install locations in lookup order; the first existing one wins per tool.
pub const KNOWN_INSTALLS: [KnownInstall; 3] = [
    KnownInstall {
        tool: Tool::RegexBuddy,
        version: "5",
        path: r"C:\Program Files\Just Great Software\RegexBuddy 5\RegexBuddy5.exe",
    },
    KnownInstall {
        tool: Tool::RegexBuddy,
        version: "4",
        path: r"C:\Program Files\Just Great Software\RegexBuddy 4\RegexBuddy4.exe",
    },
    KnownInstall {
        tool: Tool::RegexMagic,
        version: "2",
        path: r"C:\Program Files\Just Great Software\RegexMagic 2\RegexMagic2.exe",
    },
];

/// A tool found at one of the [`KNOWN_INSTALLS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedInstall {
    pub tool: Tool,
    pub version: &'static str,
    pub path: PathBuf,
}

impl DetectedInstall {
    /// "RegexBuddy v5"
    pub fn label(&self) -> String {
        format!("{} v{}", self.tool, self.version)
    }
}

/// Detect installed tools, at most one entry per tool.
pub fn detect_installs(probe: &dyn PathProbe) -> Vec<DetectedInstall> {
    let mut detected: Vec<DetectedInstall> = Vec::new();
    for known in KNOWN_INSTALLS {
        if detected.iter().any(|found| found.tool == known.tool) {
            continue;
        }
        let path = Path::new(known.path);
        if probe.exists(path) {
            detected.push(DetectedInstall {
                tool: known.tool,
                version: known.version,
                path: path.to_path_buf(),
            });
        }
    }
    detected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_installed_detects_nothing() {
        assert!(detect_installs(&FixedProbe::default()).is_empty());
    }

    #[test]
    fn newest_regex_buddy_wins() {
        let probe = FixedProbe::new([KNOWN_INSTALLS[0].path, KNOWN_INSTALLS[1].path]);
        let detected = detect_installs(&probe);
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].version, "5");
        assert_eq!(detected[0].label(), "RegexBuddy v5");
    }

    #[test]
    fn falls_back_to_older_version_and_finds_magic() {
        let probe = FixedProbe::new([KNOWN_INSTALLS[1].path, KNOWN_INSTALLS[2].path]);
        let detected = detect_installs(&probe);
        assert_eq!(
            detected
                .iter()
                .map(|found| (found.tool, found.version))
                .collect::<Vec<_>>(),
            [(Tool::RegexBuddy, "4"), (Tool::RegexMagic, "2")]
        );
    }
}
