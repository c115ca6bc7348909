//! Domain types for the mirror configuration.
//!
//! All path fields use `PathBuf`. All types round-trip through serde + serde_yaml;
//! optional fields fall back to serde defaults so a minimal file only needs
//! `source_url` and `destinations`.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Repository mirrored when no config file is present.
pub const DEFAULT_SOURCE_URL: &str = "https://github.com/mtp1032/WoWThreads.git";

/// AddOns folders the mirror populates when no config file is present.
pub const DEFAULT_DESTINATIONS: &[&str] = &[
    r"C:\Program Files (x86)\World of Warcraft\_classic_\Interface\AddOns",
    r"C:\Program Files (x86)\World of Warcraft\_classic_beta_\Interface\AddOns",
    r"C:\Program Files (x86)\World of Warcraft\_classic_era_\Interface\AddOns",
    r"G:\My Drive\Addons-github-clones",
];

/// Version-control metadata directory kept in destinations and never copied.
pub const VCS_DIR: &str = ".git";

// ---------------------------------------------------------------------------
// GitOptions
// ---------------------------------------------------------------------------

/// How the version-control client is invoked for the clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitOptions {
    /// Executable name or path of the client.
    #[serde(default = "default_program")]
    pub program: String,
    /// Branch to check out instead of the remote default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Shallow-clone depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

fn default_program() -> String {
    "git".to_owned()
}

impl Default for GitOptions {
    fn default() -> Self {
        Self {
            program: default_program(),
            branch: None,
            depth: None,
        }
    }
}

// ---------------------------------------------------------------------------
// MirrorConfig
// ---------------------------------------------------------------------------

/// Everything a mirror run needs: where to clone from and where to copy to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorConfig {
    pub source_url: String,
    /// Destination roots, processed in order.
    #[serde(default)]
    pub destinations: Vec<PathBuf>,
    /// Subdirectory created under each destination root. Derived from
    /// `source_url` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdir: Option<String>,
    /// Top-level directory names preserved in targets and skipped when copying.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub git: GitOptions,
}

fn default_exclude() -> Vec<String> {
    vec![VCS_DIR.to_owned()]
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_owned(),
            destinations: DEFAULT_DESTINATIONS.iter().map(PathBuf::from).collect(),
            subdir: None,
            exclude: default_exclude(),
            git: GitOptions::default(),
        }
    }
}

impl MirrorConfig {
    /// Config for `source_url` with the given destinations and all other
    /// fields defaulted.
    pub fn new(source_url: impl Into<String>, destinations: Vec<PathBuf>) -> Self {
        Self {
            source_url: source_url.into(),
            destinations,
            ..Self::default()
        }
    }

    /// The subdirectory name used under every destination root.
    pub fn resolved_subdir(&self) -> String {
        match &self.subdir {
            Some(s) => s.clone(),
            None => repo_name_from_url(&self.source_url),
        }
    }

    /// `<root>/<subdir>` for every destination, in order.
    pub fn targets(&self) -> Vec<(PathBuf, PathBuf)> {
        let subdir = self.resolved_subdir();
        self.destinations
            .iter()
            .map(|root| (root.clone(), root.join(&subdir)))
            .collect()
    }

    /// Reject configs that cannot describe a sane mirror run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_url.trim().is_empty() {
            return Err(ConfigError::Invalid("source_url is empty".into()));
        }
        let subdir = self.resolved_subdir();
        if !is_single_component(&subdir) {
            return Err(ConfigError::Invalid(format!(
                "subdir '{subdir}' must be a single directory name"
            )));
        }
        Ok(())
    }
}

/// Last path segment of a repository URL with any `.git` suffix removed.
///
/// Handles `https://host/owner/repo.git`, `git@host:repo.git` and local paths
/// using either separator.
pub fn repo_name_from_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches(['/', '\\']);
    let last = trimmed
        .rsplit(['/', '\\', ':'])
        .next()
        .unwrap_or(trimmed);
    last.strip_suffix(".git").unwrap_or(last).to_owned()
}

fn is_single_component(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_embedded_constants() {
        let cfg = MirrorConfig::default();
        assert_eq!(cfg.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(cfg.destinations.len(), 4);
        assert_eq!(cfg.exclude, vec![".git".to_string()]);
        assert_eq!(cfg.git.program, "git");
        assert_eq!(cfg.resolved_subdir(), "WoWThreads");
    }

    #[test]
    fn repo_name_strips_git_suffix_and_separators() {
        assert_eq!(repo_name_from_url("https://github.com/a/Foo.git"), "Foo");
        assert_eq!(repo_name_from_url("https://github.com/a/Foo/"), "Foo");
        assert_eq!(repo_name_from_url("git@github.com:Bar.git"), "Bar");
        assert_eq!(repo_name_from_url(r"C:\src\Baz"), "Baz");
        assert_eq!(repo_name_from_url("/srv/git/qux.git"), "qux");
    }

    #[test]
    fn explicit_subdir_wins() {
        let mut cfg = MirrorConfig::new("https://example.com/x.git", vec![]);
        cfg.subdir = Some("Custom".into());
        assert_eq!(cfg.resolved_subdir(), "Custom");
    }

    #[test]
    fn targets_join_subdir_in_order() {
        let cfg = MirrorConfig::new(
            "https://example.com/Addon.git",
            vec![PathBuf::from("/a"), PathBuf::from("/b")],
        );
        let targets = cfg.targets();
        assert_eq!(targets[0].1, PathBuf::from("/a").join("Addon"));
        assert_eq!(targets[1].0, PathBuf::from("/b"));
    }

    #[test]
    fn validate_rejects_empty_url_and_nested_subdir() {
        let empty = MirrorConfig::new("  ", vec![]);
        assert!(matches!(empty.validate(), Err(ConfigError::Invalid(_))));

        let mut nested = MirrorConfig::new("https://example.com/x.git", vec![]);
        nested.subdir = Some("a/b".into());
        assert!(nested.validate().is_err());

        nested.subdir = Some("..".into());
        assert!(nested.validate().is_err());

        nested.subdir = Some("Addon".into());
        assert!(nested.validate().is_ok());
    }

    #[test]
    fn minimal_yaml_takes_defaults() {
        let yaml = "source_url: /tmp/repo\ndestinations:\n  - /tmp/out\n";
        let cfg: MirrorConfig = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(cfg.exclude, vec![".git".to_string()]);
        assert_eq!(cfg.git, GitOptions::default());
        assert!(cfg.subdir.is_none());
        assert_eq!(cfg.resolved_subdir(), "repo");
    }
}
