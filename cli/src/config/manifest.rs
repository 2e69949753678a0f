//! The dotfile manifest: which files are linked where, per platform.
//!
//! The table lives in `manifest.toml` next to this module and is compiled
//! into the binary, so nothing is read from disk at run time.
use anyhow::{Context as _, Result, bail};
use serde::Deserialize;
use std::path::PathBuf;

use crate::platform::Platform;

/// The manifest shipped with the binary.
pub const EMBEDDED: &str = include_str!("manifest.toml");

/// One dotfile to deploy. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotfileEntry {
    /// Human-readable identifier, used for logging only.
    pub name: String,
    /// Path relative to the dotfiles repository root.
    pub source: PathBuf,
    /// Path relative to `$HOME`, or absolute.
    pub destination: PathBuf,
    /// Script next to the source to run before linking.
    pub compile_script: Option<PathBuf>,
    /// Mode bits to apply after linking.
    pub permissions: Option<u32>,
}

impl DotfileEntry {
    /// Create an entry with no compile script and no permissions.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            destination: destination.into(),
            compile_script: None,
            permissions: None,
        }
    }

    /// Set the compile script.
    #[must_use]
    pub fn with_compile_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.compile_script = Some(script.into());
        self
    }

    /// Set the mode bits applied after linking.
    #[must_use]
    pub const fn with_permissions(mut self, mode: u32) -> Self {
        self.permissions = Some(mode);
        self
    }
}

/// A manifest entry as written in TOML.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    name: String,
    source: PathBuf,
    destination: PathBuf,
    compile: Option<PathBuf>,
    permissions: Option<String>,
}

/// A platform section containing dotfiles.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Section {
    #[serde(default)]
    dotfiles: Vec<RawEntry>,
}

/// Top-level manifest layout.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default)]
    common: Section,
    #[serde(default)]
    osx: Section,
    #[serde(default)]
    linux: Section,
    #[serde(default)]
    freebsd: Section,
    #[serde(default)]
    cygwin: Section,
}

impl ManifestFile {
    fn section(&self, platform: Platform) -> &Section {
        match platform {
            Platform::Osx => &self.osx,
            Platform::Linux => &self.linux,
            Platform::FreeBsd => &self.freebsd,
            Platform::Cygwin => &self.cygwin,
        }
    }
}

/// Load the embedded manifest for `platform`.
///
/// # Errors
///
/// Returns an error if the embedded manifest is malformed.
pub fn load(platform: Platform) -> Result<Vec<DotfileEntry>> {
    parse(EMBEDDED, platform).context("loading embedded manifest")
}

/// Parse `content` and return the common entries followed by the entries of
/// `platform`'s section, in file order.
///
/// # Errors
///
/// Returns an error if the TOML is invalid, contains unknown fields, an entry
/// has an empty name or source, or a mode is not an octal number.
pub fn parse(content: &str, platform: Platform) -> Result<Vec<DotfileEntry>> {
    let file: ManifestFile = toml::from_str(content).context("Failed to parse TOML manifest")?;

    file.common
        .dotfiles
        .iter()
        .chain(&file.section(platform).dotfiles)
        .map(convert)
        .collect()
}

fn convert(raw: &RawEntry) -> Result<DotfileEntry> {
    if raw.name.trim().is_empty() {
        bail!("dotfile with source {} has an empty name", raw.source.display());
    }
    if raw.source.as_os_str().is_empty() {
        bail!("dotfile '{}' has an empty source", raw.name);
    }
    let permissions = raw
        .permissions
        .as_deref()
        .map(|mode| {
            u32::from_str_radix(mode, 8)
                .with_context(|| format!("invalid octal mode '{mode}' for '{}'", raw.name))
        })
        .transpose()?;

    Ok(DotfileEntry {
        name: raw.name.clone(),
        source: raw.source.clone(),
        destination: raw.destination.clone(),
        compile_script: raw.compile.clone(),
        permissions,
    })
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn embedded_manifest_common_set_on_linux() {
        let entries = load(Platform::Linux).unwrap();
        assert_eq!(entries.len(), 15);
        assert_eq!(entries[0].name, "curlrc");
        assert_eq!(entries[14].name, "mc");
    }

    #[test]
    fn osx_adds_three_entries() {
        let linux = load(Platform::Linux).unwrap().len();
        let osx = load(Platform::Osx).unwrap();
        assert_eq!(osx.len(), linux + 3);
        assert_eq!(osx[linux].name, "Xmodmap");
    }

    #[test]
    fn freebsd_adds_xinitrc() {
        let entries = load(Platform::FreeBsd).unwrap();
        assert_eq!(entries.len(), 16);
        assert_eq!(entries[15].name, "xinitrc");
    }

    #[test]
    fn cygwin_gets_common_set_only() {
        assert_eq!(load(Platform::Cygwin).unwrap().len(), 15);
    }

    #[test]
    fn ssh_config_compiles_and_restricts_mode() {
        let entries = load(Platform::Linux).unwrap();
        let ssh = entries.iter().find(|e| e.name == "ssh config").unwrap();
        assert_eq!(ssh.compile_script, Some(PathBuf::from("compile.sh")));
        assert_eq!(ssh.permissions, Some(0o600));
        assert_eq!(ssh.destination, PathBuf::from(".ssh/config"));
    }

    #[test]
    fn parse_absolute_destination() {
        let entries = parse(
            r#"[common]
dotfiles = [{ name = "hosts", source = "etc/hosts", destination = "/tmp/hosts" }]
"#,
            Platform::Linux,
        )
        .unwrap();
        assert_eq!(entries[0].destination, PathBuf::from("/tmp/hosts"));
    }

    #[test]
    fn parse_empty_manifest_yields_nothing() {
        assert!(parse("", Platform::Osx).unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_bad_mode() {
        let err = parse(
            r#"[common]
dotfiles = [{ name = "x", source = "x", destination = ".x", permissions = "9z" }]
"#,
            Platform::Linux,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("invalid octal mode"));
    }

    #[test]
    fn parse_rejects_unknown_field() {
        assert!(
            parse(
                r#"[common]
dotfiles = [{ name = "x", source = "x", destination = ".x", mode = "600" }]
"#,
                Platform::Linux,
            )
            .is_err()
        );
    }

    #[test]
    fn parse_rejects_unknown_section() {
        assert!(parse("[sunos]\ndotfiles = []\n", Platform::Linux).is_err());
    }

    #[test]
    fn parse_rejects_empty_name() {
        assert!(
            parse(
                r#"[common]
dotfiles = [{ name = " ", source = "x", destination = ".x" }]
"#,
                Platform::Linux,
            )
            .is_err()
        );
    }

    #[test]
    fn entry_builders() {
        let entry = DotfileEntry::new("ssh", "ssh/ssh_config", ".ssh/config")
            .with_compile_script("compile.sh")
            .with_permissions(0o600);
        assert_eq!(entry.compile_script, Some(PathBuf::from("compile.sh")));
        assert_eq!(entry.permissions, Some(0o600));
    }
}
