//! Platform detection from the operating system identifier.
use std::fmt;

use crate::error::PlatformError;
use crate::exec;

/// Supported operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS (`Darwin`).
    Osx,
    /// Linux.
    Linux,
    /// FreeBSD.
    FreeBsd,
    /// Cygwin on Windows (`CYGWIN_NT-*`).
    Cygwin,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Osx => write!(f, "OSX"),
            Self::Linux => write!(f, "Linux"),
            Self::FreeBsd => write!(f, "FreeBSD"),
            Self::Cygwin => write!(f, "Cygwin"),
        }
    }
}

impl Platform {
    /// Map an operating system identifier (as printed by `uname -s`) to a
    /// platform.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unsupported`] for any identifier other than
    /// `Darwin`, `Linux`, `FreeBSD` or a `CYGWIN` prefix.
    pub fn from_identifier(identifier: &str) -> Result<Self, PlatformError> {
        match identifier {
            "Darwin" => Ok(Self::Osx),
            "Linux" => Ok(Self::Linux),
            "FreeBSD" => Ok(Self::FreeBsd),
            id if id.starts_with("CYGWIN") => Ok(Self::Cygwin),
            other => Err(PlatformError::Unsupported {
                identifier: other.to_string(),
            }),
        }
    }

    /// Detect the current platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the running system is not supported.
    pub fn detect() -> Result<Self, PlatformError> {
        Self::from_identifier(&os_identifier())
    }

    /// Name of the manifest section holding this platform's extra entries.
    #[must_use]
    pub const fn manifest_section(self) -> &'static str {
        match self {
            Self::Osx => "osx",
            Self::Linux => "linux",
            Self::FreeBsd => "freebsd",
            Self::Cygwin => "cygwin",
        }
    }
}

/// Read the operating system identifier from `uname -s`.
///
/// Falls back to the compile-time target OS, spelled the way `uname` would,
/// when `uname` cannot be run.
#[must_use]
pub fn os_identifier() -> String {
    exec::run_unchecked("uname", &["-s"])
        .ok()
        .filter(|result| result.success)
        .map(|result| result.stdout.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| uname_spelling(std::env::consts::OS).to_string())
}

/// Translate a Rust target OS name into the matching `uname -s` output.
fn uname_spelling(target_os: &str) -> &str {
    match target_os {
        "macos" => "Darwin",
        "linux" => "Linux",
        "freebsd" => "FreeBSD",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darwin_is_osx() {
        assert_eq!(Platform::from_identifier("Darwin").unwrap(), Platform::Osx);
    }

    #[test]
    fn linux_and_freebsd() {
        assert_eq!(Platform::from_identifier("Linux").unwrap(), Platform::Linux);
        assert_eq!(
            Platform::from_identifier("FreeBSD").unwrap(),
            Platform::FreeBsd
        );
    }

    #[test]
    fn cygwin_prefix_matches_any_version() {
        assert_eq!(
            Platform::from_identifier("CYGWIN_NT-10.0-WOW").unwrap(),
            Platform::Cygwin
        );
        assert_eq!(
            Platform::from_identifier("CYGWIN_NT-6.1").unwrap(),
            Platform::Cygwin
        );
    }

    #[test]
    fn sunos_is_unsupported() {
        let err = Platform::from_identifier("SunOS").unwrap_err();
        assert!(err.to_string().contains("SunOS"));
    }

    #[test]
    fn identifiers_are_case_sensitive() {
        assert!(Platform::from_identifier("linux").is_err());
        assert!(Platform::from_identifier("").is_err());
    }

    #[test]
    fn display_matches_platform_tags() {
        assert_eq!(Platform::Osx.to_string(), "OSX");
        assert_eq!(Platform::Linux.to_string(), "Linux");
        assert_eq!(Platform::FreeBsd.to_string(), "FreeBSD");
        assert_eq!(Platform::Cygwin.to_string(), "Cygwin");
    }

    #[test]
    fn manifest_sections() {
        assert_eq!(Platform::Osx.manifest_section(), "osx");
        assert_eq!(Platform::FreeBsd.manifest_section(), "freebsd");
    }

    #[test]
    fn uname_spelling_of_targets() {
        assert_eq!(uname_spelling("macos"), "Darwin");
        assert_eq!(uname_spelling("linux"), "Linux");
        assert_eq!(uname_spelling("freebsd"), "FreeBSD");
        assert_eq!(uname_spelling("solaris"), "solaris");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn detect_on_linux_host() {
        assert_eq!(Platform::detect().unwrap(), Platform::Linux);
    }
}
