//! Command-line flags.
use clap::Parser;

/// Command-line entry point: link the dotfiles repository into `$HOME`.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dotdeploy",
    about = "Symlink a dotfiles repository into the home directory",
    version = crate::VERSION
)]
pub struct Cli {
    /// Preview changes without applying
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_are_off() {
        let cli = Cli::parse_from(["dotdeploy"]);
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_dry_run() {
        let cli = Cli::parse_from(["dotdeploy", "--dry-run"]);
        assert!(cli.dry_run);
    }

    #[test]
    fn parse_dry_run_short() {
        let cli = Cli::parse_from(["dotdeploy", "-n"]);
        assert!(cli.dry_run);
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["dotdeploy", "-v"]);
        assert!(cli.verbose);
        let cli = Cli::parse_from(["dotdeploy", "--verbose"]);
        assert!(cli.verbose);
    }

    #[test]
    fn combined_short_flags() {
        let cli = Cli::parse_from(["dotdeploy", "-nv"]);
        assert!(cli.dry_run);
        assert!(cli.verbose);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["dotdeploy", "--root", "/tmp"]).is_err());
    }
}
