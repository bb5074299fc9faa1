use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `refs` binary.
#[derive(Debug, Parser)]
#[command(name = "refs", version, about = "Refdesk - search and register reference records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Max results to show (defaults to general.default_limit)
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Username to log in with
    #[arg(short, long, global = true, env = "REFDESK_USER")]
    pub user: Option<String>,

    /// Password to log in with
    #[arg(long, global = true, env = "REFDESK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            user: self.user.clone(),
            password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "refs", "--format", "json", "--limit", "10", "--verbose", "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["refs", "status", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["refs", "--format", "xml", "list"]).is_err());
    }

    #[test]
    fn credentials_are_global() {
        let cli = Cli::try_parse_from(["refs", "list", "--user", "ana", "--password", "pw"])
            .expect("cli should parse");
        let flags = cli.global_flags();
        assert_eq!(flags.user.as_deref(), Some("ana"));
        assert_eq!(flags.password.as_deref(), Some("pw"));
    }
}
