use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Search one column for a substring.
    Search(SearchArgs),
    /// List every record with its position.
    List,
    /// Register a new reference (all fields required).
    Create(CreateArgs),
    /// Edit the record at a position; omitted fields keep their value.
    Update(UpdateArgs),
    /// Delete the record at a position.
    Delete(DeleteArgs),
    /// Show where refs.csv lives and whether memory matches it.
    Status,
    /// Print the JSON schema of a response type.
    Schema(SchemaArgs),
    /// Explain the searchable columns and record fields.
    Guide,
    /// Interactive session: search, then edit or delete results by number.
    Shell,
}

/// Arguments for `refs search`.
#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Column to search: main_subject, campaign, keywords, description
    pub column: String,

    /// Substring to look for
    pub term: String,

    /// Match letter case exactly
    #[arg(long, conflicts_with = "ignore_case")]
    pub case_sensitive: bool,

    /// Ignore letter case, even when `general.case_sensitive` is set
    #[arg(long, short = 'i')]
    pub ignore_case: bool,

    /// Max results to show
    #[arg(long)]
    pub limit: Option<u32>,
}

impl SearchArgs {
    /// Case mode for this search: either flag wins over the configured default.
    #[must_use]
    pub const fn case_sensitive(&self, configured: bool) -> bool {
        if self.case_sensitive {
            true
        } else if self.ignore_case {
            false
        } else {
            configured
        }
    }
}

/// The nine record fields as optional flags.
#[derive(Clone, Debug, Default, Args)]
pub struct FieldArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub campaign: Option<String>,
    /// e.g. POST, REPORTAGEM, TEXTO
    #[arg(long)]
    pub category: Option<String>,
    /// Where the link points, e.g. INSTAGRAM or a site name
    #[arg(long)]
    pub place: Option<String>,
    /// One word for the main idea, e.g. ESTILO
    #[arg(long)]
    pub main_subject: Option<String>,
    /// Link to the referenced publication
    #[arg(long)]
    pub path: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    /// 3 to 5 words separated by spaces
    #[arg(long)]
    pub keywords: Option<String>,
}

/// Arguments for `refs create`.
#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Arguments for `refs update`.
#[derive(Clone, Debug, Args)]
pub struct UpdateArgs {
    /// Position shown by `refs list` or `refs search`
    pub position: usize,

    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Arguments for `refs delete`.
#[derive(Clone, Debug, Args)]
pub struct DeleteArgs {
    /// Position shown by `refs list` or `refs search`
    pub position: usize,

    /// Confirm the deletion; it cannot be undone
    #[arg(long)]
    pub yes: bool,
}

/// Response types `refs schema` can describe.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    #[default]
    Record,
    Search,
    List,
    Mutation,
    Delete,
    Status,
}

/// Arguments for `refs schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum, default_value_t = SchemaType::Record)]
    pub type_name: SchemaType,
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::cli::{Cli, Commands};

    use super::SchemaType;

    #[test]
    fn search_takes_column_and_term() {
        let cli = Cli::try_parse_from(["refs", "search", "campaign", "verão", "--case-sensitive"])
            .expect("cli should parse");
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.column, "campaign");
        assert_eq!(args.term, "verão");
        assert!(args.case_sensitive(false));
    }

    #[rstest]
    #[case(&[], false, false)]
    #[case(&[], true, true)]
    #[case(&["--case-sensitive"], false, true)]
    #[case(&["--ignore-case"], true, false)]
    #[case(&["-i"], true, false)]
    fn case_flags_override_the_configured_default(
        #[case] flags: &[&str],
        #[case] configured: bool,
        #[case] expected: bool,
    ) {
        let mut argv = vec!["refs", "search", "campaign", "verão"];
        argv.extend_from_slice(flags);
        let cli = Cli::try_parse_from(argv).expect("cli should parse");
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.case_sensitive(configured), expected);
    }

    #[test]
    fn case_flags_are_exclusive() {
        let result = Cli::try_parse_from([
            "refs",
            "search",
            "campaign",
            "x",
            "--case-sensitive",
            "--ignore-case",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn create_collects_field_flags() {
        let cli = Cli::try_parse_from([
            "refs",
            "create",
            "--title",
            "Summer",
            "--main-subject",
            "ESTILO",
            "--keywords",
            "praia sol verão",
        ])
        .expect("cli should parse");
        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.fields.title.as_deref(), Some("Summer"));
        assert_eq!(args.fields.main_subject.as_deref(), Some("ESTILO"));
        assert_eq!(args.fields.campaign, None);
    }

    #[test]
    fn update_requires_position() {
        assert!(Cli::try_parse_from(["refs", "update", "--title", "x"]).is_err());
        let cli = Cli::try_parse_from(["refs", "update", "3", "--title", "x"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Update(args) if args.position == 3));
    }

    #[test]
    fn delete_confirmation_defaults_off() {
        let cli = Cli::try_parse_from(["refs", "delete", "0"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Delete(args) if !args.yes));
    }

    #[test]
    fn schema_type_defaults_to_record() {
        let cli = Cli::try_parse_from(["refs", "schema"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Schema(args) if args.type_name == SchemaType::Record));
    }
}
