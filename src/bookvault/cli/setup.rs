use bookvault::search::SortField;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookvault", bin_name = "bookvault", version)]
#[command(about = "Track the books you read and how far you got", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $BOOKVAULT_DATA, then the OS data directory)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List records, optionally filtered and sorted
    #[command(alias = "ls")]
    List {
        /// Match title, author or tag
        #[arg(short, long)]
        search: Option<String>,

        /// Match case exactly
        #[arg(long)]
        case_sensitive: bool,

        /// Treat the search as a regular expression
        #[arg(long)]
        regex: bool,

        /// Sort by title, author, tag, pages, date or updated
        #[arg(long, value_name = "FIELD")]
        sort: Option<SortField>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Add a book
    Add {
        title: String,

        #[arg(short, long, default_value = "")]
        author: String,

        #[arg(short, long, default_value_t = 0)]
        pages: u32,

        #[arg(short, long, default_value = "")]
        tag: String,

        /// Date added, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show records with their reading history
    View {
        /// Record ids (rec_0003 or 3)
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Change fields of a record
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        author: Option<String>,

        #[arg(short, long)]
        pages: Option<u32>,

        #[arg(short, long)]
        tag: Option<String>,

        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete records
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Log pages read (negative to correct)
    Log {
        id: String,

        #[arg(allow_negative_numbers = true)]
        pages: i64,

        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Collection totals and reading goal
    Stats,

    /// Export all records as JSON
    Export {
        /// Write to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Replace all records with a JSON export
    Import { file: PathBuf },

    /// Show or change settings
    Config {
        /// theme, colorScheme, unit or goal
        key: Option<String>,
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bookvault").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_subcommand_defaults_to_none() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn parses_list_options() {
        match parse(&["ls", "-s", "dune", "--regex", "--sort", "pages", "--desc"]).command {
            Some(Commands::List {
                search,
                regex,
                sort,
                desc,
                case_sensitive,
            }) => {
                assert_eq!(search.as_deref(), Some("dune"));
                assert!(regex);
                assert!(!case_sensitive);
                assert_eq!(sort, Some(SortField::Pages));
                assert!(desc);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_sort_field() {
        let result = Cli::try_parse_from(["bookvault", "list", "--sort", "rating"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_add() {
        match parse(&["add", "The Hobbit", "-a", "Tolkien", "-p", "310", "-t", "Fantasy"]).command
        {
            Some(Commands::Add {
                title,
                author,
                pages,
                tag,
                date,
            }) => {
                assert_eq!(title, "The Hobbit");
                assert_eq!(author, "Tolkien");
                assert_eq!(pages, 310);
                assert_eq!(tag, "Fantasy");
                assert!(date.is_none());
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn parses_negative_log() {
        match parse(&["log", "3", "-12", "--note", "miscounted"]).command {
            Some(Commands::Log { id, pages, note }) => {
                assert_eq!(id, "3");
                assert_eq!(pages, -12);
                assert_eq!(note, "miscounted");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = parse(&["stats", "--data-dir", "/tmp/vault", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/vault")));
    }
}
