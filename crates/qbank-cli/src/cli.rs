//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// QBank CLI - talk to the local question-bank server and the marketplace
#[derive(Parser, Debug)]
#[command(
    name = "qbank",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "QBANK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Base address of the local application server
    #[arg(long, global = true, value_name = "URL")]
    pub local_url: Option<String>,

    /// Base address of the marketplace service
    #[arg(long, global = true, value_name = "URL")]
    pub market_url: Option<String>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Question banks, chapters and questions
    #[command(subcommand)]
    Banks(BankCommand),

    /// Generated papers
    #[command(subcommand)]
    Papers(PaperCommand),

    /// Exam results
    #[command(subcommand)]
    Results(ResultCommand),

    /// Favorited questions
    #[command(subcommand)]
    Favorites(FavoriteCommand),

    /// AI-assisted import
    #[command(subcommand)]
    Ai(AiCommand),

    /// Server version and updates
    #[command(subcommand)]
    System(SystemCommand),

    /// Browse, download and publish marketplace banks
    #[command(subcommand)]
    Market(MarketCommand),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

#[derive(Subcommand, Debug)]
pub enum BankCommand {
    /// List all banks
    List,
    /// Show one bank
    Show { id: String },
    /// List the chapters of a bank
    Chapters { id: String },
    /// Delete a chapter by name
    DeleteChapter {
        id: String,
        /// Chapter name, as displayed
        name: String,
    },
    /// List the questions of a bank
    Questions { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PaperCommand {
    /// List all papers
    List,
    /// Show one paper
    Show { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ResultCommand {
    /// List all exam results
    List,
}

#[derive(Subcommand, Debug)]
pub enum FavoriteCommand {
    /// List favorited questions
    List,
    /// Show favorite statistics
    Stats,
    /// Favorite a question
    Add { bank_id: String, question_id: String },
    /// Remove a question from favorites
    Remove { question_id: String },
}

#[derive(Subcommand, Debug)]
pub enum AiCommand {
    /// Extract questions from a document or image
    ParseFile {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// List file types the parser accepts
    Types,
}

#[derive(Subcommand, Debug)]
pub enum SystemCommand {
    /// Show the server version
    Version,
    /// Check for a newer release
    CheckUpdate,
}

#[derive(Subcommand, Debug)]
pub enum MarketCommand {
    /// List marketplace banks
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show one marketplace bank
    Show { id: String },
    /// Preview the first questions of a bank
    Preview {
        id: String,
        /// Number of questions to preview
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Search marketplace banks
    Search {
        query: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        subject: Option<String>,
    },
    /// List categories
    Categories,
    /// List subjects
    Subjects,
    /// Download a bank file
    Download {
        id: String,
        /// Where to write the file
        #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
        save_to: PathBuf,
    },
    /// Publish a bank file
    Upload {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show(ConfigShowArgs),

    /// Write a default configuration file
    Init(ConfigInitArgs),
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (defaults to the user config directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
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
    fn test_delete_chapter_keeps_name_verbatim() {
        let cli = Cli::parse_from(["qbank", "banks", "delete-chapter", "7", "Unit 1/Intro"]);
        match cli.command {
            Commands::Banks(BankCommand::DeleteChapter { id, name }) => {
                assert_eq!(id, "7");
                assert_eq!(name, "Unit 1/Intro");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_market_download_requires_destination() {
        assert!(Cli::try_parse_from(["qbank", "market", "download", "m1"]).is_err());

        let cli = Cli::parse_from(["qbank", "market", "download", "m1", "--save-to", "bank.json"]);
        assert!(matches!(
            cli.command,
            Commands::Market(MarketCommand::Download { .. })
        ));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "qbank",
            "-vv",
            "--local-url",
            "http://10.0.0.2:8000/api",
            "system",
            "version",
        ]);
        assert_eq!(cli.verbosity_level(), 2);
        assert_eq!(cli.local_url.as_deref(), Some("http://10.0.0.2:8000/api"));

        let cli = Cli::parse_from(["qbank", "--quiet", "results", "list"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
