//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// hostsctl - Manage named, numbered blocks of aliases in your hosts file
#[derive(Parser, Debug)]
#[command(name = "hostsctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Hosts file to operate on instead of the system one
    #[arg(long, global = true, env = "HOSTSCTL_HOSTS_FILE", value_name = "PATH")]
    pub hosts_file: Option<PathBuf>,

    /// Settings file (TOML, JSON or YAML)
    #[arg(long, global = true, env = "HOSTSCTL_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Manage alias blocks
    Block {
        #[command(subcommand)]
        action: BlockAction,
    },

    /// Manage aliases
    Alias {
        #[command(subcommand)]
        action: AliasAction,
    },

    /// Inspect, format, back up and restore the hosts file
    Database {
        #[command(subcommand)]
        action: DatabaseAction,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   hostsctl completions bash > ~/.local/share/bash-completion/completions/hostsctl
    ///   hostsctl completions zsh > ~/.zfunc/_hostsctl
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Block actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BlockAction {
    /// List alias blocks
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,

        /// Omit the header row
        #[arg(long)]
        no_headers: bool,
    },

    /// Create a block, or update one with --force
    ///
    /// Examples:
    ///   hostsctl block add dev --note "local services"
    ///   hostsctl block add --id 20 --name lab
    Add {
        /// Block id (if numeric) or name
        block: Option<String>,

        /// Explicit block id
        #[arg(long)]
        id: Option<u32>,

        /// Block name
        #[arg(long)]
        name: Option<String>,

        /// Block note
        #[arg(long)]
        note: Option<String>,

        /// Update the block if it already exists
        #[arg(short, long)]
        force: bool,
    },

    /// Delete a block
    Delete {
        /// Block id or name
        block: String,

        /// Delete even if the block has aliases or several blocks match
        #[arg(short, long)]
        force: bool,
    },

    /// Remove every alias from a block
    Clear {
        /// Block id or name
        block: String,

        /// Clear even if the block holds system aliases
        #[arg(short, long)]
        force: bool,
    },
}

/// Alias actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AliasAction {
    /// List aliases
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,

        /// How entries are combined into rows
        #[arg(short, long, value_enum, default_value_t = Grouping::Raw)]
        group: Grouping,

        /// Omit the header row
        #[arg(long)]
        no_headers: bool,

        /// Only list aliases of this block (id or name)
        #[arg(short, long)]
        block: Option<String>,

        /// Include disabled entries
        #[arg(short, long)]
        all: bool,
    },

    /// Add aliases for an IP
    ///
    /// Without arguments, entries are read from stdin in hosts file syntax.
    ///
    /// Examples:
    ///   hostsctl alias add 10.0.0.5 api.dev db.dev --block dev
    ///   cat extra-hosts | hostsctl alias add --block lab
    Add {
        /// IP address followed by one or more aliases
        entries: Vec<String>,

        /// Target block (id or name)
        #[arg(short, long)]
        block: Option<String>,

        /// Note stored as the entry's trailing comment
        #[arg(long)]
        note: Option<String>,

        /// Create a missing block and skip unreadable input lines
        #[arg(short, long)]
        force: bool,
    },

    /// Delete an IP's entries or a single alias
    Delete {
        /// IP address or alias
        target: String,

        /// Only delete within this block (id or name)
        #[arg(short, long)]
        block: Option<String>,

        /// Delete system aliases and multiple matches
        #[arg(short, long)]
        force: bool,
    },
}

/// Database actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DatabaseAction {
    /// Print the hosts file path
    Location,

    /// Print the hosts file
    Print,

    /// Realign every entry into common columns
    Format {
        /// Print the result instead of saving it
        #[arg(long)]
        dry_run: bool,

        /// Print a unified diff instead of saving
        #[arg(long)]
        diff: bool,
    },

    /// Copy the hosts file to a backup
    Backup {
        /// Backup path (defaults to the hosts path plus the backup suffix)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing backup
        #[arg(short, long)]
        force: bool,
    },

    /// Replace the hosts file with a backup
    Restore {
        /// Backup path (defaults to the hosts path plus the backup suffix)
        #[arg(short, long)]
        source: Option<PathBuf>,
    },
}

/// Output formats for list commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table with the main columns
    Text,
    /// Table with the identifying columns only
    Short,
    /// Table with every column
    Wide,
    /// Tab-separated, no headers
    Plain,
    Json,
    Yaml,
}

/// Row grouping for `alias list`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// One row per entry, as written
    Raw,
    /// Merge entries sharing an IP within a block
    Group,
    /// One row per alias
    Ungroup,
}
