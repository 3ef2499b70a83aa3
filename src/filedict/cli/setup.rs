use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "filedict", bin_name = "filedict", version = get_version())]
#[command(about = "File-backed JSONL dictionaries with an interactive picker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the dictionaries (overrides FILEDICT_HOME)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menu (the default)
    #[command(display_order = 1)]
    Menu,

    /// Create a new dictionary
    #[command(alias = "n", display_order = 2)]
    Create {
        /// Dictionary name
        name: String,
    },

    /// List dictionaries, least recently modified first
    #[command(alias = "ls", display_order = 3)]
    List,

    /// Pick a dictionary interactively and show its records
    #[command(display_order = 4)]
    Select,

    /// Delete a dictionary (picks interactively when no name is given)
    #[command(display_order = 5)]
    Delete {
        /// Dictionary name
        name: Option<String>,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show all records of a dictionary
    #[command(alias = "v", display_order = 10)]
    Show {
        /// Dictionary name
        name: String,
    },

    /// Print one record
    #[command(display_order = 11)]
    Get {
        /// Dictionary name
        name: String,
        key: String,
    },

    /// Add a record (fails if the key exists)
    #[command(display_order = 12)]
    Add {
        /// Dictionary name
        name: String,
        key: String,
        /// JSON value, e.g. '{"name":"Alice"}' or '"text"'
        value: String,
    },

    /// Replace an existing record
    #[command(display_order = 13)]
    Update {
        /// Dictionary name
        name: String,
        key: String,
        /// JSON value
        value: String,
    },

    /// Remove a record
    #[command(alias = "rm", display_order = 14)]
    Remove {
        /// Dictionary name
        name: String,
        key: String,
    },

    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// Configuration key (file-ext, atomic-writes)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
