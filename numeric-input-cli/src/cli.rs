//! CLI definition for the numeric-check command-line interface.
//!
//! Only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Which intent the `gate` command checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum IntentKind {
    /// A single typed character
    Key,
    /// A whole clipboard string
    Paste,
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntentKind::Key => write!(f, "key"),
            IntentKind::Paste => write!(f, "paste"),
        }
    }
}

/// Field constraints given on the command line. Each flag overrides the
/// matching key from `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// YAML or JSON file holding the field configuration
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Inclusive lower bound
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub min: Option<f64>,

    /// Inclusive upper bound
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub max: Option<f64>,

    /// Accept decimal points and exponents (`--float=false` turns off a
    /// config file's `acceptFloat`)
    #[arg(
        long = "float",
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub accept_float: Option<bool>,

    /// Minimum digits after the decimal point
    #[arg(long, global = true)]
    pub min_decimals: Option<usize>,

    /// Maximum digits after the decimal point
    #[arg(long, global = true)]
    pub max_decimals: Option<usize>,
}

/// numeric-check - gate and validate numeric field text
#[derive(Parser, Debug)]
#[command(name = "numeric-check")]
#[command(version)]
#[command(about = "Gate keystrokes and validate numeric text field values")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub field: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate full field text and print the verdict as JSON
    Validate {
        /// Field text (may be empty)
        #[arg(allow_hyphen_values = true)]
        text: String,
        /// Also list every failed constraint
        #[arg(long)]
        explain: bool,
    },
    /// Decide whether a keystroke or paste may change the field
    Gate {
        /// Kind of intent
        #[arg(value_enum)]
        kind: IntentKind,
        /// The typed character or the clipboard text
        #[arg(allow_hyphen_values = true)]
        input: String,
        /// Text currently held by the field
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        current: String,
    },
    /// Read JSON-lines field events from stdin and answer each on stdout
    Events,
}
