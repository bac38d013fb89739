use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "n3s",
    about = "Convert between N3 and the compact predicate(subject,object). form",
    version
)]
pub struct Cli {
    /// Input file (`-` reads stdin)
    pub file: PathBuf,

    /// Read N3 and print the compact form (default)
    #[arg(long, conflicts_with = "encode")]
    pub decode: bool,

    /// Read the compact form and print N-Quads
    #[arg(long, conflicts_with = "decode")]
    pub encode: bool,

    /// Prefix the output with a `:- dynamic` line per predicate
    #[arg(long)]
    pub dynamic: bool,

    /// Leave predicates matching REGEX out of the preamble (repeatable)
    #[arg(long, value_name = "REGEX")]
    pub exclude: Vec<String>,

    /// Render N3 variables as bare names instead of failing
    #[arg(long)]
    pub allow_variables: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long)]
    pub no_color: bool,

    /// Path to config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Conversion direction selected on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// N3 in, compact form out
    Decode,
    /// Compact form in, N-Quads out
    Encode,
}

impl Cli {
    pub fn direction(&self) -> Direction {
        if self.encode {
            Direction::Encode
        } else {
            Direction::Decode
        }
    }
}
