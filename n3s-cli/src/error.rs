use colored::Colorize;
use std::fmt;
use std::process;

/// Exit codes for the CLI.
#[allow(dead_code)]
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

/// Unified error type for CLI operations.
pub enum CliError {
    /// Compact-form conversion failure (either direction).
    Convert(n3s_graph_compact::Error),
    /// The N3 input could not be parsed.
    N3(n3s_graph_n3::N3Error),
    /// Configuration file issues.
    Config(String),
    /// Unreadable input or failed output.
    Input(String),
    /// Argument / usage errors.
    Usage(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Convert(e) => write!(f, "{} {e}", "error:".red().bold()),
            CliError::N3(e) => write!(f, "{} {e}", "error:".red().bold()),
            CliError::Config(msg) => write!(f, "{} {msg}", "error:".red().bold()),
            CliError::Input(msg) => write!(f, "{} {msg}", "error:".red().bold()),
            CliError::Usage(msg) => write!(f, "{} {msg}", "error:".red().bold()),
        }
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<n3s_graph_compact::Error> for CliError {
    fn from(e: n3s_graph_compact::Error) -> Self {
        CliError::Convert(e)
    }
}

impl From<n3s_graph_n3::N3Error> for CliError {
    fn from(e: n3s_graph_n3::N3Error) -> Self {
        CliError::N3(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Input(e.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Config(format!("invalid config: {e}"))
    }
}

impl From<regex::Error> for CliError {
    fn from(e: regex::Error) -> Self {
        CliError::Config(format!("invalid exclude pattern: {e}"))
    }
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) | CliError::Config(_) => EXIT_USAGE,
            _ => EXIT_ERROR,
        }
    }
}

/// Print error and exit with the appropriate code.
pub fn exit_with_error(err: CliError) -> ! {
    eprintln!("{err}");
    process::exit(err.exit_code())
}

pub type CliResult<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Usage("x".into()).exit_code(), EXIT_USAGE);
        assert_eq!(CliError::Config("x".into()).exit_code(), EXIT_USAGE);
        assert_eq!(CliError::Input("x".into()).exit_code(), EXIT_ERROR);
        let convert = CliError::from(n3s_graph_compact::Error::syntax("')'", "'.'", 3));
        assert_eq!(convert.exit_code(), EXIT_ERROR);
    }

    #[test]
    fn test_display_keeps_the_message() {
        colored::control::set_override(false);
        let err = CliError::from(n3s_graph_compact::Error::syntax("')'", "'.'", 3));
        assert_eq!(err.to_string(), "error: Expecting ')' but got '.' on line 3.");
    }
}
